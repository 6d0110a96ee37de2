// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod client;
mod config;

use std::path::PathBuf;

pub use self::{client::*, config::*};

/// Checked when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "FOREST_CHAIN_CONFIG_PATH";

/// Options shared by every command
#[derive(clap::Args, Default, Debug, Clone)]
pub struct CliOpts {
    /// A TOML file containing relevant configurations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Root directory of the chain database, overrides `client.data_dir`
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Network name recorded in the genesis state, overrides
    /// `client.network_name`
    #[arg(long, global = true)]
    pub network_name: Option<String>,
    /// Also write logs to hourly rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

impl CliOpts {
    /// Reads the configuration file, if any, and applies the command line
    /// overrides on top.
    pub fn to_config(&self) -> anyhow::Result<(Option<ConfigPath>, Config)> {
        let (path, mut config) = super::read_config(self.config.as_ref())?;
        if let Some(data_dir) = &self.data_dir {
            config.client.data_dir.clone_from(data_dir);
        }
        if let Some(network_name) = &self.network_name {
            config.client.network_name.clone_from(network_name);
        }
        Ok((path, config))
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPath {
    Cli(PathBuf),
    Env(PathBuf),
}

impl ConfigPath {
    pub fn to_path_buf(&self) -> &PathBuf {
        match self {
            ConfigPath::Cli(path) | ConfigPath::Env(path) => path,
        }
    }
}

pub fn find_config_path(config: Option<&PathBuf>) -> Option<ConfigPath> {
    if let Some(path) = config {
        return Some(ConfigPath::Cli(path.clone()));
    }
    std::env::var_os(CONFIG_PATH_ENV)
        .filter(|path| !path.is_empty())
        .map(|path| ConfigPath::Env(PathBuf::from(path)))
}
