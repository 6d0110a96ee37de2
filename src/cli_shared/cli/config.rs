// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use tracing_subscriber::filter::LevelFilter;

use super::client::Client;
use crate::chain::ChainStoreConfig;
use crate::db::db_engine::DbConfig;

/// A level such as `info` or `OFF`, parsed case-insensitively.
#[derive(PartialEq, Eq, Debug, Clone, SerializeDisplay, DeserializeFromStr)]
pub struct LogLevelFilter(pub LevelFilter);

impl fmt::Display for LogLevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LogLevelFilter {
    type Err = <LevelFilter as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct LogConfig {
    pub filters: Vec<LogValue>,
}

impl LogConfig {
    /// Directives in `EnvFilter` syntax, e.g. `parity_db=warn`.
    pub(in crate::cli_shared) fn to_filter_string(&self) -> String {
        self.filters
            .iter()
            .map(|f| format!("{}={}", f.module, f.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filters: vec![
                LogValue::new("parity_db", LogLevelFilter(LevelFilter::WARN)),
                LogValue::new("forest_chain_store::db", LogLevelFilter(LevelFilter::INFO)),
            ],
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct LogValue {
    pub module: String,
    pub level: LogLevelFilter,
}

impl LogValue {
    pub fn new(module: &str, level: LogLevelFilter) -> Self {
        Self {
            module: module.to_string(),
            level,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub client: Client,
    pub chain_store: ChainStoreConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn db_config(&self) -> &DbConfig {
        &self.chain_store.db
    }
}
