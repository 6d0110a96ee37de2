// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod chain_cmd;
mod config_cmd;
mod dag_cmd;
mod init_cmd;

pub(super) use self::{
    chain_cmd::ChainCommands, config_cmd::ConfigCommands, dag_cmd::DagCommands,
    init_cmd::InitCommand,
};
use crate::cli_shared::cli::{CliOpts, Config};
use crate::lotus_json::HasLotusJson;
use clap::Parser;

/// Command line interface over a local chain store
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), bin_name = "forest-chain", author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(flatten)]
    pub opts: CliOpts,
    #[command(subcommand)]
    pub cmd: Subcommand,
}

/// Sub-commands available.
#[derive(clap::Subcommand, Debug)]
pub enum Subcommand {
    /// Write the genesis block and make it the head of an empty store
    Init(InitCommand),

    /// Inspect or move the chain head
    #[command(subcommand)]
    Chain(ChainCommands),

    /// Read raw objects from the block store
    #[command(subcommand)]
    Dag(DagCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Subcommand {
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(config),
            Self::Chain(cmd) => cmd.run(config).await,
            Self::Dag(cmd) => cmd.run(config),
            Self::Config(cmd) => cmd.run(config, &mut std::io::stdout()),
        }
    }
}

/// Prints the lotus JSON of `obj`, indented.
pub(super) fn print_pretty_lotus_json<T: HasLotusJson>(obj: T) -> anyhow::Result<()> {
    println!("{}", obj.into_lotus_json_string_pretty()?);
    Ok(())
}
