// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;
use cid::Cid;
use clap::Subcommand;
use fvm_ipld_blockstore::Blockstore as _;

use super::print_pretty_lotus_json;
use crate::blocks::Block;
use crate::cli_shared::{cli::Config, open_chain_store};

#[derive(Debug, Subcommand)]
pub enum DagCommands {
    /// Prints a stored object: as lotus JSON if it is a block, otherwise as
    /// hex encoded bytes
    Get { cid: Cid },
}

impl DagCommands {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let cs = open_chain_store(config)?;
        match self {
            Self::Get { cid } => {
                let bytes = cs
                    .blockstore()
                    .get(&cid)?
                    .with_context(|| format!("object {cid} not found"))?;
                match fvm_ipld_encoding::from_slice::<Block>(&bytes) {
                    Ok(block) => print_pretty_lotus_json(block),
                    Err(_) => {
                        println!("{}", hex::encode(bytes));
                        Ok(())
                    }
                }
            }
        }
    }
}
