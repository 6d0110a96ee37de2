// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use cid::Cid;
use clap::Subcommand;
use futures::StreamExt as _;
use itertools::Itertools as _;

use super::print_pretty_lotus_json;
use crate::blocks::TipsetKey;
use crate::cli_shared::{cli::Config, open_chain_store};
use crate::lotus_json::HasLotusJson as _;

#[derive(Debug, Subcommand)]
pub enum ChainCommands {
    /// Prints out the CIDs of the current head tipset
    Head,

    /// Prints every tipset from the head back to genesis, one per line
    Ls {
        /// Seconds to wait for each parent block, defaults to
        /// `chain_store.fetch_timeout`
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Manually set the head to the tipset made of the given blocks, which
    /// must already be stored
    SetHead {
        #[arg(num_args = 1.., required = true)]
        cids: Vec<Cid>,
    },

    /// Retrieves and prints out the block specified by the given CID
    Block { cid: Cid },
}

impl ChainCommands {
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let cs = open_chain_store(config)?;
        match self {
            Self::Head => {
                let cids = cs.head()?.iter().map(Cid::to_string).collect_vec();
                println!("{}", serde_json::to_string(&cids)?);
                Ok(())
            }
            Self::Ls { timeout } => {
                let mut tipsets =
                    cs.ls_from(cs.heaviest_tipset()?, timeout.map(Duration::from_secs));
                while let Some(tipset) = tipsets.next().await {
                    let tipset = Arc::unwrap_or_clone(tipset?);
                    println!("{}", tipset.into_lotus_json_string()?);
                }
                Ok(())
            }
            Self::SetHead { cids } => {
                let tipset = cs.get_tipset(&TipsetKey::from_iter(cids))?;
                cs.set_head(tipset)?;
                Ok(())
            }
            Self::Block { cid } => {
                let block = cs
                    .get_block(&cid)?
                    .with_context(|| format!("block {cid} not found"))?;
                print_pretty_lotus_json(block)
            }
        }
    }
}
