// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use tracing::info;

use crate::blocks::Tipset;
use crate::chain::Error;
use crate::cli_shared::{chain_path, cli::Config, open_chain_store};
use crate::genesis::init_genesis;

#[derive(Debug, clap::Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Prints the genesis block CID. A store that already has a head keeps
    /// it.
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let cs = open_chain_store(config)?;
        let genesis = init_genesis(cs.blockstore().as_ref(), &cs, &config.client.network_name)?;
        match cs.heaviest_tipset() {
            Ok(head) => info!("keeping chain head at height {}", head.height()),
            Err(Error::HeaviestTipsetNotFound) => {
                cs.set_head(Arc::new(Tipset::from(genesis.clone())))?
            }
            Err(e) => return Err(e.into()),
        }
        info!("chain data at {}", chain_path(config).display());
        println!("{}", genesis.cid());
        Ok(())
    }
}
