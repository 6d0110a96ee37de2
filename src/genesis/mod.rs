// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeMap;

use anyhow::Context as _;
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use fvm_ipld_encoding::tuple::*;
use tracing::info;

use crate::blocks::{Block, Tipset, TipsetAndState};
use crate::chain::{ChainStore, Error};
use crate::db::{SettingsStore, TipsetStateStore};
use crate::utils::cid::CidCborExt as _;
use crate::utils::db::CborStoreExt as _;

/// Version of the [`GenesisState`] layout.
pub const GENESIS_STATE_VERSION: u64 = 1;

/// Root object of the genesis state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct GenesisState {
    pub version: u64,
    pub network_name: String,
    /// Actor table, keyed by address string. Empty at genesis.
    pub actors: Cid,
}

/// Builds the genesis state and block for `network_name`, records them in
/// `chain_store` and returns the genesis block.
///
/// The result only depends on `network_name`, so running it again against the
/// same stores changes nothing. Write failures are returned as is.
pub fn init_genesis<SS, DB>(
    state_store: &SS,
    chain_store: &ChainStore<DB>,
    network_name: &str,
) -> anyhow::Result<Block>
where
    SS: Blockstore,
    DB: Blockstore + SettingsStore + TipsetStateStore + Send + Sync + 'static,
{
    let actors_table = BTreeMap::<String, Cid>::new();
    let state = GenesisState {
        version: GENESIS_STATE_VERSION,
        network_name: network_name.into(),
        actors: Cid::from_cbor_blake2b256(&actors_table)?,
    };
    let genesis = Block {
        state_root: Cid::from_cbor_blake2b256(&state)?,
        ..Default::default()
    };

    // Nothing is written unless the store is empty or already has this genesis.
    match chain_store.genesis_cid()? {
        Some(stored) if stored != genesis.cid() => {
            return Err(Error::GenesisMismatch {
                stored,
                given: genesis.cid(),
            }
            .into());
        }
        _ => {}
    }

    state_store
        .put_cbor_default(&actors_table)
        .context("failed to write genesis actor table")?;
    state_store
        .put_cbor_default(&state)
        .context("failed to write genesis state")?;
    chain_store
        .put_tipset_and_state(&TipsetAndState::new(
            Tipset::from(genesis.clone()),
            genesis.state_root,
        ))
        .context("failed to index genesis tipset")?;
    chain_store
        .set_genesis(genesis.cid())
        .context("failed to record genesis")?;

    info!("Initialized genesis: {}", genesis.cid());
    Ok(genesis)
}

/// Reads the network name from the genesis state.
pub fn get_network_name_from_genesis(
    state_store: &impl Blockstore,
    genesis: &Block,
) -> anyhow::Result<String> {
    let state: GenesisState = state_store
        .get_cbor_required(genesis.state_root())
        .context("Failed to retrieve network name from genesis")?;
    Ok(state.network_name)
}
