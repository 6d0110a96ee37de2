// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Persistent chain store for a Filecoin-style blockchain.
//!
//! Blocks are content addressed (DAG-CBOR, BLAKE2b-256 CIDs) and grouped
//! into tipsets. The [`ChainStore`] keeps the current head, an index from
//! tipset to state root, and walks the chain back to genesis as a lazy
//! stream.

pub mod blocks;
pub mod chain;
pub mod cid_collections;
mod cli;
pub mod cli_shared;
pub mod db;
pub mod genesis;
pub mod lotus_json;
pub mod message;
#[cfg(test)]
mod test_utils;
pub mod utils;

pub use blocks::{Block, ChainEpoch, Tipset, TipsetAndState, TipsetKey};
pub use chain::{ChainStore, ChainStoreConfig, Error, HeadChange};
pub use cli::main::main as forest_chain_main;
pub use cli_shared::cli::{Client, Config};
pub use db::{MemoryDB, ParityDb};
pub use genesis::init_genesis;
