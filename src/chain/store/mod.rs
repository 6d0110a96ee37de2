// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod chain_store;
mod errors;
mod tip_index;
pub mod traversal;

pub use self::{chain_store::*, errors::*, tip_index::TipIndex};
pub use traversal::{BlockFetcher, BlockstoreFetcher, TipsetStream, traverse};
