// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

mod block;
mod tipset;

pub use block::Block;
pub use fvm_shared4::clock::ChainEpoch;
pub use tipset::{Tipset, TipsetAndState};

/// A tipset is identified by the ordered set of its member block CIDs.
pub type TipsetKey = crate::cid_collections::SortedCidSet;

/// Blockchain blocks error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Tipset contains invalid data, as described by the string parameter.
    #[error("Invalid tipset: {0}")]
    InvalidTipset(String),
}
