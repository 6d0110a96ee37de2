// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use cid::Cid;
use thiserror::Error;

use crate::blocks::{self, TipsetKey};

/// Chain store error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// No head has been set yet
    #[error("heaviest tipset not found")]
    HeaviestTipsetNotFound,
    /// No state is indexed for this tipset
    #[error("tipset not found: {0}")]
    TipsetNotFound(TipsetKey),
    /// Blocks do not form a valid tipset
    #[error(transparent)]
    Blocks(#[from] blocks::Error),
    /// The tipset is already indexed with a different state root
    #[error("tipset {key} already has state root {stored}, refusing {given}")]
    StateRootMismatch {
        key: TipsetKey,
        stored: Cid,
        given: Cid,
    },
    /// The store was initialized with a different genesis block
    #[error("genesis mismatch: store has {stored}, got {given}")]
    GenesisMismatch { stored: Cid, given: Cid },
    #[error("failed to get block {cid}: {reason}")]
    BlockFetch { cid: Cid, reason: String },
    #[error("failed to get block {cid}: timed out after {timeout:?}")]
    BlockFetchTimeout { cid: Cid, timeout: Duration },
    /// Error originating from the underlying stores
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(format!("{e:#}"))
    }
}
