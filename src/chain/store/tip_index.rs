// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use ahash::HashMap;

use crate::blocks::{ChainEpoch, TipsetAndState, TipsetKey};

/// Tracks indexed tipsets and their state roots by parents and height, so
/// that siblings of a tipset can be found without touching the database.
#[derive(Debug, Default)]
pub struct TipIndex {
    by_parents_and_height: HashMap<(TipsetKey, ChainEpoch), Vec<TipsetAndState>>,
}

impl TipIndex {
    /// Adds an entry. Returns `false` if an entry with the same tipset key is
    /// already tracked.
    pub fn put(&mut self, entry: TipsetAndState) -> bool {
        let slot = self
            .by_parents_and_height
            .entry((entry.tipset.parents().clone(), entry.tipset.height()))
            .or_default();
        if slot.iter().any(|known| known.key() == entry.key()) {
            return false;
        }
        slot.push(entry);
        true
    }

    pub fn get(&self, parents: &TipsetKey, height: ChainEpoch) -> &[TipsetAndState] {
        self.by_parents_and_height
            .get(&(parents.clone(), height))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has(&self, parents: &TipsetKey, height: ChainEpoch) -> bool {
        !self.get(parents, height).is_empty()
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.by_parents_and_height.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parents_and_height.is_empty()
    }
}
