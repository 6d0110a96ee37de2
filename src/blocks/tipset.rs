// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use anyhow::Context as _;
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use itertools::Itertools as _;
use tracing::instrument;

use super::{Block, ChainEpoch, Error, TipsetKey};

/// A non-empty set of sibling blocks: same parents, same height.
///
/// Blocks are kept in ascending order of their CID string. Every consumer
/// (serialization, equality, API output) relies on that order.
#[derive(Clone, Debug)]
pub struct Tipset {
    key: TipsetKey,
    blocks: Vec<Block>,
}

impl PartialEq for Tipset {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tipset {}

impl From<Block> for Tipset {
    fn from(block: Block) -> Self {
        Self {
            key: TipsetKey::from(block.cid()),
            blocks: vec![block],
        }
    }
}

impl Tipset {
    /// Builds a tipset from its blocks, in any order.
    ///
    /// Fails if there are no blocks, if the blocks disagree on parents or
    /// height, or if the same block is given twice. A block without parents
    /// must be at height 0, and only such a block may be.
    pub fn new(blocks: impl IntoIterator<Item = Block>) -> Result<Self, Error> {
        let mut blocks = blocks
            .into_iter()
            .map(|block| (block.cid(), block))
            .collect_vec();
        let Some((_, first)) = blocks.first() else {
            return Err(Error::InvalidTipset("no blocks".into()));
        };
        if first.height < 0 {
            return Err(Error::InvalidTipset(format!(
                "negative height {}",
                first.height
            )));
        }
        if first.parents.is_empty() != (first.height == 0) {
            return Err(Error::InvalidTipset(format!(
                "height {} with {} parents, only genesis has no parents",
                first.height,
                first.parents.len()
            )));
        }
        for (cid, block) in &blocks[1..] {
            if block.parents != first.parents {
                return Err(Error::InvalidTipset(format!(
                    "block {cid} has parents {}, expected {}",
                    block.parents, first.parents
                )));
            }
            if block.height != first.height {
                return Err(Error::InvalidTipset(format!(
                    "block {cid} has height {}, expected {}",
                    block.height, first.height
                )));
            }
        }
        blocks.sort_by_cached_key(|(cid, _)| cid.to_string());
        if let Some(((cid, _), _)) = blocks.iter().tuple_windows().find(|(a, b)| a.0 == b.0) {
            return Err(Error::InvalidTipset(format!("duplicate block {cid}")));
        }

        let (cids, blocks): (Vec<Cid>, Vec<Block>) = blocks.into_iter().unzip();
        Ok(Self {
            key: TipsetKey::from(cids),
            blocks,
        })
    }

    /// Adds a sibling block, keeping the blocks ordered.
    pub fn add(&mut self, block: Block) -> Result<(), Error> {
        let blocks = std::mem::take(&mut self.blocks);
        match Self::new(blocks.iter().cloned().chain(std::iter::once(block))) {
            Ok(tipset) => {
                *self = tipset;
                Ok(())
            }
            Err(e) => {
                self.blocks = blocks;
                Err(e)
            }
        }
    }

    /// Loads a tipset from the blockstore. Returns `None` if any of its
    /// blocks is missing.
    #[instrument(skip_all)]
    pub fn load(db: &impl Blockstore, key: &TipsetKey) -> anyhow::Result<Option<Tipset>> {
        let mut blocks = Vec::with_capacity(key.len());
        for cid in key {
            match Block::load(db, cid)? {
                Some(block) => blocks.push(block),
                None => return Ok(None),
            }
        }
        if blocks.is_empty() {
            return Ok(None);
        }
        Ok(Some(Tipset::new(blocks)?))
    }

    /// Like [`Tipset::load`], but a missing tipset is an error.
    pub fn load_required(db: &impl Blockstore, key: &TipsetKey) -> anyhow::Result<Tipset> {
        Tipset::load(db, key)?.with_context(|| format!("tipset {key} not found"))
    }

    /// Iterates from this tipset back to genesis. A missing parent cuts the
    /// chain short.
    pub fn chain(self, db: &impl Blockstore) -> impl Iterator<Item = Tipset> + '_ {
        std::iter::successors(Some(self), move |child| {
            if child.is_genesis() {
                None
            } else {
                Tipset::load(db, child.parents()).ok().flatten()
            }
        })
    }

    pub fn key(&self) -> &TipsetKey {
        &self.key
    }

    /// Member block CIDs, ascending.
    pub fn cids(&self) -> &[Cid] {
        self.key.cids()
    }

    /// Member blocks, ordered by ascending CID.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn height(&self) -> ChainEpoch {
        self.first().height
    }

    pub fn parents(&self) -> &TipsetKey {
        &self.first().parents
    }

    pub fn parent_weight(&self) -> u64 {
        self.first().parent_weight
    }

    pub fn is_genesis(&self) -> bool {
        self.parents().is_empty()
    }

    fn first(&self) -> &Block {
        // non-empty by construction
        &self.blocks[0]
    }
}

/// A tipset paired with the state root produced by executing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TipsetAndState {
    pub tipset: Arc<Tipset>,
    pub state_root: Cid,
}

impl TipsetAndState {
    pub fn new(tipset: impl Into<Arc<Tipset>>, state_root: Cid) -> Self {
        Self {
            tipset: tipset.into(),
            state_root,
        }
    }

    pub fn key(&self) -> &TipsetKey {
        self.tipset.key()
    }
}
