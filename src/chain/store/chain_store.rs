// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;
use std::time::Duration;

use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use tokio::sync::broadcast::{self, Sender as Publisher};
use tracing::{debug, info, warn};

use super::{
    Error,
    tip_index::TipIndex,
    traversal::{BlockstoreFetcher, TipsetStream, traverse},
};
use crate::blocks::{Block, ChainEpoch, Tipset, TipsetAndState, TipsetKey};
use crate::db::parity_db_config::ParityDbConfig;
use crate::db::setting_keys::{GENESIS_KEY, HEAD_KEY};
use crate::db::{SettingsStore, SettingsStoreExt, TipsetStateStore, TipsetStateStoreExt};

// A cap on the size of the future_sink
const SINK_CAP: usize = 200;

/// `Enum` for `pubsub` channel that defines message type variant and data
/// contained in message type.
#[derive(Clone, Debug)]
pub enum HeadChange {
    Apply(Arc<Tipset>),
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainStoreConfig {
    /// Bound on each parent block fetch during [`ChainStore::ls`].
    #[serde_as(as = "DurationSeconds<u64>")]
    pub fetch_timeout: Duration,
    pub db: ParityDbConfig,
}

impl Default for ChainStoreConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            db: ParityDbConfig::default(),
        }
    }
}

/// Owns the chain head and the tipset to state root index.
///
/// Readers never block each other. Head updates are serialized, written to
/// the settings store first, then swapped in memory, so a reader sees either
/// the old or the new head.
pub struct ChainStore<DB> {
    /// Publisher for head change events
    publisher: Publisher<HeadChange>,

    /// Blocks, settings and the tipset state index.
    db: Arc<DB>,

    head: RwLock<Option<Arc<Tipset>>>,

    /// Held for the whole of a head or genesis update.
    head_writer: Mutex<()>,

    /// Held while checking and writing a tipset state entry.
    tipset_states_writer: Mutex<()>,

    tip_index: RwLock<TipIndex>,

    config: ChainStoreConfig,
}

impl<DB> ChainStore<DB>
where
    DB: Blockstore + SettingsStore + TipsetStateStore + Send + Sync + 'static,
{
    /// Opens a chain store over `db`, restoring whatever head and index it
    /// already holds.
    pub fn new(db: Arc<DB>, config: ChainStoreConfig) -> Result<Self, Error> {
        let (publisher, _) = broadcast::channel(SINK_CAP);
        let cs = Self {
            publisher,
            db,
            head: RwLock::new(None),
            head_writer: Mutex::new(()),
            tipset_states_writer: Mutex::new(()),
            tip_index: RwLock::new(TipIndex::default()),
            config,
        };
        cs.load()?;
        Ok(cs)
    }

    /// Re-reads the head and rebuilds the in-memory tip index from the
    /// database. An unset head is not an error.
    pub fn load(&self) -> Result<(), Error> {
        let _head_guard = self.head_writer.lock();
        let _tipset_states_guard = self.tipset_states_writer.lock();

        let mut tip_index = TipIndex::default();
        for key in self.db.tipset_keys()? {
            let Some(state_root) = self.db.read_state_root(&key)? else {
                continue;
            };
            match Tipset::load(self.db.as_ref(), &key)? {
                Some(tipset) => {
                    tip_index.put(TipsetAndState::new(tipset, state_root));
                }
                None => warn!("indexed tipset {key} has missing blocks, skipping"),
            }
        }
        *self.tip_index.write() = tip_index;

        let head = match self.db.read_obj::<TipsetKey>(HEAD_KEY)? {
            Some(key) => Some(Arc::new(
                Tipset::load(self.db.as_ref(), &key)?.ok_or(Error::TipsetNotFound(key))?,
            )),
            None => None,
        };
        match &head {
            Some(head) => info!("loaded chain head at height {}", head.height()),
            None => debug!("no chain head set"),
        }
        *self.head.write() = head;
        Ok(())
    }

    /// Replaces the head. The tipset's blocks are persisted and its key is
    /// written under [`HEAD_KEY`] before the in-memory head changes.
    pub fn set_head(&self, tipset: Arc<Tipset>) -> Result<(), Error> {
        let _guard = self.head_writer.lock();
        persist_objects(self.db.as_ref(), tipset.blocks())?;
        self.db.write_obj(HEAD_KEY, tipset.key())?;
        *self.head.write() = Some(Arc::clone(&tipset));
        debug!("head set to {} at height {}", tipset.key(), tipset.height());
        if self.publisher.send(HeadChange::Apply(tipset)).is_err() {
            debug!("did not publish head change, no active receivers");
        }
        Ok(())
    }

    /// Block CIDs of the current head, ascending.
    pub fn head(&self) -> Result<TipsetKey, Error> {
        self.head
            .read()
            .as_ref()
            .map(|head| head.key().clone())
            .ok_or(Error::HeaviestTipsetNotFound)
    }

    pub fn heaviest_tipset(&self) -> Result<Arc<Tipset>, Error> {
        self.head
            .read()
            .clone()
            .ok_or(Error::HeaviestTipsetNotFound)
    }

    /// Records the state root of a tipset, persisting its blocks.
    ///
    /// Putting the same entry twice is a no-op. Putting a different state
    /// root for an indexed tipset fails with [`Error::StateRootMismatch`]
    /// and leaves the stored entry untouched.
    pub fn put_tipset_and_state(&self, entry: &TipsetAndState) -> Result<(), Error> {
        persist_objects(self.db.as_ref(), entry.tipset.blocks())?;

        let key = entry.key();
        let _guard = self.tipset_states_writer.lock();
        match self.db.read_state_root(key)? {
            Some(stored) if stored == entry.state_root => {
                debug!("tipset {key} already indexed");
            }
            Some(stored) => {
                return Err(Error::StateRootMismatch {
                    key: key.clone(),
                    stored,
                    given: entry.state_root,
                });
            }
            None => self.db.write_state_root(key, &entry.state_root)?,
        }
        self.tip_index.write().put(entry.clone());
        Ok(())
    }

    pub fn get_tipset_and_state(&self, key: &TipsetKey) -> Result<TipsetAndState, Error> {
        let state_root = self
            .db
            .read_state_root(key)?
            .ok_or_else(|| Error::TipsetNotFound(key.clone()))?;
        let tipset = self.get_tipset(key)?;
        Ok(TipsetAndState { tipset, state_root })
    }

    /// Loads a tipset from its blocks, whether or not its state is indexed.
    pub fn get_tipset(&self, key: &TipsetKey) -> Result<Arc<Tipset>, Error> {
        Tipset::load(self.db.as_ref(), key)?
            .map(Arc::new)
            .ok_or_else(|| Error::TipsetNotFound(key.clone()))
    }

    pub fn get_block(&self, cid: &Cid) -> anyhow::Result<Option<Block>> {
        Block::load(self.db.as_ref(), cid)
    }

    /// All indexed tipsets with the given parents and height.
    pub fn tipsets_and_states_by_parents_and_height(
        &self,
        parents: &TipsetKey,
        height: ChainEpoch,
    ) -> Vec<TipsetAndState> {
        self.tip_index.read().get(parents, height).to_vec()
    }

    pub fn has_tipsets_and_states_with_parents_and_height(
        &self,
        parents: &TipsetKey,
        height: ChainEpoch,
    ) -> bool {
        self.tip_index.read().has(parents, height)
    }

    /// Records the genesis block CID. Setting the same genesis again is a
    /// no-op; setting a different one fails.
    pub fn set_genesis(&self, cid: Cid) -> Result<(), Error> {
        let _guard = self.head_writer.lock();
        match self.db.read_obj::<Cid>(GENESIS_KEY)? {
            Some(stored) if stored == cid => Ok(()),
            Some(stored) => Err(Error::GenesisMismatch { stored, given: cid }),
            None => {
                self.db.write_obj(GENESIS_KEY, &cid)?;
                Ok(())
            }
        }
    }

    /// CID of the recorded genesis block.
    pub fn genesis_cid(&self) -> Result<Option<Cid>, Error> {
        Ok(self.db.read_obj::<Cid>(GENESIS_KEY)?)
    }

    /// Returns the genesis block, if one has been recorded.
    pub fn genesis(&self) -> Result<Option<Block>, Error> {
        let Some(cid) = self.genesis_cid()? else {
            return Ok(None);
        };
        Ok(Some(
            Block::load(self.db.as_ref(), &cid)?
                .ok_or_else(|| Error::Other(format!("genesis block {cid} not found")))?,
        ))
    }

    /// Walks back from the current head to genesis, fetching from the local
    /// blockstore.
    pub fn ls(&self) -> Result<TipsetStream, Error> {
        Ok(self.ls_from(self.heaviest_tipset()?, None))
    }

    /// Walks back from `start` to genesis, fetching from the local
    /// blockstore. Each fetch is bounded by `timeout`, or by
    /// [`ChainStoreConfig::fetch_timeout`] when `None`.
    pub fn ls_from(&self, start: Arc<Tipset>, timeout: Option<Duration>) -> TipsetStream {
        traverse(
            start,
            BlockstoreFetcher::new(Arc::clone(&self.db)),
            timeout.unwrap_or(self.config.fetch_timeout),
        )
    }

    /// Returns a reference to the publisher of head changes.
    pub fn publisher(&self) -> &Publisher<HeadChange> {
        &self.publisher
    }

    pub fn blockstore(&self) -> &Arc<DB> {
        &self.db
    }

    pub fn config(&self) -> &ChainStoreConfig {
        &self.config
    }
}

/// Persists slice of serializable objects to `blockstore`.
pub fn persist_objects<'a>(
    db: &impl Blockstore,
    blocks: impl IntoIterator<Item = &'a Block>,
) -> anyhow::Result<()> {
    let encoded = blocks
        .into_iter()
        .map(Block::car_block)
        .collect::<anyhow::Result<Vec<_>>>()?;
    db.put_many_keyed(encoded)
}
