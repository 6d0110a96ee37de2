// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{SettingsStore, TipsetStateStore};
use crate::blocks::TipsetKey;
use ahash::HashMap;
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use itertools::Itertools;
use parking_lot::RwLock;

/// In-memory store, lost on drop. Used in tests and for throwaway chains.
#[derive(Debug, Default)]
pub struct MemoryDB {
    blockchain_db: RwLock<HashMap<Cid, Vec<u8>>>,
    settings_db: RwLock<HashMap<String, Vec<u8>>>,
    tipset_states_db: RwLock<HashMap<TipsetKey, Vec<u8>>>,
}

impl SettingsStore for MemoryDB {
    fn read_bin(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.settings_db.read().get(key).cloned())
    }

    fn write_bin(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.settings_db
            .write()
            .insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn exists(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.settings_db.read().contains_key(key))
    }

    fn setting_keys(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.settings_db.read().keys().cloned().collect_vec())
    }
}

impl TipsetStateStore for MemoryDB {
    fn read_bin(&self, key: &TipsetKey) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.tipset_states_db.read().get(key).cloned())
    }

    fn write_bin(&self, key: &TipsetKey, value: &[u8]) -> anyhow::Result<()> {
        self.tipset_states_db
            .write()
            .insert(key.clone(), value.to_vec());
        Ok(())
    }

    fn exists(&self, key: &TipsetKey) -> anyhow::Result<bool> {
        Ok(self.tipset_states_db.read().contains_key(key))
    }

    fn tipset_keys(&self) -> anyhow::Result<Vec<TipsetKey>> {
        Ok(self.tipset_states_db.read().keys().cloned().collect_vec())
    }
}

impl Blockstore for MemoryDB {
    fn get(&self, k: &Cid) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.blockchain_db.read().get(k).cloned())
    }

    fn put_keyed(&self, k: &Cid, block: &[u8]) -> anyhow::Result<()> {
        self.blockchain_db.write().insert(*k, block.to_vec());
        Ok(())
    }

    fn has(&self, k: &Cid) -> anyhow::Result<bool> {
        Ok(self.blockchain_db.read().contains_key(k))
    }
}
