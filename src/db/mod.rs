// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod memory;
pub mod parity_db;
pub mod parity_db_config;

pub use memory::MemoryDB;
pub use parity_db::ParityDb;

use cid::Cid;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::blocks::TipsetKey;

pub mod setting_keys {
    /// Key used to store the heaviest tipset in the settings store.
    pub const HEAD_KEY: &str = "head";
    /// Key used to store the genesis block CID in the settings store.
    pub const GENESIS_KEY: &str = "genesis";
}

/// Interface used to store and retrieve settings from the database.
/// To store IPLD blocks, use the `BlockStore` trait.
pub trait SettingsStore {
    /// Reads binary field from the Settings store. This should be used for
    /// non-serializable data. For serializable data, use [`SettingsStoreExt::read_obj`].
    fn read_bin(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Writes binary field to the Settings store. This should be used for
    /// non-serializable data. For serializable data, use [`SettingsStoreExt::write_obj`].
    fn write_bin(&self, key: &str, value: &[u8]) -> anyhow::Result<()>;

    /// Returns `Ok(true)` if key exists in store.
    fn exists(&self, key: &str) -> anyhow::Result<bool>;

    /// Returns all setting keys.
    fn setting_keys(&self) -> anyhow::Result<Vec<String>>;
}

/// Reads and writes any serializable object in a [`SettingsStore`], encoded
/// as DAG-CBOR.
pub trait SettingsStoreExt {
    fn read_obj<V: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<V>>;
    fn write_obj<V: Serialize>(&self, key: &str, value: &V) -> anyhow::Result<()>;

    /// Same as [`SettingsStoreExt::read_obj`], but returns an error if the key does not exist.
    fn require_obj<V: DeserializeOwned>(&self, key: &str) -> anyhow::Result<V>;
}

impl<T: ?Sized + SettingsStore> SettingsStoreExt for T {
    fn read_obj<V: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<V>> {
        match self.read_bin(key)? {
            Some(bytes) => Ok(Some(fvm_ipld_encoding::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_obj<V: Serialize>(&self, key: &str, value: &V) -> anyhow::Result<()> {
        self.write_bin(key, &fvm_ipld_encoding::to_vec(value)?)
    }

    fn require_obj<V: DeserializeOwned>(&self, key: &str) -> anyhow::Result<V> {
        self.read_bin(key)?
            .ok_or_else(|| anyhow::anyhow!("Key {key} not found"))
            .and_then(|bytes| fvm_ipld_encoding::from_slice(&bytes).map_err(Into::into))
    }
}

/// Index from a tipset key to the state root produced by executing that
/// tipset. Entries are never removed.
pub trait TipsetStateStore {
    fn read_bin(&self, key: &TipsetKey) -> anyhow::Result<Option<Vec<u8>>>;

    fn write_bin(&self, key: &TipsetKey, value: &[u8]) -> anyhow::Result<()>;

    fn exists(&self, key: &TipsetKey) -> anyhow::Result<bool>;

    /// Returns every indexed tipset key.
    fn tipset_keys(&self) -> anyhow::Result<Vec<TipsetKey>>;
}

pub trait TipsetStateStoreExt {
    fn read_state_root(&self, key: &TipsetKey) -> anyhow::Result<Option<Cid>>;
    fn write_state_root(&self, key: &TipsetKey, state_root: &Cid) -> anyhow::Result<()>;
}

impl<T: ?Sized + TipsetStateStore> TipsetStateStoreExt for T {
    fn read_state_root(&self, key: &TipsetKey) -> anyhow::Result<Option<Cid>> {
        match self.read_bin(key)? {
            Some(bytes) => Ok(Some(fvm_ipld_encoding::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_state_root(&self, key: &TipsetKey, state_root: &Cid) -> anyhow::Result<()> {
        self.write_bin(key, &fvm_ipld_encoding::to_vec(state_root)?)
    }
}

pub mod db_engine {
    use std::path::{Path, PathBuf};

    pub type Db = crate::db::parity_db::ParityDb;
    pub type DbConfig = crate::db::parity_db_config::ParityDbConfig;
    const DIR_NAME: &str = "paritydb";

    pub fn db_root(chain_data_root: &Path) -> PathBuf {
        chain_data_root.join(DIR_NAME)
    }

    pub fn open_db(path: &Path, config: &DbConfig) -> anyhow::Result<Db> {
        Db::open(path, config)
    }
}
