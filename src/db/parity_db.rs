// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use super::{SettingsStore, TipsetStateStore};
use crate::blocks::TipsetKey;
use crate::db::parity_db_config::ParityDbConfig;

use anyhow::{Context as _, anyhow};
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use fvm_ipld_encoding::DAG_CBOR;
use multihash_codetable::Code::Blake2b256;
use parity_db::{CompressionType, Db, Operation, Options};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};
use tracing::{debug, warn};

/// Determines which column an entry type is stored in.
#[derive(Copy, Clone, Debug, Display, PartialEq, FromRepr, EnumIter)]
#[repr(u8)]
enum DbColumn {
    /// IPLD data with `Blake2b256` hash and `DAG_CBOR` codec. Blocks and
    /// state objects all land here.
    GraphDagCborBlake2b256,
    /// Other IPLD data (different codec or hash function).
    GraphFull,
    /// Head pointer, genesis and other named settings.
    Settings,
    /// Tipset key to state root index.
    TipsetStates,
}

impl DbColumn {
    fn create_column_options(compression: CompressionType) -> Vec<parity_db::ColumnOptions> {
        DbColumn::iter()
            .map(|col| match col {
                DbColumn::GraphDagCborBlake2b256 => parity_db::ColumnOptions {
                    preimage: true,
                    compression,
                    ..Default::default()
                },
                DbColumn::GraphFull => parity_db::ColumnOptions {
                    preimage: true,
                    btree_index: true,
                    compression,
                    ..Default::default()
                },
                // no preimage: entries are overwritten in place
                DbColumn::Settings | DbColumn::TipsetStates => parity_db::ColumnOptions {
                    preimage: false,
                    btree_index: true,
                    compression,
                    ..Default::default()
                },
            })
            .collect()
    }
}

pub struct ParityDb {
    db: parity_db::Db,
    statistics_enabled: bool,
}

impl ParityDb {
    fn to_options(path: &Path, config: &ParityDbConfig) -> anyhow::Result<Options> {
        let mut options = Options::with_columns(path, DbColumn::iter().count() as u8);
        options.sync_wal = true;
        options.sync_data = true;
        options.stats = config.enable_statistics;
        options.columns = DbColumn::create_column_options(config.compression()?);
        Ok(options)
    }

    pub fn open(path: impl AsRef<Path>, config: &ParityDbConfig) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let opts = Self::to_options(path, config)?;
        debug!("opening ParityDb at {}", path.display());
        Ok(Self {
            db: Db::open_or_create(&opts)
                .with_context(|| format!("failed to open ParityDb at {}", path.display()))?,
            statistics_enabled: opts.stats,
        })
    }

    /// Returns an appropriate column variant based on the information
    /// in the Cid.
    fn choose_column(cid: &Cid) -> DbColumn {
        match cid.codec() {
            DAG_CBOR if cid.hash().code() == u64::from(Blake2b256) => {
                DbColumn::GraphDagCborBlake2b256
            }
            _ => DbColumn::GraphFull,
        }
    }

    fn read_from_column<K>(&self, key: K, column: DbColumn) -> anyhow::Result<Option<Vec<u8>>>
    where
        K: AsRef<[u8]>,
    {
        self.db
            .get(column as u8, key.as_ref())
            .map_err(|e| anyhow!("error from column {column}: {e}"))
    }

    fn write_to_column<K, V>(&self, key: K, value: V, column: DbColumn) -> anyhow::Result<()>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let tx = [(column as u8, key.as_ref(), Some(value.as_ref().to_vec()))];
        self.db
            .commit(tx)
            .map_err(|e| anyhow!("error writing to column {column}: {e}"))
    }

    fn exists_in_column<K: AsRef<[u8]>>(&self, key: K, column: DbColumn) -> anyhow::Result<bool> {
        self.db
            .get_size(column as u8, key.as_ref())
            .map(|size| size.is_some())
            .with_context(|| format!("error checking if key exists in column {column}"))
    }

    fn column_keys(&self, column: DbColumn) -> anyhow::Result<Vec<Vec<u8>>> {
        let mut iter = self.db.iter(column as u8)?;
        let mut keys = vec![];
        while let Some((key, _)) = iter.next()? {
            keys.push(key);
        }
        Ok(keys)
    }

    /// Human readable database statistics, if enabled in the config.
    pub fn statistics(&self) -> Option<String> {
        if !self.statistics_enabled {
            return None;
        }

        let mut buf = Vec::new();
        if let Err(err) = self.db.write_stats_text(&mut buf, None) {
            warn!("Unable to write database statistics: {err}");
            return None;
        }

        match String::from_utf8(buf) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Malformed statistics: {e}");
                None
            }
        }
    }
}

impl SettingsStore for ParityDb {
    fn read_bin(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.read_from_column(key.as_bytes(), DbColumn::Settings)
    }

    fn write_bin(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.write_to_column(key.as_bytes(), value, DbColumn::Settings)
    }

    fn exists(&self, key: &str) -> anyhow::Result<bool> {
        self.exists_in_column(key.as_bytes(), DbColumn::Settings)
    }

    fn setting_keys(&self) -> anyhow::Result<Vec<String>> {
        self.column_keys(DbColumn::Settings)?
            .into_iter()
            .map(|key| String::from_utf8(key).map_err(Into::into))
            .collect()
    }
}

impl TipsetStateStore for ParityDb {
    fn read_bin(&self, key: &TipsetKey) -> anyhow::Result<Option<Vec<u8>>> {
        self.read_from_column(fvm_ipld_encoding::to_vec(key)?, DbColumn::TipsetStates)
    }

    fn write_bin(&self, key: &TipsetKey, value: &[u8]) -> anyhow::Result<()> {
        self.write_to_column(fvm_ipld_encoding::to_vec(key)?, value, DbColumn::TipsetStates)
    }

    fn exists(&self, key: &TipsetKey) -> anyhow::Result<bool> {
        self.exists_in_column(fvm_ipld_encoding::to_vec(key)?, DbColumn::TipsetStates)
    }

    fn tipset_keys(&self) -> anyhow::Result<Vec<TipsetKey>> {
        self.column_keys(DbColumn::TipsetStates)?
            .iter()
            .map(|key| fvm_ipld_encoding::from_slice(key).map_err(Into::into))
            .collect()
    }
}

impl Blockstore for ParityDb {
    fn get(&self, k: &Cid) -> anyhow::Result<Option<Vec<u8>>> {
        self.read_from_column(k.to_bytes(), Self::choose_column(k))
    }

    fn put_keyed(&self, k: &Cid, block: &[u8]) -> anyhow::Result<()> {
        self.write_to_column(k.to_bytes(), block, Self::choose_column(k))
    }

    fn put_many_keyed<D, I>(&self, blocks: I) -> anyhow::Result<()>
    where
        Self: Sized,
        D: AsRef<[u8]>,
        I: IntoIterator<Item = (Cid, D)>,
    {
        let tx = blocks.into_iter().map(|(k, v)| {
            let column = Self::choose_column(&k);
            (column as u8, Operation::Set(k.to_bytes(), v.as_ref().to_vec()))
        });
        self.db
            .commit_changes(tx)
            .map_err(|e| anyhow!("error bulk writing: {e}"))
    }
}

#[cfg(test)]
mod test {
    use fvm_ipld_encoding::IPLD_RAW;
    use multihash_codetable::{Code::Sha2_256, MultihashDigest as _};

    use super::*;
    use crate::db::SettingsStoreExt as _;
    use crate::db::setting_keys::HEAD_KEY;
    use crate::db::tests::{settings_round_trip, tipset_states_round_trip};

    fn temp_db() -> (tempfile::TempDir, ParityDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = ParityDb::open(dir.path().join("paritydb"), &ParityDbConfig::default()).unwrap();
        (dir, db)
    }

    #[test]
    fn write_read_different_columns_test() -> anyhow::Result<()> {
        let (_dir, db) = temp_db();
        let data = [
            b"h'nglui mglw'nafh".to_vec(),
            b"Cthulhu".to_vec(),
            b"R'lyeh wgah'nagl fhtagn!!".to_vec(),
        ];
        let cids = [
            Cid::new_v1(DAG_CBOR, Blake2b256.digest(&data[0])),
            Cid::new_v1(DAG_CBOR, Sha2_256.digest(&data[1])),
            Cid::new_v1(IPLD_RAW, Blake2b256.digest(&data[2])),
        ];

        let cases = [
            (DbColumn::GraphDagCborBlake2b256, cids[0], &data[0]),
            (DbColumn::GraphFull, cids[1], &data[1]),
            (DbColumn::GraphFull, cids[2], &data[2]),
        ];

        for (_, cid, data) in cases {
            db.put_keyed(&cid, data)?;
        }

        for (column, cid, data) in cases {
            let actual = db
                .read_from_column(cid.to_bytes(), column)?
                .expect("data not found");
            assert_eq!(data, &actual);

            let other_column = match column {
                DbColumn::GraphDagCborBlake2b256 => DbColumn::GraphFull,
                _ => DbColumn::GraphDagCborBlake2b256,
            };
            assert!(db.read_from_column(cid.to_bytes(), other_column)?.is_none());

            let actual = Blockstore::get(&db, &cid)?.expect("data not found");
            assert_eq!(data, &actual);
        }
        Ok(())
    }

    #[test]
    fn settings() {
        let (_dir, db) = temp_db();
        settings_round_trip(&db);
    }

    #[test]
    fn tipset_states() {
        let (_dir, db) = temp_db();
        tipset_states_round_trip(&db);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paritydb");
        let key = TipsetKey::from(Cid::new_v1(DAG_CBOR, Blake2b256.digest(b"block")));
        {
            let db = ParityDb::open(&path, &ParityDbConfig::default()).unwrap();
            db.write_obj(HEAD_KEY, &key).unwrap();
        }
        let db = ParityDb::open(&path, &ParityDbConfig::default()).unwrap();
        assert_eq!(db.require_obj::<TipsetKey>(HEAD_KEY).unwrap(), key);
    }

    #[test]
    fn statistics_follow_config() {
        let (_dir, db) = temp_db();
        assert!(db.statistics().is_none());
    }
}
