// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod cli;
pub mod logger;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;

use crate::chain::ChainStore;
use crate::cli_shared::cli::{Config, ConfigPath, find_config_path};
use crate::db::db_engine::{Db, db_root, open_db};

/// Gets chain data directory
pub fn chain_path(config: &Config) -> PathBuf {
    config.client.data_dir.join(&config.client.network_name)
}

pub fn read_config(config_path_opt: Option<&PathBuf>) -> anyhow::Result<(Option<ConfigPath>, Config)> {
    let (path, config) = match find_config_path(config_path_opt) {
        Some(path) => {
            let toml = std::fs::read_to_string(path.to_path_buf())
                .with_context(|| format!("failed to read {}", path.to_path_buf().display()))?;
            let config = toml::from_str(&toml)
                .with_context(|| format!("invalid configuration {}", path.to_path_buf().display()))?;
            (Some(path), config)
        }
        None => (None, Config::default()),
    };
    Ok((path, config))
}

/// Opens the database under [`chain_path`], creating it if needed, and the
/// chain store over it.
pub fn open_chain_store(config: &Config) -> anyhow::Result<ChainStore<Db>> {
    let path = db_root(&chain_path(config));
    std::fs::create_dir_all(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let db = open_db(&path, config.db_config())?;
    Ok(ChainStore::new(Arc::new(db), config.chain_store.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_shared::cli::Client;

    #[test]
    fn cli_path_wins() {
        let path = PathBuf::from("forest-chain.toml");
        assert_eq!(find_config_path(Some(&path)), Some(ConfigPath::Cli(path)));
    }

    #[test]
    fn read_config_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let default_config = Config {
            client: Client {
                data_dir: dir.path().to_path_buf(),
                network_name: "testnet".into(),
            },
            ..Default::default()
        };
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml::to_string(&default_config).unwrap()).unwrap();

        let (config_path, config) = read_config(Some(&path)).unwrap();

        assert_eq!(config_path.unwrap(), ConfigPath::Cli(path));
        assert_eq!(config, default_config);
        assert_eq!(chain_path(&config), dir.path().join("testnet"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(read_config(Some(&path)).is_err());
    }

    #[test]
    fn open_chain_store_twice_keeps_head() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            client: Client {
                data_dir: dir.path().to_path_buf(),
                ..Default::default()
            },
            ..Default::default()
        };
        let genesis = {
            let cs = open_chain_store(&config).unwrap();
            let genesis =
                crate::genesis::init_genesis(cs.blockstore().as_ref(), &cs, "testnet").unwrap();
            cs.set_head(Arc::new(genesis.clone().into())).unwrap();
            genesis
        };
        let cs = open_chain_store(&config).unwrap();
        assert_eq!(cs.head().unwrap().cids(), &[genesis.cid()]);
    }
}
