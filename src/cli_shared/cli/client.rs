// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Network used when none is configured.
pub const DEFAULT_NETWORK_NAME: &str = "localnet";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Client {
    /// Root of all chain data. Each network gets its own sub-directory.
    pub data_dir: PathBuf,
    /// Recorded in the genesis state by `init`.
    pub network_name: String,
}

impl Default for Client {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("com", "ChainSafe", "ForestChain")
            .map(|dir| dir.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".forest-chain"));
        Self {
            data_dir,
            network_name: DEFAULT_NETWORK_NAME.into(),
        }
    }
}
