// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use parity_db::CompressionType;
use serde::{Deserialize, Serialize};

/// `ParityDb` tuning, read from the `[chain_store.db]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityDbConfig {
    pub enable_statistics: bool,
    /// One of `none`, `lz4` or `snappy`.
    pub compression_type: String,
}

impl Default for ParityDbConfig {
    fn default() -> Self {
        Self {
            enable_statistics: false,
            compression_type: "lz4".into(),
        }
    }
}

impl ParityDbConfig {
    pub fn compression(&self) -> anyhow::Result<CompressionType> {
        match self.compression_type.to_lowercase().as_str() {
            "none" => Ok(CompressionType::NoCompression),
            "lz4" => Ok(CompressionType::Lz4),
            "snappy" => Ok(CompressionType::Snappy),
            other => anyhow::bail!("unsupported compression type: {other}"),
        }
    }
}
