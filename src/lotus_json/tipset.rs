// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::blocks::{Block, Tipset};

/// A tipset is printed as its blocks, in key order. Parsing re-validates the
/// blocks as a tipset.
pub struct TipsetLotusJson(Tipset);

impl Serialize for TipsetLotusJson {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.blocks().iter().cloned().map(LotusJson))
    }
}

impl<'de> Deserialize<'de> for TipsetLotusJson {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let blocks = Vec::<LotusJson<Block>>::deserialize(deserializer)?;
        Tipset::new(blocks.into_iter().map(LotusJson::into_inner))
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

impl HasLotusJson for Tipset {
    type LotusJson = TipsetLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![(
            json!([{
                "Miner": "f00",
                "Ticket": "",
                "Parents": null,
                "ParentWeight": 0,
                "Height": 0,
                "StateRoot": {"/": "baeaaaaa"},
                "Messages": null,
                "Receipts": null,
                "Timestamp": 0,
                "Nonce": 0,
            }]),
            Tipset::from(Block::default()),
        )]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        TipsetLotusJson(self)
    }

    fn from_lotus_json(TipsetLotusJson(tipset): Self::LotusJson) -> Self {
        tipset
    }
}
