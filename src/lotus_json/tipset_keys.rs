// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::blocks::TipsetKey;
use ::cid::Cid;

impl HasLotusJson for TipsetKey {
    type LotusJson = <Vec<Cid> as HasLotusJson>::LotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (json!([{"/": "baeaaaaa"}]), TipsetKey::from(Cid::default())),
            (json!(null), TipsetKey::default()),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        self.into_cids().into_lotus_json()
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        Vec::<Cid>::from_lotus_json(lotus_json).into()
    }
}
