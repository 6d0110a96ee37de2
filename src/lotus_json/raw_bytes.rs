// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use fvm_ipld_encoding::RawBytes;

impl HasLotusJson for RawBytes {
    type LotusJson = <Vec<u8> as HasLotusJson>::LotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![(
            json!("aGVsbG8gd29ybGQh"),
            RawBytes::new(Vec::from_iter(*b"hello world!")),
        )]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        self.bytes().to_vec().into_lotus_json()
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        RawBytes::new(Vec::<u8>::from_lotus_json(lotus_json))
    }
}
