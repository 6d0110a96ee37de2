// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use fvm_shared4::crypto::signature::{Signature, SignatureType};

/// `Type` is the numeric signature type: `1` for secp256k1, `2` for BLS.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignatureLotusJson {
    r#type: SignatureType,
    data: LotusJson<Vec<u8>>,
}

impl HasLotusJson for Signature {
    type LotusJson = SignatureLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (
                json!({"Type": 2, "Data": "aGVsbG8gd29ybGQh"}),
                Signature::new_bls(Vec::from_iter(*b"hello world!")),
            ),
            (
                json!({"Type": 1, "Data": "AQI="}),
                Signature::new_secp256k1(vec![1, 2]),
            ),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let Signature { sig_type, bytes } = self;
        SignatureLotusJson {
            r#type: sig_type,
            data: bytes.into(),
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let SignatureLotusJson { r#type, data } = lotus_json;
        Signature {
            sig_type: r#type,
            bytes: data.into_inner(),
        }
    }
}
