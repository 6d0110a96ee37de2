// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::message::Message;
use fvm_ipld_encoding::RawBytes;
use fvm_shared4::address::Address;
use fvm_shared4::econ::TokenAmount;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageLotusJson {
    to: LotusJson<Address>,
    from: LotusJson<Address>,
    nonce: u64,
    value: LotusJson<TokenAmount>,
    method: u64,
    #[serde(default)]
    params: LotusJson<Option<RawBytes>>,
}

impl HasLotusJson for Message {
    type LotusJson = MessageLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (
                json!({
                    "To": "f02",
                    "From": "f01",
                    "Nonce": 7,
                    "Value": "10",
                    "Method": 0,
                    "Params": null,
                }),
                Message::transfer(
                    Address::new_id(1),
                    Address::new_id(2),
                    7,
                    TokenAmount::from_atto(10),
                ),
            ),
            (
                json!({
                    "To": "f0100",
                    "From": "f0101",
                    "Nonce": 0,
                    "Value": "0",
                    "Method": 2,
                    "Params": "AQID",
                }),
                Message {
                    to: Address::new_id(100),
                    from: Address::new_id(101),
                    sequence: 0,
                    value: TokenAmount::from_atto(0),
                    method_num: 2,
                    params: RawBytes::new(vec![1, 2, 3]),
                },
            ),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let Message {
            to,
            from,
            sequence,
            value,
            method_num,
            params,
        } = self;
        MessageLotusJson {
            to: to.into(),
            from: from.into(),
            nonce: sequence,
            value: value.into(),
            method: method_num,
            params: match params.bytes().is_empty() {
                true => None,
                false => Some(params),
            }
            .into(),
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let MessageLotusJson {
            to,
            from,
            nonce,
            value,
            method,
            params,
        } = lotus_json;
        Message {
            to: to.into_inner(),
            from: from.into_inner(),
            sequence: nonce,
            value: value.into_inner(),
            method_num: method,
            params: params.into_inner().unwrap_or_default(),
        }
    }
}
