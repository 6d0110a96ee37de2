// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::message::MessageReceipt;
use fvm_ipld_encoding::RawBytes;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptLotusJson {
    exit_code: u8,
    r#return: LotusJson<Vec<RawBytes>>,
    gas_used: u64,
}

impl HasLotusJson for MessageReceipt {
    type LotusJson = ReceiptLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (
                json!({
                    "ExitCode": 123,
                    "Return": ["AQID", "aGVsbG8gd29ybGQh"],
                    "GasUsed": 9,
                }),
                MessageReceipt {
                    exit_code: 123,
                    return_values: vec![
                        RawBytes::new(vec![1, 2, 3]),
                        RawBytes::new(Vec::from_iter(*b"hello world!")),
                    ],
                    gas_used: 9,
                },
            ),
            (
                json!({"ExitCode": 0, "Return": null, "GasUsed": 0}),
                MessageReceipt::default(),
            ),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let MessageReceipt {
            exit_code,
            return_values,
            gas_used,
        } = self;
        ReceiptLotusJson {
            exit_code,
            r#return: return_values.into(),
            gas_used,
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let ReceiptLotusJson {
            exit_code,
            r#return,
            gas_used,
        } = lotus_json;
        MessageReceipt {
            exit_code,
            return_values: r#return.into_inner(),
            gas_used,
        }
    }
}

#[test]
fn empty_return_value_survives() {
    assert_unchanged_via_json(MessageReceipt {
        exit_code: 1,
        return_values: vec![RawBytes::default(), RawBytes::new(vec![0])],
        gas_used: 0,
    });
}
