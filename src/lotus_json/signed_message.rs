// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::message::{Message, SignedMessage};
use fvm_shared4::crypto::signature::Signature;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignedMessageLotusJson {
    message: LotusJson<Message>,
    signature: LotusJson<Signature>,
}

impl HasLotusJson for SignedMessage {
    type LotusJson = SignedMessageLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        use fvm_shared4::address::Address;
        use fvm_shared4::econ::TokenAmount;

        vec![(
            json!({
                "Message": {
                    "To": "f02",
                    "From": "f01",
                    "Nonce": 0,
                    "Value": "1",
                    "Method": 0,
                    "Params": null,
                },
                "Signature": {"Type": 1, "Data": "BwcH"},
            }),
            SignedMessage::new_unchecked(
                Message::transfer(
                    Address::new_id(1),
                    Address::new_id(2),
                    0,
                    TokenAmount::from_atto(1),
                ),
                Signature::new_secp256k1(vec![7; 3]),
            ),
        )]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let SignedMessage { message, signature } = self;
        SignedMessageLotusJson {
            message: message.into(),
            signature: signature.into(),
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let SignedMessageLotusJson { message, signature } = lotus_json;
        SignedMessage::new_unchecked(message.into_inner(), signature.into_inner())
    }
}
