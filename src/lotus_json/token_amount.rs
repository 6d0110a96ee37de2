// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use fvm_shared4::bigint::BigInt;
use fvm_shared4::econ::TokenAmount;

/// Amounts are printed in attoFIL, as a decimal string.
#[derive(Serialize, Deserialize)]
pub struct TokenAmountLotusJson(#[serde(with = "stringify")] BigInt);

impl HasLotusJson for TokenAmount {
    type LotusJson = TokenAmountLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (json!("1"), TokenAmount::from_atto(1)),
            (
                json!("1000000000000000000"),
                TokenAmount::from_whole(1),
            ),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        TokenAmountLotusJson(self.atto().clone())
    }

    fn from_lotus_json(TokenAmountLotusJson(atto): Self::LotusJson) -> Self {
        TokenAmount::from_atto(atto)
    }
}
