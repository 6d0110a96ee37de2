// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use fvm_shared4::address::Address;

#[derive(Serialize, Deserialize)]
pub struct AddressLotusJson(#[serde(with = "stringify")] Address);

impl HasLotusJson for Address {
    type LotusJson = AddressLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![(json!("f00"), Address::new_id(0))]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        AddressLotusJson(self)
    }

    fn from_lotus_json(AddressLotusJson(address): Self::LotusJson) -> Self {
        address
    }
}
