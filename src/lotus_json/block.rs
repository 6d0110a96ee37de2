// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::blocks::{Block, ChainEpoch, TipsetKey};
use crate::message::{MessageReceipt, SignedMessage};
use ::cid::Cid;
use fvm_ipld_encoding::RawBytes;
use fvm_shared4::address::Address;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockLotusJson {
    miner: LotusJson<Address>,
    ticket: LotusJson<RawBytes>,
    parents: LotusJson<TipsetKey>,
    parent_weight: u64,
    height: ChainEpoch,
    state_root: LotusJson<Cid>,
    messages: LotusJson<Vec<SignedMessage>>,
    receipts: LotusJson<Vec<MessageReceipt>>,
    timestamp: u64,
    nonce: u64,
}

impl HasLotusJson for Block {
    type LotusJson = BlockLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![(
            json!({
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
            }),
            Block::default(),
        )]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let Block {
            miner,
            ticket,
            parents,
            parent_weight,
            height,
            state_root,
            messages,
            receipts,
            timestamp,
            nonce,
        } = self;
        BlockLotusJson {
            miner: miner.into(),
            ticket: ticket.into(),
            parents: parents.into(),
            parent_weight,
            height,
            state_root: state_root.into(),
            messages: messages.into(),
            receipts: receipts.into(),
            timestamp,
            nonce,
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let BlockLotusJson {
            miner,
            ticket,
            parents,
            parent_weight,
            height,
            state_root,
            messages,
            receipts,
            timestamp,
            nonce,
        } = lotus_json;
        Block {
            miner: miner.into_inner(),
            ticket: ticket.into_inner(),
            parents: parents.into_inner(),
            parent_weight,
            height,
            state_root: state_root.into_inner(),
            messages: messages.into_inner(),
            receipts: receipts.into_inner(),
            timestamp,
            nonce,
        }
    }
}
