// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use fvm_ipld_encoding::tuple::*;
use fvm_ipld_encoding::{CborStore as _, RawBytes};
use fvm_shared4::address::Address;

use super::{ChainEpoch, TipsetKey};
use crate::message::{MessageReceipt, SignedMessage};
use crate::utils::cid::{CidCborExt as _, car_block};
use crate::utils::db::CborStoreExt as _;

/// A block of the chain, including its messages and their execution
/// receipts. Every field takes part in the block's CID.
///
/// ```text
/// parents ──► [parent block CIDs, ascending]   (empty for genesis)
/// height  ──► height(parent) + 1                (0 for genesis)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Block {
    pub miner: Address,
    pub ticket: RawBytes,
    pub parents: TipsetKey,
    pub parent_weight: u64,
    pub height: ChainEpoch,
    pub state_root: Cid,
    pub messages: Vec<SignedMessage>,
    pub receipts: Vec<MessageReceipt>,
    pub timestamp: u64,
    pub nonce: u64,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            miner: Address::new_id(0),
            ticket: RawBytes::default(),
            parents: TipsetKey::default(),
            parent_weight: 0,
            height: 0,
            state_root: Cid::default(),
            messages: vec![],
            receipts: vec![],
            timestamp: 0,
            nonce: 0,
        }
    }
}

impl Block {
    /// Content identifier of this block.
    pub fn cid(&self) -> Cid {
        Cid::from_cbor_blake2b256(self).expect("CBOR serialization failed")
    }

    /// CID and encoded bytes, as stored in the blockstore.
    pub fn car_block(&self) -> anyhow::Result<(Cid, Vec<u8>)> {
        car_block(self)
    }

    pub fn parents(&self) -> &TipsetKey {
        &self.parents
    }

    pub fn height(&self) -> ChainEpoch {
        self.height
    }

    pub fn state_root(&self) -> &Cid {
        &self.state_root
    }

    pub fn is_genesis(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn load(db: &impl Blockstore, cid: &Cid) -> anyhow::Result<Option<Block>> {
        db.get_cbor(cid)
    }

    /// Writes the block to `db`, keyed by its CID.
    pub fn persist(&self, db: &impl Blockstore) -> anyhow::Result<Cid> {
        db.put_cbor_default(self)
    }
}
