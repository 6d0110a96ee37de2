// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use fvm_ipld_encoding::RawBytes;
use fvm_shared4::address::Address;
use fvm_shared4::crypto::signature::Signature;
use fvm_shared4::econ::TokenAmount;

use crate::blocks::{Block, Tipset, TipsetKey};
use crate::message::{Message, MessageReceipt, SignedMessage};
use crate::utils::cid::CidCborExt as _;

/// A deterministic fake state root.
pub fn state_root_for_test(n: u64) -> Cid {
    Cid::from_cbor_blake2b256(&("state", n)).unwrap()
}

/// A block on top of `parent` (or a genesis block when `None`). Blocks that
/// share a parent and differ in `nonce` are distinct siblings.
pub fn new_block_for_test(parent: Option<&Tipset>, nonce: u64) -> Block {
    let (parents, height) = match parent {
        Some(parent) => (parent.key().clone(), parent.height() + 1),
        None => (TipsetKey::default(), 0),
    };
    Block {
        miner: Address::new_id(1000 + nonce),
        parents,
        height,
        state_root: state_root_for_test(nonce),
        nonce,
        timestamp: nonce,
        ..Default::default()
    }
}

/// A linear chain `genesis, h1, .., h{len}`, one block per tipset.
pub fn linear_chain_for_test(len: usize) -> Vec<Tipset> {
    let mut chain = vec![Tipset::from(new_block_for_test(None, 0))];
    for n in 1..=len {
        let parent = chain.last().unwrap();
        chain.push(Tipset::from(new_block_for_test(Some(parent), n as u64)));
    }
    chain
}

/// A signed transfer with a dummy signature, and a receipt for it.
pub fn message_and_receipt_for_test(
    from: u64,
    to: u64,
    exit_code: u8,
    ret: &[u8],
) -> (SignedMessage, MessageReceipt) {
    let message = Message::transfer(
        Address::new_id(from),
        Address::new_id(to),
        0,
        TokenAmount::from_atto(1),
    );
    (
        SignedMessage::new_unchecked(message, Signature::new_secp256k1(vec![7; 65])),
        MessageReceipt {
            exit_code,
            return_values: vec![RawBytes::new(ret.to_vec())],
            gas_used: 0,
        },
    )
}
