// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod receipt;

pub use receipt::MessageReceipt;

use fvm_ipld_encoding::RawBytes;
use fvm_ipld_encoding::tuple::*;
use fvm_shared4::address::Address;
use fvm_shared4::crypto::signature::Signature;
use fvm_shared4::econ::TokenAmount;

/// Method number of a plain value transfer.
pub const METHOD_SEND: u64 = 0;

/// An unsigned message, as included in a block.
///
/// The store never executes messages; it only needs them to be addressable
/// and presentable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Message {
    pub to: Address,
    pub from: Address,
    pub sequence: u64,
    pub value: TokenAmount,
    pub method_num: u64,
    pub params: RawBytes,
}

impl Message {
    /// A value transfer from `from` to `to`.
    pub fn transfer(from: Address, to: Address, sequence: u64, value: TokenAmount) -> Self {
        Self {
            to,
            from,
            sequence,
            value,
            method_num: METHOD_SEND,
            params: RawBytes::default(),
        }
    }
}

/// Represents a wrapped message with signature bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct SignedMessage {
    pub message: Message,
    pub signature: Signature,
}

impl SignedMessage {
    /// Wraps a message and its signature. The signature is not verified.
    pub fn new_unchecked(message: Message, signature: Signature) -> Self {
        Self { message, signature }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn from(&self) -> Address {
        self.message.from
    }

    pub fn to(&self) -> Address {
        self.message.to
    }
}
