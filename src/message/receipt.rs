// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_encoding::RawBytes;
use fvm_ipld_encoding::tuple::*;

/// Result of a state transition from a message
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct MessageReceipt {
    /// `0` is success, anything else is an actor-defined failure.
    pub exit_code: u8,
    pub return_values: Vec<RawBytes>,
    pub gas_used: u64,
}

impl MessageReceipt {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbor_round_trip_is_byte_exact() {
        let receipt = MessageReceipt {
            exit_code: 123,
            return_values: vec![RawBytes::new(vec![1, 2, 3]), RawBytes::new(vec![])],
            gas_used: 42,
        };
        let bytes = fvm_ipld_encoding::to_vec(&receipt).unwrap();
        let decoded: MessageReceipt = fvm_ipld_encoding::from_slice(&bytes).unwrap();
        assert_eq!(decoded.exit_code, 123);
        assert_eq!(decoded.return_values[0].bytes(), &[1, 2, 3]);
        assert!(decoded.return_values[1].bytes().is_empty());
        assert_eq!(decoded, receipt);
        assert!(!decoded.is_success());
    }
}
