// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use fvm_ipld_encoding::CborStore as _;
use serde::{Serialize, de::DeserializeOwned};

use crate::utils::cid::car_block;

/// Extension methods for storing and loading CBOR objects through any
/// [`Blockstore`], keyed by their default (`DAG_CBOR`, BLAKE2b-256) CID.
pub trait CborStoreExt: Blockstore + Sized {
    /// Encodes `obj` and stores it under its default CID.
    fn put_cbor_default<S: Serialize>(&self, obj: &S) -> anyhow::Result<Cid> {
        let (cid, data) = car_block(obj)?;
        self.put_keyed(&cid, &data)?;
        Ok(cid)
    }

    /// Same as [`fvm_ipld_encoding::CborStore::get_cbor`], but a missing key
    /// is an error.
    fn get_cbor_required<T: DeserializeOwned>(&self, cid: &Cid) -> anyhow::Result<T> {
        self.get_cbor(cid)?
            .with_context(|| format!("object {cid} not found in blockstore"))
    }
}

impl<T: Blockstore> CborStoreExt for T {}
