// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod sorted_cid_set;

pub use sorted_cid_set::SortedCidSet;
