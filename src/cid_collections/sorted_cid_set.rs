// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use cid::Cid;
use itertools::Itertools as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A deduplicated set of [`Cid`]s with a deterministic iteration order.
///
/// Members are always kept sorted ascending by their string form (e.g.
/// `bafy2bzace...`), no matter the order they were inserted in. This is the
/// order every consumer observes: serialization, equality and external
/// presentation all go through the same sorted vector.
///
/// An empty set is valid. It is how the parents of the genesis block are
/// represented.
#[derive(Default, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortedCidSet(Vec<Cid>);

impl SortedCidSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a CID, keeping the set sorted.
    ///
    /// Returns whether the value was newly inserted.
    pub fn insert(&mut self, cid: Cid) -> bool {
        let key = cid.to_string();
        match self.0.binary_search_by(|probe| probe.to_string().cmp(&key)) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, cid);
                true
            }
        }
    }

    /// Returns a set with `cid` added. Adding a CID that is already present
    /// returns an identical set.
    pub fn with(mut self, cid: Cid) -> Self {
        self.insert(cid);
        self
    }

    /// Returns `true` if the set contains `cid`.
    pub fn contains(&self, cid: &Cid) -> bool {
        self.0.contains(cid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in ascending order.
    pub fn cids(&self) -> &[Cid] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cid> {
        self.0.iter()
    }

    /// Consumes the set, returning its members in ascending order.
    pub fn into_cids(self) -> Vec<Cid> {
        self.0
    }
}

impl fmt::Display for SortedCidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

impl FromIterator<Cid> for SortedCidSet {
    fn from_iter<T: IntoIterator<Item = Cid>>(iter: T) -> Self {
        let mut cids = iter.into_iter().collect_vec();
        cids.sort_by_cached_key(|cid| cid.to_string());
        cids.dedup();
        Self(cids)
    }
}

impl Extend<Cid> for SortedCidSet {
    fn extend<T: IntoIterator<Item = Cid>>(&mut self, iter: T) {
        for cid in iter {
            self.insert(cid);
        }
    }
}

impl From<Vec<Cid>> for SortedCidSet {
    fn from(cids: Vec<Cid>) -> Self {
        Self::from_iter(cids)
    }
}

impl From<Cid> for SortedCidSet {
    fn from(cid: Cid) -> Self {
        Self(vec![cid])
    }
}

impl From<SortedCidSet> for Vec<Cid> {
    fn from(set: SortedCidSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a SortedCidSet {
    type Item = &'a Cid;
    type IntoIter = std::slice::Iter<'a, Cid>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SortedCidSet {
    type Item = Cid;
    type IntoIter = std::vec::IntoIter<Cid>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for SortedCidSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Input is re-sorted and deduplicated.
impl<'de> Deserialize<'de> for SortedCidSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Cid>::deserialize(deserializer).map(Self::from_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cid::CidCborExt as _;
    use quickcheck_macros::quickcheck;

    fn cid_of(n: u64) -> Cid {
        Cid::from_cbor_blake2b256(&n).unwrap()
    }

    fn is_sorted_by_string(cids: &[Cid]) -> bool {
        cids.iter()
            .tuple_windows()
            .all(|(a, b)| a.to_string() < b.to_string())
    }

    #[test]
    fn empty_set() {
        let set = SortedCidSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.cids(), &[] as &[Cid]);
    }

    #[test]
    fn deduplicates_on_construction() {
        let set = SortedCidSet::from_iter([cid_of(1), cid_of(2), cid_of(1)]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&cid_of(1)));
        assert!(set.contains(&cid_of(2)));
    }

    #[test]
    fn add_is_idempotent() {
        let set = SortedCidSet::from(cid_of(7));
        let once = set.clone().with(cid_of(8));
        let twice = once.clone().with(cid_of(8));
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 2);

        let mut set = set;
        assert!(set.insert(cid_of(9)));
        assert!(!set.insert(cid_of(9)));
    }

    #[test]
    fn cbor_decoding_restores_order() {
        let mut cids = (0..10).map(cid_of).collect_vec();
        cids.sort_by_key(|cid| std::cmp::Reverse(cid.to_string()));
        let bytes = fvm_ipld_encoding::to_vec(&cids).unwrap();
        let set: SortedCidSet = fvm_ipld_encoding::from_slice(&bytes).unwrap();
        assert!(is_sorted_by_string(set.cids()));
        assert_eq!(set.len(), 10);
    }

    #[quickcheck]
    fn always_sorted_regardless_of_insertion_order(seeds: Vec<u64>) {
        let cids = seeds.into_iter().map(cid_of).collect_vec();

        let collected = SortedCidSet::from_iter(cids.iter().copied());
        assert!(is_sorted_by_string(collected.cids()));

        let mut inserted = SortedCidSet::new();
        for cid in cids.iter().rev() {
            inserted.insert(*cid);
        }
        assert_eq!(collected, inserted);
    }
}
