//! This module implements [CollisionGroupedMap],
//! which tolerates keys that share a hash.

use std::mem::size_of;

use crate::{
    bytesized::{size_inner_strings, ByteSized},
    dictionary::Strategy,
    hash::StringPolicy,
    storage::Slots,
};

use super::HashedEntry;

/// Array of entries sorted by hash.
/// Entries with equal hashes form a contiguous run.
#[derive(Debug, Clone)]
pub(crate) struct CollisionGroupedMap<V> {
    entries: Slots<HashedEntry<V>>,
}

impl<V> CollisionGroupedMap<V> {
    /// Create a new [CollisionGroupedMap].
    pub(crate) fn new(mut entries: Vec<HashedEntry<V>>, adjusts_alignment: bool) -> Self {
        entries.sort_by_key(|entry| entry.hash);

        Self {
            entries: Slots::new(entries, adjusts_alignment),
        }
    }

    /// Return the value associated with `key` whose hash is `hash`, if present.
    pub(crate) fn find(&self, policy: StringPolicy, key: &str, hash: u64) -> Option<&V> {
        let first = self.entries.partition_point(|entry| entry.hash < hash);

        (first..self.entries.len())
            .map_while(|position| {
                self.entries
                    .get(position)
                    .filter(|entry| entry.hash == hash)
            })
            .find(|entry| policy.equals(&entry.key, key))
            .map(|entry| &entry.value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn strategy(&self) -> Strategy {
        Strategy::HashCollisionGrouped
    }
}

impl<V> ByteSized for CollisionGroupedMap<V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.entries.size_bytes()
            + size_inner_strings(self.entries.iter().map(|entry| &*entry.key))
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::CollisionGroupedMap;
    use crate::{hash::StringPolicy, string::HashedEntry};

    #[test]
    fn colliding_keys() {
        let policy = StringPolicy::CaseSensitive;
        let keys = ["a", "\0a", "\0\0a", "b", "0BCPElfPXEtMOUE", "AyshlQKfxmMdGE4"];
        let entries = keys
            .iter()
            .zip(0..)
            .map(|(key, value)| HashedEntry::new(policy, (*key).into(), value))
            .collect();
        let map = CollisionGroupedMap::new(entries, true);

        assert_eq!(map.len(), 6);
        for (key, value) in keys.iter().zip(0..) {
            assert_eq!(map.find(policy, key, policy.hash(key)), Some(&value));
        }

        assert_eq!(map.find(policy, "\0\0\0a", policy.hash("\0\0\0a")), None);
        assert_eq!(map.find(policy, "c", policy.hash("c")), None);
    }
}
