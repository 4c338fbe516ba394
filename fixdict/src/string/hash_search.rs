//! This module implements [HashSearchMap],
//! which searches the hashes of keys that are known to be free of collisions.

use std::mem::size_of;

use crate::{
    bytesized::{size_inner_strings, ByteSized},
    dictionary::Strategy,
    hash::StringPolicy,
    storage::Slots,
};

use super::HashedEntry;

/// Array of entries with pairwise distinct hashes
#[derive(Debug, Clone)]
pub(crate) enum HashSearchMap<V> {
    /// Unordered, searched from front to back
    Linear(Slots<HashedEntry<V>>),
    /// Sorted by hash, searched with binary search
    Binary(Slots<HashedEntry<V>>),
}

impl<V> HashSearchMap<V> {
    /// Create a new [HashSearchMap].
    ///
    /// The hashes of the given entries must be pairwise distinct.
    /// Binary search is used if there are at least `binary_search_threshold` entries.
    pub(crate) fn new(
        mut entries: Vec<HashedEntry<V>>,
        binary_search_threshold: usize,
        adjusts_alignment: bool,
    ) -> Self {
        if entries.len() < binary_search_threshold {
            return Self::Linear(Slots::new(entries, adjusts_alignment));
        }

        entries.sort_unstable_by_key(|entry| entry.hash);
        Self::Binary(Slots::new(entries, adjusts_alignment))
    }

    /// Return the value associated with `key` whose hash is `hash`, if present.
    ///
    /// Since hashes are unique, an entry with the same hash is the only candidate.
    pub(crate) fn find(&self, policy: StringPolicy, key: &str, hash: u64) -> Option<&V> {
        let candidate = match self {
            Self::Linear(entries) => entries.iter().find(|entry| entry.hash == hash),
            Self::Binary(entries) => entries
                .get(entries.partition_point(|entry| entry.hash < hash))
                .filter(|entry| entry.hash == hash),
        }?;

        policy
            .equals(&candidate.key, key)
            .then_some(&candidate.value)
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Linear(entries) | Self::Binary(entries) => entries.len(),
        }
    }

    pub(crate) fn strategy(&self) -> Strategy {
        match self {
            Self::Linear(_) => Strategy::HashLinearSearch,
            Self::Binary(_) => Strategy::HashBinarySearch,
        }
    }
}

impl<V> ByteSized for HashSearchMap<V> {
    fn size_bytes(&self) -> u64 {
        let entries = match self {
            Self::Linear(entries) | Self::Binary(entries) => entries,
        };

        size_of::<Self>() as u64
            + entries.size_bytes()
            + size_inner_strings(entries.iter().map(|entry| &*entry.key))
    }
}
