//! This module implements [SparseMap],
//! which searches a sorted array of entries.

use std::mem::size_of;

use crate::{
    bytesized::ByteSized, compare::IntegralKey, dictionary::Strategy, storage::Slots,
};

/// Sorted array of entries, searched linearly or with binary search
#[derive(Debug, Clone)]
pub(crate) enum SparseMap<K, V> {
    /// No entries
    Empty,
    /// Searched from front to back
    Linear(Slots<(K, V)>),
    /// Searched with binary search
    Binary(Slots<(K, V)>),
}

impl<K: IntegralKey, V> SparseMap<K, V> {
    /// Create a new [SparseMap] from entries sorted by unique keys.
    ///
    /// Binary search is used if there are at least `binary_search_threshold` entries.
    pub(crate) fn new(
        entries: Vec<(K, V)>,
        binary_search_threshold: usize,
        adjusts_alignment: bool,
    ) -> Self {
        if entries.is_empty() {
            Self::Empty
        } else if entries.len() >= binary_search_threshold {
            Self::Binary(Slots::new(entries, adjusts_alignment))
        } else {
            Self::Linear(Slots::new(entries, adjusts_alignment))
        }
    }

    /// Return the value associated with `key`, if present.
    pub(crate) fn find(&self, key: K) -> Option<&V> {
        match self {
            Self::Empty => None,
            Self::Linear(entries) => entries
                .iter()
                .find(|(current, _)| *current == key)
                .map(|(_, value)| value),
            Self::Binary(entries) => {
                let position = entries.partition_point(|(current, _)| *current < key);
                entries
                    .get(position)
                    .filter(|(current, _)| *current == key)
                    .map(|(_, value)| value)
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Linear(entries) | Self::Binary(entries) => entries.len(),
        }
    }

    pub(crate) fn strategy(&self) -> Strategy {
        match self {
            Self::Empty => Strategy::Empty,
            Self::Linear(_) => Strategy::SparseLinear,
            Self::Binary(_) => Strategy::SparseBinary,
        }
    }

    /// Smallest and largest key
    pub(crate) fn bounds(&self) -> Option<(K, K)> {
        match self {
            Self::Empty => None,
            Self::Linear(entries) | Self::Binary(entries) => {
                let first = entries.get(0)?.0;
                let last = entries.get(entries.len() - 1)?.0;
                Some((first, last))
            }
        }
    }
}

impl<K, V> ByteSized for SparseMap<K, V> {
    fn size_bytes(&self) -> u64 {
        let size_entries = match self {
            Self::Empty => 0,
            Self::Linear(entries) | Self::Binary(entries) => entries.size_bytes(),
        };

        size_of::<Self>() as u64 + size_entries
    }
}
