//! This module implements [NaiveMap],
//! which compares a query with every key.

use std::mem::size_of;

use crate::{
    bytesized::{size_inner_slice_flat, size_inner_strings, ByteSized},
    dictionary::Strategy,
    hash::StringPolicy,
};

/// Unordered list of entries, searched from front to back
#[derive(Debug, Clone)]
pub(crate) struct NaiveMap<V> {
    entries: Box<[(Box<str>, V)]>,
}

impl<V> NaiveMap<V> {
    /// Create a new [NaiveMap] from normalized entries.
    pub(crate) fn new(entries: Vec<(Box<str>, V)>) -> Self {
        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    /// Return the value associated with `key`, if present.
    pub(crate) fn find(&self, policy: StringPolicy, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(stored, _)| policy.equals(stored, key))
            .map(|(_, value)| value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn strategy(&self) -> Strategy {
        if self.entries.is_empty() {
            Strategy::Empty
        } else {
            Strategy::Naive
        }
    }
}

impl<V> ByteSized for NaiveMap<V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + size_inner_slice_flat(&self.entries)
            + size_inner_strings(self.entries.iter().map(|(key, _)| &**key))
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::NaiveMap;
    use crate::{dictionary::Strategy, hash::StringPolicy};

    #[test]
    fn compares_every_key() {
        let map = NaiveMap::new(vec![("red".into(), 1), ("".into(), 2), ("blue".into(), 3)]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.strategy(), Strategy::Naive);
        assert_eq!(map.find(StringPolicy::CaseSensitive, "blue"), Some(&3));
        assert_eq!(map.find(StringPolicy::CaseSensitive, ""), Some(&2));
        assert_eq!(map.find(StringPolicy::CaseSensitive, "Blue"), None);
        assert_eq!(map.find(StringPolicy::AsciiCaseInsensitive, "Blue"), Some(&3));
        assert_eq!(map.find(StringPolicy::AsciiCaseInsensitive, "green"), None);
    }

    #[test]
    fn without_entries() {
        let map = NaiveMap::<u8>::new(vec![]);

        assert_eq!(map.strategy(), Strategy::Empty);
        assert_eq!(map.find(StringPolicy::CaseSensitive, ""), None);
    }
}
