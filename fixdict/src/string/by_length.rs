//! This module implements [ByLengthMap],
//! which identifies the only candidate for a query by its length.

use std::mem::size_of;

use itertools::Itertools;

use crate::{
    bytesized::{size_inner_slice_flat, size_inner_strings, ByteSized},
    dictionary::Strategy,
    error::BuildError,
    hash::StringPolicy,
    integral::{build_integral_map, IntegralDictionary},
    options::Options,
};

/// Entries whose keys have pairwise distinct lengths,
/// indexed by an [IntegralDictionary] from length to position
#[derive(Debug, Clone)]
pub(crate) struct ByLengthMap<V> {
    index: IntegralDictionary<usize, Option<usize>>,
    entries: Box<[(Box<str>, V)]>,
}

impl<V> ByLengthMap<V> {
    /// Create a new [ByLengthMap] from normalized entries.
    ///
    /// Returns an error if two keys have the same length.
    pub(crate) fn new(entries: Vec<(Box<str>, V)>, options: &Options) -> Result<Self, BuildError> {
        if !entries.iter().map(|(key, _)| key.len()).all_unique() {
            return Err(BuildError::NotApplicable {
                strategy: Strategy::ByLength,
                reason: "keys do not have pairwise distinct lengths",
            });
        }

        let index_options = Options {
            already_sorted: false,
            already_unique: true,
            case_insensitive: false,
            default_value_is_always_invalid: true,
            ..*options
        };
        let index = build_integral_map(
            entries
                .iter()
                .enumerate()
                .map(|(position, (key, _))| (key.len(), Some(position))),
            index_options,
        )?;

        Ok(Self {
            index,
            entries: entries.into_boxed_slice(),
        })
    }

    /// Return the value associated with `key`, if present.
    pub(crate) fn find(&self, policy: StringPolicy, key: &str) -> Option<&V> {
        let position = (*self.index.lookup(key.len())?)?;
        let (stored, value) = self.entries.get(position)?;

        policy.equals_same_length(stored, key).then_some(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn strategy(&self) -> Strategy {
        Strategy::ByLength
    }
}

impl<V> ByteSized for ByLengthMap<V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.index.size_bytes()
            + size_inner_slice_flat(&self.entries)
            + size_inner_strings(self.entries.iter().map(|(key, _)| &**key))
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::ByLengthMap;
    use crate::{dictionary::Strategy, error::BuildError, hash::StringPolicy, options::Options};

    fn entries(keys: &[&str]) -> Vec<(Box<str>, usize)> {
        keys.iter().map(|key| Box::from(*key)).zip(0..).collect()
    }

    #[test]
    fn distinct_lengths() {
        let map = ByLengthMap::new(
            entries(&["apple", "pineapple", "pen", "", "strawberry"]),
            &Options::default(),
        )
        .unwrap();
        let policy = StringPolicy::AsciiCaseInsensitive;

        assert_eq!(map.len(), 5);
        assert_eq!(map.find(policy, "Pen"), Some(&2));
        assert_eq!(map.find(policy, ""), Some(&3));
        assert_eq!(map.find(policy, "StrawBerry"), Some(&4));
        assert_eq!(map.find(policy, "cat"), None);
        assert_eq!(map.find(policy, "berry"), None);
        assert_eq!(map.find(StringPolicy::CaseSensitive, "Pen"), None);
    }

    #[test]
    fn repeated_length() {
        assert!(matches!(
            ByLengthMap::new(entries(&["cat", "dog"]), &Options::default()),
            Err(BuildError::NotApplicable {
                strategy: Strategy::ByLength,
                ..
            })
        ));
    }
}
