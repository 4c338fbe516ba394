//! This module defines the interface shared by all dictionaries.

use std::fmt::Debug;

use crate::bytesized::ByteSized;

/// Types that can be stored as values of a dictionary.
///
/// The default value is returned by unsuccessful lookups.
pub trait DictionaryValue: Debug + Default + PartialEq {}
impl<T> DictionaryValue for T where T: Debug + Default + PartialEq {}

/// Lookup structure selected by a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// No entries
    Empty,
    /// Array over a range of integers in which every key is present
    FullyDense,
    /// Array over a range of integers with a presence flag per slot
    Dense,
    /// Unsorted array searched linearly
    SparseLinear,
    /// Array sorted by key and searched with binary search
    SparseBinary,
    /// Dense array flanked by two searched arrays
    General,
    /// String keys compared one by one
    Naive,
    /// Hashes of string keys searched linearly
    HashLinearSearch,
    /// Hashes of string keys sorted and searched with binary search
    HashBinarySearch,
    /// Open-addressing hash table
    HashTable,
    /// Hashes sorted and searched, allowing collisions
    HashCollisionGrouped,
    /// Dispatch on the length of string keys
    ByLength,
    /// Dispatch on one character of string keys
    ByCharacter,
}

/// Immutable mapping from a fixed set of keys to values
pub trait FixedDictionary: Debug + ByteSized {
    /// Type of keys accepted by lookups
    type Key: ?Sized;
    /// Type of stored values
    type Value: DictionaryValue;

    /// Return the value associated with `key`, if present.
    fn find(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Value returned by unsuccessful lookups
    fn null_value(&self) -> &Self::Value;

    /// Return the value associated with `key` and whether it was found.
    /// If it was not found, the returned value is [FixedDictionary::null_value].
    fn get(&self, key: &Self::Key) -> (&Self::Value, bool) {
        match self.find(key) {
            Some(value) => (value, true),
            None => (self.null_value(), false),
        }
    }

    /// Number of entries
    fn len(&self) -> usize;

    /// Return whether there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lookup structure chosen by the builder
    fn strategy(&self) -> Strategy;
}
