//! This module defines [StringDictionary],
//! a dictionary whose keys are strings,
//! and its builders.
//!
//! [build_string_map] selects between a naive list, a hash table,
//! and searched arrays of hashes depending on the number of keys
//! and the collisions among their hashes.
//! [build_string_map_by_length] and [build_string_map_by_character]
//! build specialized lookup structures for key sets that admit them.

pub(crate) mod by_character;
pub(crate) mod by_length;
pub(crate) mod collision;
pub(crate) mod hash_search;
pub(crate) mod hash_table;
pub(crate) mod naive;

use std::mem::size_of;

use delegate::delegate;
use hashbrown::HashSet;
use itertools::Itertools;

use crate::{
    bytesized::ByteSized,
    dictionary::{DictionaryValue, FixedDictionary, Strategy},
    error::BuildError,
    hash::StringPolicy,
    options::{KeyKind, Options},
};

use self::{
    by_character::ByCharacterMap, by_length::ByLengthMap, collision::CollisionGroupedMap,
    hash_search::HashSearchMap, hash_table::HashTable, naive::NaiveMap,
};

/// Normalized key together with its hash and value
#[derive(Debug, Clone)]
pub(crate) struct HashedEntry<V> {
    pub(crate) hash: u64,
    pub(crate) key: Box<str>,
    pub(crate) value: V,
}

impl<V> HashedEntry<V> {
    pub(crate) fn new(policy: StringPolicy, key: Box<str>, value: V) -> Self {
        Self {
            hash: policy.hash(&key),
            key,
            value,
        }
    }
}

/// Lookup structure of a [StringDictionary]
#[allow(variant_size_differences)]
#[derive(Debug, Clone)]
enum StringStrategy<V> {
    Naive(NaiveMap<V>),
    HashSearch(HashSearchMap<V>),
    HashTable(HashTable<V>),
    CollisionGrouped(CollisionGroupedMap<V>),
    ByLength(ByLengthMap<V>),
    ByCharacter(ByCharacterMap<V>),
}

impl<V> StringStrategy<V> {
    fn empty() -> Self {
        Self::Naive(NaiveMap::new(Vec::new()))
    }

    fn find(&self, policy: StringPolicy, key: &str) -> Option<&V> {
        match self {
            Self::Naive(naive) => naive.find(policy, key),
            Self::HashSearch(search) => search.find(policy, key, policy.hash(key)),
            Self::HashTable(table) => table.find(policy, key, policy.hash(key)),
            Self::CollisionGrouped(grouped) => grouped.find(policy, key, policy.hash(key)),
            Self::ByLength(by_length) => by_length.find(policy, key),
            Self::ByCharacter(by_character) => by_character.find(policy, key),
        }
    }

    delegate! {
        to match self {
            Self::Naive(map) => map,
            Self::HashSearch(map) => map,
            Self::HashTable(map) => map,
            Self::CollisionGrouped(map) => map,
            Self::ByLength(map) => map,
            Self::ByCharacter(map) => map,
        } {
            fn len(&self) -> usize;
            fn strategy(&self) -> Strategy;
        }
    }
}

impl<V> ByteSized for StringStrategy<V> {
    delegate! {
        to match self {
            Self::Naive(map) => map,
            Self::HashSearch(map) => map,
            Self::HashTable(map) => map,
            Self::CollisionGrouped(map) => map,
            Self::ByLength(map) => map,
            Self::ByCharacter(map) => map,
        } {
            fn size_bytes(&self) -> u64;
        }
    }
}

/// Immutable dictionary with string keys
///
/// If the dictionary was built with [Options::case_insensitive],
/// queries match keys that are equal up to ASCII case.
#[derive(Debug, Clone)]
pub struct StringDictionary<V> {
    strategy: StringStrategy<V>,
    policy: StringPolicy,
    /// Value returned for absent keys
    null: V,
}

impl<V: DictionaryValue> StringDictionary<V> {
    fn new(strategy: StringStrategy<V>, policy: StringPolicy) -> Self {
        log::debug!(
            "string dictionary with {} entries uses strategy {:?}",
            strategy.len(),
            strategy.strategy()
        );

        Self {
            strategy,
            policy,
            null: V::default(),
        }
    }

    /// Return the value associated with `key` and whether it was found.
    /// If it was not found, the default value of `V` is returned.
    pub fn get(&self, key: &str) -> (&V, bool) {
        match self.lookup(key) {
            Some(value) => (value, true),
            None => (&self.null, false),
        }
    }

    /// Return the value associated with `key`, if present.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        self.strategy.find(self.policy, key)
    }

    /// Return whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.strategy.len()
    }

    /// Return whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return whether keys are matched ignoring ASCII case.
    pub fn is_case_insensitive(&self) -> bool {
        self.policy == StringPolicy::AsciiCaseInsensitive
    }

    /// The lookup structure chosen by the builder
    pub fn strategy(&self) -> Strategy {
        self.strategy.strategy()
    }

    /// Value returned by unsuccessful lookups
    pub fn null_value(&self) -> &V {
        &self.null
    }
}

impl<V: DictionaryValue> FixedDictionary for StringDictionary<V> {
    type Key = str;
    type Value = V;

    fn find(&self, key: &str) -> Option<&V> {
        self.strategy.find(self.policy, key)
    }

    fn null_value(&self) -> &V {
        &self.null
    }

    fn len(&self) -> usize {
        self.strategy.len()
    }

    fn strategy(&self) -> Strategy {
        self.strategy.strategy()
    }
}

impl<V> ByteSized for StringDictionary<V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64 + self.strategy.size_bytes()
    }
}

/// Validate the options and the keys and bring the keys into their stored form.
fn normalize<K, V, I>(
    entries: I,
    options: &Options,
) -> Result<(StringPolicy, Vec<(Box<str>, V)>), BuildError>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    options.validate(KeyKind::String)?;
    let policy = StringPolicy::from_case_insensitive(options.case_insensitive);

    let entries = entries
        .into_iter()
        .map(|(key, value)| {
            let key = key.as_ref();

            if policy == StringPolicy::AsciiCaseInsensitive && !key.is_ascii() {
                return Err(BuildError::NonAsciiKey {
                    key: key.to_string(),
                });
            }

            Ok((policy.normalize(key), value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !options.already_unique {
        let mut seen = HashSet::with_capacity(entries.len());

        if let Some((key, _)) = entries.iter().find(|(key, _)| !seen.insert(&**key)) {
            return Err(BuildError::DuplicateKey {
                key: format!("{key:?}"),
            });
        }
    }

    Ok((policy, entries))
}

/// Returns whether two of the given entries share a hash.
fn has_hash_collision<V>(entries: &[HashedEntry<V>]) -> bool {
    entries
        .iter()
        .map(|entry| entry.hash)
        .sorted_unstable()
        .tuple_windows()
        .any(|(previous, next)| previous == next)
}

/// Build a [StringDictionary] from the given entries.
///
/// Returns an error if
///   * the options are not valid for string keys,
///   * [Options::case_insensitive] is set and a key contains non-ASCII characters, or
///   * two entries share a key after case folding (unless [Options::already_unique] is set).
pub fn build_string_map<K, V, I>(
    entries: I,
    options: Options,
) -> Result<StringDictionary<V>, BuildError>
where
    K: AsRef<str>,
    V: DictionaryValue,
    I: IntoIterator<Item = (K, V)>,
{
    let (policy, entries) = normalize(entries, &options)?;

    if entries.is_empty() {
        return Ok(StringDictionary::new(StringStrategy::empty(), policy));
    }

    if entries.len() < options.optimization_threshold {
        return Ok(StringDictionary::new(
            StringStrategy::Naive(NaiveMap::new(entries)),
            policy,
        ));
    }

    let entries = entries
        .into_iter()
        .map(|(key, value)| HashedEntry::new(policy, key, value))
        .collect::<Vec<_>>();

    if has_hash_collision(&entries) {
        return Ok(StringDictionary::new(
            StringStrategy::CollisionGrouped(CollisionGroupedMap::new(
                entries,
                options.adjusts_alignment,
            )),
            policy,
        ));
    }

    let hashes = entries.iter().map(|entry| entry.hash).collect::<Vec<_>>();
    let strategy = match hash_table::find_bucket_count(
        &hashes,
        options.effective_load_factor(),
        options.max_n_iterations,
    ) {
        Some(bucket_count) => StringStrategy::HashTable(HashTable::new(
            entries,
            bucket_count,
            options.adjusts_alignment,
        )),
        None => StringStrategy::HashSearch(HashSearchMap::new(
            entries,
            options.binary_search_threshold,
            options.adjusts_alignment,
        )),
    };

    Ok(StringDictionary::new(strategy, policy))
}

/// Build a [StringDictionary] that finds the candidate for a query by its length.
///
/// In addition to the errors of [build_string_map],
/// returns [BuildError::NotApplicable] if two keys have the same length.
pub fn build_string_map_by_length<K, V, I>(
    entries: I,
    options: Options,
) -> Result<StringDictionary<V>, BuildError>
where
    K: AsRef<str>,
    V: DictionaryValue,
    I: IntoIterator<Item = (K, V)>,
{
    let (policy, entries) = normalize(entries, &options)?;

    let strategy = if entries.is_empty() {
        StringStrategy::empty()
    } else {
        StringStrategy::ByLength(ByLengthMap::new(entries, &options)?)
    };

    Ok(StringDictionary::new(strategy, policy))
}

/// Build a [StringDictionary] that finds the candidate for a query
/// by its byte at the first position where all keys differ.
///
/// In addition to the errors of [build_string_map],
/// returns [BuildError::NotApplicable] if there is no such position.
pub fn build_string_map_by_character<K, V, I>(
    entries: I,
    options: Options,
) -> Result<StringDictionary<V>, BuildError>
where
    K: AsRef<str>,
    V: DictionaryValue,
    I: IntoIterator<Item = (K, V)>,
{
    let (policy, entries) = normalize(entries, &options)?;

    let strategy = if entries.is_empty() {
        StringStrategy::empty()
    } else {
        StringStrategy::ByCharacter(ByCharacterMap::new(entries, &options)?)
    };

    Ok(StringDictionary::new(strategy, policy))
}
