//! This module defines [IntegralDictionary],
//! a dictionary whose keys are primitive integers,
//! and its builder [build_integral_map].
//!
//! Depending on the distribution of the keys,
//! entries are stored in a flat array indexed by key,
//! in a sorted array that is searched,
//! or in a combination of both.

pub(crate) mod dense;
pub(crate) mod general;
pub(crate) mod sparse;

use std::{mem::size_of, ops::Range};

use delegate::delegate;
use itertools::Itertools;

use crate::{
    bytesized::ByteSized,
    compare::{self, IntegralKey, ToIntegralKey},
    dictionary::{DictionaryValue, FixedDictionary, Strategy},
    error::BuildError,
    options::{KeyKind, Options},
};

use self::{dense::DenseMap, general::GeneralMap, sparse::SparseMap};

/// Lookup structure of an [IntegralDictionary]
#[allow(variant_size_differences)]
#[derive(Debug, Clone)]
enum IntegralStrategy<K, V> {
    /// All entries in one array indexed by key
    Dense(DenseMap<K, V>),
    /// All entries in one searched array, possibly none
    Sparse(SparseMap<K, V>),
    /// Dense core with searched outskirts
    General(GeneralMap<K, V>),
}

/// Returns whether the keys `first..=last` can be covered by an array
/// in which `count` slots are occupied.
fn is_dense<K: IntegralKey>(first: K, last: K, count: usize, min_load_factor: f64) -> bool {
    let Some(span) = last.widen().distance_from(first.widen()) else {
        return false;
    };

    // The array must be addressable
    if usize::try_from(span)
        .ok()
        .and_then(|span| span.checked_add(1))
        .is_none()
    {
        return false;
    }

    (span as f64 + 1.0) * min_load_factor <= count as f64
}

/// Find the longest range of entries (sorted by key)
/// that satisfies the minimum load factor when stored in an array indexed by key.
///
/// Among ranges of equal length, the leftmost one is returned.
pub(crate) fn find_longest_dense_subrange<K: IntegralKey, V>(
    entries: &[(K, V)],
    min_load_factor: f64,
) -> Range<usize> {
    let Some(last) = entries.len().checked_sub(1) else {
        return 0..0;
    };

    if is_dense(entries[0].0, entries[last].0, entries.len(), min_load_factor) {
        return 0..entries.len();
    }

    let mut longest = 0..1;
    let mut head = 0;

    for tail in 1..entries.len() {
        while head < tail
            && !is_dense(
                entries[head].0,
                entries[tail].0,
                tail - head + 1,
                min_load_factor,
            )
        {
            head += 1;
        }

        if tail - head + 1 > longest.len() {
            longest = head..tail + 1;
        }
    }

    longest
}

impl<K: IntegralKey, V: DictionaryValue> IntegralStrategy<K, V> {
    /// Select and build the lookup structure for entries sorted by unique keys.
    fn new(mut entries: Vec<(K, V)>, options: &Options) -> Self {
        let sparse = |entries: Vec<(K, V)>| {
            Self::Sparse(SparseMap::new(
                entries,
                options.binary_search_threshold,
                options.adjusts_alignment,
            ))
        };
        let dense = |entries: Vec<(K, V)>| {
            DenseMap::new(
                entries,
                options.default_value_is_always_invalid,
                options.adjusts_alignment,
            )
        };

        if entries.is_empty() {
            return sparse(entries);
        }

        let dense_range = find_longest_dense_subrange(&entries, options.effective_load_factor());
        log::trace!(
            "longest dense range covers entries {dense_range:?} of {}",
            entries.len()
        );

        if dense_range.len() == entries.len() {
            return match dense(entries) {
                Ok(dense) => Self::Dense(dense),
                Err(entries) => sparse(entries),
            };
        }

        if dense_range.len() < options.dense_lookup_threshold {
            return sparse(entries);
        }

        let right = entries.split_off(dense_range.end);
        let core = entries.split_off(dense_range.start);
        let left = entries;

        match dense(core) {
            Ok(dense) => Self::General(GeneralMap::new(
                SparseMap::new(left, options.binary_search_threshold, options.adjusts_alignment),
                dense,
                SparseMap::new(right, options.binary_search_threshold, options.adjusts_alignment),
            )),
            Err(core) => sparse(left.into_iter().chain(core).chain(right).collect()),
        }
    }

    delegate! {
        to match self {
            Self::Dense(map) => map,
            Self::Sparse(map) => map,
            Self::General(map) => map,
        } {
            fn strategy(&self) -> Strategy;
            fn find(&self, key: K) -> Option<&V>;
            fn len(&self) -> usize;
            fn bounds(&self) -> Option<(K, K)>;
        }
    }
}

impl<K, V> ByteSized for IntegralStrategy<K, V> {
    delegate! {
        to match self {
            Self::Dense(map) => map,
            Self::Sparse(map) => map,
            Self::General(map) => map,
        } {
            fn size_bytes(&self) -> u64;
        }
    }
}

/// Immutable dictionary with integral keys
///
/// Queries may use any integer type (or a type implementing [ToIntegralKey]).
/// Keys are compared by their mathematical value,
/// so a query never matches a stored key of a different value due to truncation or a change of sign.
#[derive(Debug, Clone)]
pub struct IntegralDictionary<K, V> {
    strategy: IntegralStrategy<K, V>,
    /// Smallest and largest key
    bounds: Option<(K, K)>,
    /// Value returned for absent keys
    null: V,
}

impl<K: IntegralKey, V: DictionaryValue> IntegralDictionary<K, V> {
    /// Return the value associated with `key` and whether it was found.
    /// If it was not found, the default value of `V` is returned.
    pub fn get<Q: ToIntegralKey>(&self, key: Q) -> (&V, bool) {
        match self.lookup(key) {
            Some(value) => (value, true),
            None => (&self.null, false),
        }
    }

    /// Return the value associated with `key`, if present.
    pub fn lookup<Q: ToIntegralKey>(&self, key: Q) -> Option<&V> {
        self.find_key(compare::cast::<K, _>(key.to_integral_key())?)
    }

    fn find_key(&self, key: K) -> Option<&V> {
        let (min_key, max_key) = self.bounds?;

        if key < min_key || key > max_key {
            return None;
        }

        self.strategy.find(key)
    }

    /// Return whether `key` is present.
    pub fn contains_key<Q: ToIntegralKey>(&self, key: Q) -> bool {
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

    /// Smallest key, or `None` if the dictionary is empty
    pub fn min_key(&self) -> Option<K> {
        self.bounds.map(|(min_key, _)| min_key)
    }

    /// Largest key, or `None` if the dictionary is empty
    pub fn max_key(&self) -> Option<K> {
        self.bounds.map(|(_, max_key)| max_key)
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

impl<K: IntegralKey, V: DictionaryValue> FixedDictionary for IntegralDictionary<K, V> {
    type Key = K;
    type Value = V;

    fn find(&self, key: &K) -> Option<&V> {
        self.find_key(*key)
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

impl<K, V> ByteSized for IntegralDictionary<K, V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64 + self.strategy.size_bytes()
    }
}

/// Build an [IntegralDictionary] from the given entries.
///
/// Unless [Options::already_sorted] is set, the entries are sorted by key first.
/// With [Options::already_sorted], they must be sorted by key in ascending order.
///
/// Returns an error if
///   * the options are not valid for integral keys,
///   * two entries share a key (unless [Options::already_unique] is set), or
///   * [Options::default_value_is_always_invalid] is set but an entry has the default value.
pub fn build_integral_map<Q, V, I>(
    entries: I,
    options: Options,
) -> Result<IntegralDictionary<Q::Key, V>, BuildError>
where
    Q: ToIntegralKey,
    V: DictionaryValue,
    I: IntoIterator<Item = (Q, V)>,
{
    options.validate(KeyKind::Integral)?;

    let mut entries = entries
        .into_iter()
        .map(|(key, value)| (key.to_integral_key(), value))
        .collect::<Vec<_>>();

    if options.already_sorted {
        debug_assert!(
            entries
                .iter()
                .map(|(key, _)| *key)
                .tuple_windows()
                .all(|(previous, next)| previous <= next),
            "entries declared as sorted are not sorted by key"
        );
    } else {
        entries.sort_by_key(|(key, _)| *key);
    }

    if !options.already_unique {
        if let Some((key, _)) = entries
            .iter()
            .map(|(key, _)| *key)
            .tuple_windows()
            .find(|(previous, next)| previous == next)
        {
            return Err(BuildError::DuplicateKey {
                key: format!("{key:?}"),
            });
        }
    }

    if options.default_value_is_always_invalid {
        if let Some((key, _)) = entries.iter().find(|(_, value)| *value == V::default()) {
            return Err(BuildError::DefaultValueIsValid {
                key: format!("{key:?}"),
            });
        }
    }

    let strategy = IntegralStrategy::new(entries, &options);
    log::debug!(
        "integral dictionary with {} entries uses strategy {:?}",
        strategy.len(),
        strategy.strategy()
    );

    Ok(IntegralDictionary {
        bounds: strategy.bounds(),
        strategy,
        null: V::default(),
    })
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::{build_integral_map, find_longest_dense_subrange};
    use crate::{
        bytesized::ByteSized, dictionary::FixedDictionary, error::BuildError, options::Options,
        Strategy,
    };

    fn with_unit_values(keys: &[i64]) -> Vec<(i64, ())> {
        keys.iter().map(|&key| (key, ())).collect()
    }

    #[test]
    fn longest_dense_subrange() {
        let entries = with_unit_values(&[1, 2, 3, 5]);
        assert_eq!(find_longest_dense_subrange(&entries, 0.5), 0..4);
        assert_eq!(find_longest_dense_subrange(&entries, 1.0), 0..3);

        let entries = with_unit_values(&[-1000, 0, 1, 2, 3, 5, 8, 5000]);
        assert_eq!(find_longest_dense_subrange(&entries, 0.5), 1..7);

        let entries = with_unit_values(&[0, 100, 200]);
        assert_eq!(find_longest_dense_subrange(&entries, 0.5), 0..1);

        assert_eq!(find_longest_dense_subrange::<i64, ()>(&[], 0.5), 0..0);
    }

    #[test]
    fn extreme_spans_are_not_dense() {
        let entries = vec![(i128::MIN, 'a'), (i128::MAX, 'b')];
        assert_eq!(find_longest_dense_subrange(&entries, 0.5), 0..1);
    }

    #[test]
    fn contiguous_keys() {
        let dictionary =
            build_integral_map([(12, "c"), (10, "a"), (11, "b")], Options::default()).unwrap();

        assert_eq!(dictionary.strategy(), Strategy::FullyDense);
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.min_key(), Some(10));
        assert_eq!(dictionary.max_key(), Some(12));
        assert_eq!(dictionary.get(11), (&"b", true));
        assert_eq!(dictionary.get(9), (&"", false));
        assert_eq!(dictionary.get(13), (&"", false));
    }

    #[test]
    fn keys_with_holes() {
        let dictionary =
            build_integral_map([(1u16, 'a'), (2, 'b'), (3, 'c'), (5, 'e')], Options::default())
                .unwrap();

        assert_eq!(dictionary.strategy(), Strategy::Dense);
        assert_eq!(dictionary.get(4u16), (&'\0', false));
        assert_eq!(dictionary.get(5u16), (&'e', true));
    }

    #[test]
    fn compact_dense() {
        let options = Options::default().with_default_value_is_always_invalid(true);
        let dictionary = build_integral_map([(1u16, 10u8), (2, 20), (5, 50)], options).unwrap();

        assert_eq!(dictionary.strategy(), Strategy::Dense);
        assert_eq!(dictionary.lookup(3u8), None);
        assert_eq!(dictionary.lookup(5u8), Some(&50));

        assert_eq!(
            build_integral_map([(1u16, 10u8), (2, 0)], options).unwrap_err(),
            BuildError::DefaultValueIsValid {
                key: "2".to_string()
            }
        );
    }

    #[test]
    fn sparse_keys() {
        let entries = [(-500, "x"), (100, "y"), (100_000, "z")];

        let linear = build_integral_map(entries, Options::default()).unwrap();
        assert_eq!(linear.strategy(), Strategy::SparseLinear);

        let binary =
            build_integral_map(entries, Options::default().with_binary_search_threshold(2))
                .unwrap();
        assert_eq!(binary.strategy(), Strategy::SparseBinary);

        for dictionary in [&linear, &binary] {
            assert_eq!(dictionary.get(100), (&"y", true));
            assert_eq!(dictionary.get(0), (&"", false));
            assert_eq!(dictionary.min_key(), Some(-500));
            assert_eq!(dictionary.max_key(), Some(100_000));
        }
    }

    #[test]
    fn dense_core_with_outskirts() {
        let entries = (0..10u32)
            .map(|key| (i64::from(key), key))
            .chain([(-1000, 1000), (5000, 5000)]);
        let dictionary = build_integral_map(entries, Options::default()).unwrap();

        assert_eq!(dictionary.strategy(), Strategy::General);
        assert_eq!(dictionary.len(), 12);
        assert_eq!(dictionary.min_key(), Some(-1000));
        assert_eq!(dictionary.max_key(), Some(5000));

        for key in 0..10 {
            assert_eq!(dictionary.lookup(key), Some(&u32::try_from(key).unwrap()));
        }
        assert_eq!(dictionary.lookup(-1000), Some(&1000));
        assert_eq!(dictionary.lookup(5000), Some(&5000));
        assert_eq!(dictionary.lookup(10), None);
        assert_eq!(dictionary.lookup(-1), None);
    }

    #[test]
    fn dense_core_below_threshold() {
        let entries = [(0, 'a'), (1, 'b'), (2, 'c'), (1000, 'd'), (2000, 'e')];

        let sparse = build_integral_map(entries, Options::default()).unwrap();
        assert_eq!(sparse.strategy(), Strategy::SparseLinear);

        let general =
            build_integral_map(entries, Options::default().with_dense_lookup_threshold(3))
                .unwrap();
        assert_eq!(general.strategy(), Strategy::General);

        for dictionary in [&sparse, &general] {
            assert_eq!(dictionary.lookup(2), Some(&'c'));
            assert_eq!(dictionary.lookup(2000), Some(&'e'));
            assert_eq!(dictionary.lookup(3), None);
        }
    }

    #[test]
    fn empty() {
        let dictionary = build_integral_map::<u8, u8, _>([], Options::default()).unwrap();

        assert_eq!(dictionary.strategy(), Strategy::Empty);
        assert!(dictionary.is_empty());
        assert_eq!(dictionary.min_key(), None);
        assert_eq!(dictionary.get(0u8), (&0, false));
    }

    #[test]
    fn duplicates() {
        assert_eq!(
            build_integral_map([(3, 'a'), (1, 'b'), (3, 'c')], Options::default()).unwrap_err(),
            BuildError::DuplicateKey {
                key: "3".to_string()
            }
        );
    }

    #[test]
    fn presorted_input() {
        let options = Options::default()
            .with_already_sorted(true)
            .with_already_unique(true);
        let dictionary = build_integral_map([(1, 'a'), (2, 'b'), (40, 'c')], options).unwrap();

        assert_eq!(dictionary.lookup(40), Some(&'c'));
        assert_eq!(dictionary.lookup(3), None);
    }

    #[test]
    fn case_insensitivity_is_rejected() {
        let options = Options::default().with_case_insensitive(true);
        assert!(matches!(
            build_integral_map([(1, 'a')], options),
            Err(BuildError::ConflictingOption { .. })
        ));
    }

    #[test]
    fn queries_of_other_types() {
        let dictionary =
            build_integral_map([(-1i32, "minus one"), (0, "zero")], Options::default()).unwrap();

        assert_eq!(dictionary.get(0xFFFF_FFFFu32), (&"", false));
        assert_eq!(dictionary.get(-1i8), (&"minus one", true));
        assert_eq!(dictionary.get(0u64), (&"zero", true));
        assert_eq!(dictionary.get(i64::from(i32::MAX) + 1), (&"", false));
        assert!(dictionary.contains_key(&-1i16));
    }

    #[test]
    fn generic_interface() {
        fn lookup_all<D: FixedDictionary>(dictionary: &D, keys: &[D::Key]) -> usize
        where
            D::Key: Sized,
        {
            keys.iter().filter(|&key| dictionary.get(key).1).count()
        }

        let dictionary =
            build_integral_map([(1u8, 1u8), (2, 2), (200, 3)], Options::default()).unwrap();

        assert_eq!(lookup_all(&dictionary, &[1, 2, 3, 200]), 3);
        assert_eq!(FixedDictionary::len(&dictionary), 3);
        assert!(dictionary.size_bytes() > 0);
    }

    #[test]
    fn dense_slots_follow_alignment_option() {
        let entries = || (0..1000).map(|key| (key, (1u8, 2u8, 3u8)));

        let aligned = build_integral_map(entries(), Options::default()).unwrap();
        let packed =
            build_integral_map(entries(), Options::default().with_adjusts_alignment(false))
                .unwrap();

        assert_eq!(aligned.strategy(), Strategy::FullyDense);
        assert_eq!(packed.strategy(), Strategy::FullyDense);
        assert!(aligned.size_bytes() > packed.size_bytes());
        assert_eq!(aligned.get(500), packed.get(500));
    }

    #[test]
    fn tiny_load_factor_keeps_arrays_bounded() {
        let options = Options::default().with_min_load_factor(1e-12);
        let dictionary = build_integral_map([(0u64, 'a'), (1 << 40, 'b')], options).unwrap();

        assert_eq!(dictionary.strategy(), Strategy::SparseLinear);
        assert_eq!(dictionary.lookup(1u64 << 40), Some(&'b'));
        assert_eq!(dictionary.lookup(1), None);

        // 64 slots per entry are still allowed
        let dictionary = build_integral_map([(0u64, 'a'), (127, 'b')], options).unwrap();
        assert_eq!(dictionary.strategy(), Strategy::Dense);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "entries declared as sorted are not sorted by key")]
    fn unsorted_input_declared_sorted() {
        let options = Options::default().with_already_sorted(true);
        let _ = build_integral_map([(2, 'b'), (1, 'a')], options);
    }
}
