//! This module implements [GeneralMap],
//! which combines a dense core with sparse outskirts.

use std::mem::size_of;

use crate::{
    bytesized::ByteSized,
    compare::IntegralKey,
    dictionary::{DictionaryValue, Strategy},
};

use super::{dense::DenseMap, sparse::SparseMap};

/// Dictionary consisting of a [DenseMap] for the keys in its range
/// and two [SparseMap]s for the keys below and above it
#[derive(Debug, Clone)]
pub(crate) struct GeneralMap<K, V> {
    /// Entries with keys below the dense range
    left: SparseMap<K, V>,
    /// Entries in the dense range
    dense: DenseMap<K, V>,
    /// Entries with keys above the dense range
    right: SparseMap<K, V>,
}

impl<K: IntegralKey, V: DictionaryValue> GeneralMap<K, V> {
    /// Create a new [GeneralMap].
    ///
    /// Every key of `left` must be smaller and every key of `right` larger than the keys of `dense`.
    pub(crate) fn new(left: SparseMap<K, V>, dense: DenseMap<K, V>, right: SparseMap<K, V>) -> Self {
        Self { left, dense, right }
    }

    /// Return the value associated with `key`, if present.
    pub(crate) fn find(&self, key: K) -> Option<&V> {
        if key < self.dense.min_key() {
            self.left.find(key)
        } else if key > self.dense.max_key() {
            self.right.find(key)
        } else {
            self.dense.find(key)
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.left.len() + self.dense.len() + self.right.len()
    }

    pub(crate) fn strategy(&self) -> Strategy {
        Strategy::General
    }

    /// Smallest and largest key
    pub(crate) fn bounds(&self) -> Option<(K, K)> {
        let min_key = self
            .left
            .bounds()
            .map_or(self.dense.min_key(), |(min_key, _)| min_key);
        let max_key = self
            .right
            .bounds()
            .map_or(self.dense.max_key(), |(_, max_key)| max_key);

        Some((min_key, max_key))
    }
}

impl<K, V> ByteSized for GeneralMap<K, V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.left.size_bytes()
            + self.dense.size_bytes()
            + self.right.size_bytes()
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::GeneralMap;
    use crate::{
        dictionary::Strategy,
        integral::{dense::DenseMap, sparse::SparseMap},
    };

    #[test]
    fn dispatch_by_range() {
        let left = SparseMap::new(vec![(-100i64, 1u8), (-50, 2)], 8, true);
        let dense = DenseMap::new(vec![(0, 3), (1, 4), (2, 5), (4, 6)], false, true)
            .expect("range is addressable");
        let right = SparseMap::new(vec![(1000, 7)], 8, true);
        let general = GeneralMap::new(left, dense, right);

        assert_eq!(general.len(), 7);
        assert_eq!(general.strategy(), Strategy::General);
        assert_eq!(general.bounds(), Some((-100, 1000)));

        assert_eq!(general.find(-100), Some(&1));
        assert_eq!(general.find(-50), Some(&2));
        assert_eq!(general.find(2), Some(&5));
        assert_eq!(general.find(3), None);
        assert_eq!(general.find(4), Some(&6));
        assert_eq!(general.find(1000), Some(&7));
        assert_eq!(general.find(-1), None);
        assert_eq!(general.find(999), None);
    }

    #[test]
    fn bounds_without_outskirts() {
        let dense = DenseMap::new(vec![(5u8, 'a'), (7, 'b')], false, false)
            .expect("range is addressable");
        let general = GeneralMap::new(
            SparseMap::new(vec![], 8, false),
            dense,
            SparseMap::new(vec![(9, 'c')], 8, false),
        );

        assert_eq!(general.bounds(), Some((5, 9)));
        assert_eq!(general.find(6), None);
        assert_eq!(general.find(9), Some(&'c'));
    }
}
