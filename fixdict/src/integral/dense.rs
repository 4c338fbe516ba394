//! This module implements [DenseMap],
//! an array indexed by the distance of a key to the smallest key.

use std::mem::size_of;

use bitvec::vec::BitVec;

use crate::{
    bytesized::ByteSized,
    compare::IntegralKey,
    dictionary::{DictionaryValue, Strategy},
    storage::Slots,
};

/// Determines which slots of a [DenseMap] hold an entry
#[derive(Debug, Clone)]
pub(crate) enum Validity {
    /// Every slot holds an entry
    Complete,
    /// Slot `i` holds an entry iff bit `i` is set
    Flags(BitVec),
    /// A slot holds an entry iff its value is not the default value
    NonDefault,
}

/// Array of values over a contiguous range of integer keys
#[derive(Debug, Clone)]
pub(crate) struct DenseMap<K, V> {
    /// Key associated with the first slot
    min_key: K,
    /// Key associated with the last slot
    max_key: K,
    /// One value per key in `min_key..=max_key`
    values: Slots<V>,
    validity: Validity,
    /// Number of slots that hold an entry
    len: usize,
}

/// Returns the slot of `key` in a range starting with `min_key`.
fn offset<K: IntegralKey>(key: K, min_key: K) -> Option<usize> {
    usize::try_from(key.widen().distance_from(min_key.widen())?).ok()
}

impl<K: IntegralKey, V: DictionaryValue> DenseMap<K, V> {
    /// Create a new [DenseMap] from a non-empty list of entries sorted by unique keys.
    ///
    /// If `default_value_is_always_invalid` is set,
    /// presence is inferred from the stored values instead of separate flags.
    /// Hands the entries back if there are none or their range of keys cannot be addressed.
    pub(crate) fn new(
        entries: Vec<(K, V)>,
        default_value_is_always_invalid: bool,
        adjusts_alignment: bool,
    ) -> Result<Self, Vec<(K, V)>> {
        let bounds = entries.first().zip(entries.last());
        let Some((min_key, max_key)) = bounds.map(|(first, last)| (first.0, last.0)) else {
            return Err(entries);
        };
        let Some(span) = offset(max_key, min_key).and_then(|span| span.checked_add(1)) else {
            return Err(entries);
        };
        let len = entries.len();

        let mut entries = entries
            .into_iter()
            .map(|(key, value)| (offset(key, min_key), value))
            .peekable();
        let mut flags = BitVec::with_capacity(span);

        let values = (0..span)
            .map(|slot| match entries.next_if(|(position, _)| *position == Some(slot)) {
                Some((_, value)) => {
                    flags.push(true);
                    value
                }
                None => {
                    flags.push(false);
                    V::default()
                }
            })
            .collect::<Vec<V>>();

        let validity = if len == span {
            Validity::Complete
        } else if default_value_is_always_invalid {
            Validity::NonDefault
        } else {
            Validity::Flags(flags)
        };

        log::trace!(
            "dense array over {min_key:?}..={max_key:?} with {len} entries in {span} slots"
        );

        Ok(Self {
            min_key,
            max_key,
            values: Slots::new(values, adjusts_alignment),
            validity,
            len,
        })
    }

    /// Return the value associated with `key`, if present.
    pub(crate) fn find(&self, key: K) -> Option<&V> {
        let slot = offset(key, self.min_key)?;
        let value = self.values.get(slot)?;

        let present = match &self.validity {
            Validity::Complete => true,
            Validity::Flags(flags) => flags.get(slot).is_some_and(|flag| *flag),
            Validity::NonDefault => *value != V::default(),
        };

        present.then_some(value)
    }

    /// Return whether every slot holds an entry.
    pub(crate) fn is_complete(&self) -> bool {
        matches!(self.validity, Validity::Complete)
    }

    pub(crate) fn min_key(&self) -> K {
        self.min_key
    }

    pub(crate) fn max_key(&self) -> K {
        self.max_key
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn strategy(&self) -> Strategy {
        if self.is_complete() {
            Strategy::FullyDense
        } else {
            Strategy::Dense
        }
    }

    /// Smallest and largest key
    pub(crate) fn bounds(&self) -> Option<(K, K)> {
        Some((self.min_key, self.max_key))
    }
}

impl<K, V> ByteSized for DenseMap<K, V> {
    fn size_bytes(&self) -> u64 {
        let size_flags = match &self.validity {
            Validity::Flags(flags) => flags.capacity() as u64 / 8,
            Validity::Complete | Validity::NonDefault => 0,
        };

        size_of::<Self>() as u64 + self.values.size_bytes() + size_flags
    }
}
