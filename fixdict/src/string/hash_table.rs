//! This module implements [HashTable],
//! an open-addressing hash table with a bounded probe sequence.
//!
//! Every key is placed either in its home bucket or in one of the
//! following [PROBING_SIZE] slots. The number of buckets is chosen
//! by [find_bucket_count] such that this is possible for all keys.

use std::{iter, mem::size_of};

use bitvec::vec::BitVec;

use crate::{
    bytesized::{size_inner_strings, ByteSized},
    dictionary::Strategy,
    hash::StringPolicy,
    storage::Slots,
};

use super::HashedEntry;

/// Number of slots after the home bucket in which a key may be placed
pub(crate) const PROBING_SIZE: usize = 1;

/// Maps a hash to its home bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucketing {
    /// Number of buckets is a power of two; stores that number minus one
    Mask(u64),
    /// Arbitrary number of buckets
    Modulo(u64),
}

impl Bucketing {
    pub(crate) fn new(bucket_count: usize) -> Self {
        if bucket_count.is_power_of_two() {
            Self::Mask(bucket_count as u64 - 1)
        } else {
            Self::Modulo(bucket_count as u64)
        }
    }

    /// Home bucket of `hash`
    pub(crate) fn bucket(self, hash: u64) -> Option<usize> {
        let bucket = match self {
            Self::Mask(mask) => hash & mask,
            Self::Modulo(bucket_count) => hash.checked_rem(bucket_count)?,
        };

        usize::try_from(bucket).ok()
    }
}

/// Returns whether every hash can be placed within its probe sequence
/// in a table with `bucket_count` buckets.
fn fits(hashes: &[u64], bucket_count: usize) -> bool {
    let bucketing = Bucketing::new(bucket_count);
    let mut occupied: BitVec = BitVec::repeat(false, bucket_count + PROBING_SIZE);

    hashes.iter().all(|&hash| {
        let Some(bucket) = bucketing.bucket(hash) else {
            return false;
        };

        match (bucket..=bucket + PROBING_SIZE).find(|&slot| !occupied[slot]) {
            Some(slot) => {
                occupied.set(slot, true);
                true
            }
            None => false,
        }
    })
}

/// Search for a number of buckets such that every hash fits within its probe sequence
/// and the load factor is at least `min_load_factor`.
///
/// Powers of two are tried first, followed by odd numbers in increasing order.
/// At most `max_n_iterations` candidates are tested.
/// Returns `None` if no candidate qualifies.
pub(crate) fn find_bucket_count(
    hashes: &[u64],
    min_load_factor: f64,
    max_n_iterations: usize,
) -> Option<usize> {
    let count = hashes.len();
    #[allow(clippy::cast_possible_truncation)]
    let limit = (count as f64 / min_load_factor) as usize;

    let powers_of_two = iter::successors(count.checked_next_power_of_two(), |bucket_count| {
        bucket_count.checked_mul(2)
    })
    .take_while(|&bucket_count| bucket_count <= limit);
    let odd_numbers = ((count | 1)..=limit).step_by(2);

    powers_of_two
        .chain(odd_numbers)
        .take(max_n_iterations)
        .find(|&bucket_count| {
            let fits = fits(hashes, bucket_count);
            log::trace!("{count} keys in {bucket_count} buckets: fits = {fits}");
            fits
        })
}

/// Open-addressing hash table over entries with pairwise distinct hashes
#[derive(Debug, Clone)]
pub(crate) struct HashTable<V> {
    /// `bucket_count + PROBING_SIZE` slots
    slots: Slots<Option<HashedEntry<V>>>,
    bucketing: Bucketing,
    len: usize,
}

impl<V> HashTable<V> {
    /// Create a new [HashTable] with the given number of buckets,
    /// which must have been approved by [find_bucket_count].
    pub(crate) fn new(
        entries: Vec<HashedEntry<V>>,
        bucket_count: usize,
        adjusts_alignment: bool,
    ) -> Self {
        let bucketing = Bucketing::new(bucket_count);
        let len = entries.len();

        let mut table = iter::repeat_with(|| None)
            .take(bucket_count + PROBING_SIZE)
            .collect::<Vec<Option<HashedEntry<V>>>>();

        for entry in entries {
            let home = bucketing.bucket(entry.hash).unwrap_or(bucket_count);
            if let Some(slot) = table.iter_mut().skip(home).find(|slot| slot.is_none()) {
                *slot = Some(entry);
            }
        }

        Self {
            slots: Slots::new(table, adjusts_alignment),
            bucketing,
            len,
        }
    }

    /// Return the value associated with `key` whose hash is `hash`, if present.
    pub(crate) fn find(&self, policy: StringPolicy, key: &str, hash: u64) -> Option<&V> {
        let home = self.bucketing.bucket(hash)?;

        for slot in home..=home + PROBING_SIZE {
            let entry = self.slots.get(slot)?.as_ref()?;

            if entry.hash == hash {
                return policy.equals(&entry.key, key).then_some(&entry.value);
            }
        }

        None
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn strategy(&self) -> Strategy {
        Strategy::HashTable
    }

    #[cfg(test)]
    pub(crate) fn bucketing(&self) -> Bucketing {
        self.bucketing
    }
}

impl<V> ByteSized for HashTable<V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.slots.size_bytes()
            + size_inner_strings(self.slots.iter().flatten().map(|entry| &*entry.key))
    }
}
