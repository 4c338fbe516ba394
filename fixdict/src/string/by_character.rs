//! This module implements [ByCharacterMap],
//! which identifies the only candidate for a query by the byte at a fixed position.

use std::mem::size_of;

use crate::{
    bytesized::{size_inner_slice_flat, size_inner_strings, ByteSized},
    dictionary::Strategy,
    error::BuildError,
    hash::StringPolicy,
    integral::{build_integral_map, IntegralDictionary},
    options::Options,
};

/// Return the first position, shorter than every key,
/// at which all keys have pairwise distinct bytes.
pub(crate) fn distinguishing_position<V>(entries: &[(Box<str>, V)]) -> Option<usize> {
    let min_length = entries.iter().map(|(key, _)| key.len()).min()?;

    (0..min_length).find(|&position| {
        let mut seen = [false; 256];

        entries.iter().all(|(key, _)| {
            let byte = key.as_bytes()[position];
            !std::mem::replace(&mut seen[usize::from(byte)], true)
        })
    })
}

/// Entries whose keys differ pairwise at one position,
/// indexed by an [IntegralDictionary] from the byte at that position to the index of the entry
#[derive(Debug, Clone)]
pub(crate) struct ByCharacterMap<V> {
    /// Byte offset at which all keys differ
    position: usize,
    index: IntegralDictionary<u8, Option<usize>>,
    entries: Box<[(Box<str>, V)]>,
}

impl<V> ByCharacterMap<V> {
    /// Create a new [ByCharacterMap] from normalized entries.
    ///
    /// Returns an error if there is no position at which all keys differ.
    pub(crate) fn new(entries: Vec<(Box<str>, V)>, options: &Options) -> Result<Self, BuildError> {
        let Some(position) = distinguishing_position(&entries) else {
            return Err(BuildError::NotApplicable {
                strategy: Strategy::ByCharacter,
                reason: "there is no position at which all keys have distinct characters",
            });
        };

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
                .map(|(entry, (key, _))| (key.as_bytes()[position], Some(entry))),
            index_options,
        )?;

        log::trace!("keys differ at byte {position}");

        Ok(Self {
            position,
            index,
            entries: entries.into_boxed_slice(),
        })
    }

    /// Return the value associated with `key`, if present.
    pub(crate) fn find(&self, policy: StringPolicy, key: &str) -> Option<&V> {
        let byte = policy.convert_byte(*key.as_bytes().get(self.position)?);
        let entry = (*self.index.lookup(byte)?)?;
        let (stored, value) = self.entries.get(entry)?;

        policy.equals(stored, key).then_some(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn strategy(&self) -> Strategy {
        Strategy::ByCharacter
    }

    #[cfg(test)]
    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

impl<V> ByteSized for ByCharacterMap<V> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64
            + self.index.size_bytes()
            + size_inner_slice_flat(&self.entries)
            + size_inner_strings(self.entries.iter().map(|(key, _)| &**key))
    }
}
