//! This module defines the trait [ByteSized],
//! which is implemented by every dictionary so that
//! users can estimate the footprint of their tables.

use std::mem::size_of;

/// Objects that are able calculate their current approximate size in bytes.
///
/// We use `u64` rather than `usize` here to avoid overflows in case of overestimations.
pub trait ByteSized {
    /// Return the number of bytes this object consumes
    fn size_bytes(&self) -> u64;
}

/// Computes the memory required for the content of a boxed slice using only
/// the direct size of its elements, without taking into account any data they might point to.
pub(crate) fn size_inner_slice_flat<T>(object: &[T]) -> u64 {
    object.len() as u64 * size_of::<T>() as u64
}

/// Computes the memory occupied by the bytes of the given strings,
/// not including the string headers themselves.
pub(crate) fn size_inner_strings<'a, I>(strings: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    strings.into_iter().map(|string| string.len() as u64).sum()
}
