//! This module defines the backing array used by the searched dictionary variants.
//!
//! When alignment adjustment is requested, every element is wrapped in a type
//! whose alignment is the next power of two of the element size,
//! so that no element straddles a cache line.

use std::mem::{align_of, size_of};

/// Element of a [Slots] array
trait Slot<T> {
    fn wrap(value: T) -> Self;
    fn value(&self) -> &T;
}

macro_rules! slot_wrappers {
    ($($name:ident => $align:literal),*) => {
        $(
            #[derive(Debug, Clone)]
            #[repr(C, align($align))]
            pub(crate) struct $name<T>(T);

            impl<T> Slot<T> for $name<T> {
                fn wrap(value: T) -> Self {
                    Self(value)
                }

                fn value(&self) -> &T {
                    &self.0
                }
            }
        )*
    };
}

/// Element without additional alignment
#[derive(Debug, Clone)]
#[repr(transparent)]
pub(crate) struct Packed<T>(T);

impl<T> Slot<T> for Packed<T> {
    fn wrap(value: T) -> Self {
        Self(value)
    }

    fn value(&self) -> &T {
        &self.0
    }
}

slot_wrappers!(Align2 => 2, Align4 => 4, Align8 => 8, Align16 => 16, Align32 => 32, Align64 => 64);

/// Immutable array of elements of type `T`,
/// optionally padded to a power-of-two alignment
#[derive(Debug, Clone)]
pub(crate) enum Slots<T> {
    Packed(Box<[Packed<T>]>),
    Align2(Box<[Align2<T>]>),
    Align4(Box<[Align4<T>]>),
    Align8(Box<[Align8<T>]>),
    Align16(Box<[Align16<T>]>),
    Align32(Box<[Align32<T>]>),
    Align64(Box<[Align64<T>]>),
}

/// Run `$body` with `$slots` bound to the underlying slice of `$self`.
macro_rules! forward_slots {
    ($self:expr, $slots:ident => $body:expr) => {
        match $self {
            Slots::Packed($slots) => $body,
            Slots::Align2($slots) => $body,
            Slots::Align4($slots) => $body,
            Slots::Align8($slots) => $body,
            Slots::Align16($slots) => $body,
            Slots::Align32($slots) => $body,
            Slots::Align64($slots) => $body,
        }
    };
}

fn wrap_all<T, S: Slot<T>>(values: Vec<T>) -> Box<[S]> {
    values.into_iter().map(S::wrap).collect()
}

impl<T> Slots<T> {
    /// Alignment that would be chosen for elements of type `T`
    /// if alignment adjustment is enabled.
    /// Returns `None` if the elements are kept packed.
    fn target_alignment() -> Option<usize> {
        let target = size_of::<T>().checked_next_power_of_two()?;

        (target > align_of::<T>() && target <= 64).then_some(target)
    }

    /// Create a new array from the given values.
    pub(crate) fn new(values: Vec<T>, adjusts_alignment: bool) -> Self {
        let target = if adjusts_alignment {
            Self::target_alignment()
        } else {
            None
        };

        match target {
            Some(2) => Slots::Align2(wrap_all(values)),
            Some(4) => Slots::Align4(wrap_all(values)),
            Some(8) => Slots::Align8(wrap_all(values)),
            Some(16) => Slots::Align16(wrap_all(values)),
            Some(32) => Slots::Align32(wrap_all(values)),
            Some(64) => Slots::Align64(wrap_all(values)),
            _ => Slots::Packed(wrap_all(values)),
        }
    }

    /// Number of elements
    pub(crate) fn len(&self) -> usize {
        forward_slots!(self, slots => slots.len())
    }

    /// Return the element at position `index`.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        forward_slots!(self, slots => slots.get(index).map(Slot::value))
    }

    /// Iterate over all elements in order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    /// Index of the first element for which `predicate` is false,
    /// assuming the array is partitioned by `predicate`.
    pub(crate) fn partition_point<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        forward_slots!(self, slots => slots.partition_point(|slot| predicate(slot.value())))
    }

    /// Alignment of the stored elements in bytes
    #[cfg(test)]
    pub(crate) fn alignment(&self) -> usize {
        forward_slots!(self, slots => element_alignment(slots))
    }

    /// Number of bytes occupied by the elements, including padding
    pub(crate) fn size_bytes(&self) -> u64 {
        forward_slots!(self, slots => crate::bytesized::size_inner_slice_flat(slots))
    }
}

#[cfg(test)]
fn element_alignment<S>(_slots: &[S]) -> usize {
    align_of::<S>()
}
