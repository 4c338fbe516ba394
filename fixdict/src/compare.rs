//! This module implements comparisons between integers of arbitrary width and signedness,
//! which are used by every dictionary with integral keys.
//!
//! Comparing a signed and an unsigned integer with the built-in operators requires a cast
//! of one of the operands, which silently wraps negative values (e.g., `-1i32 as u32 == u32::MAX`).
//! The functions of this module instead compare the mathematical values:
//! a negative signed value is less than every unsigned value,
//! and all other values are compared as unsigned magnitudes.

use std::{cmp::Ordering, fmt::Debug, hash::Hash};

use num::PrimInt;

/// Lossless representation of a value of any primitive integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WideInt {
    /// A value below zero
    Negative(i128),
    /// A value that is zero or above
    NonNegative(u128),
}

impl Ord for WideInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (WideInt::Negative(lhs), WideInt::Negative(rhs)) => lhs.cmp(rhs),
            (WideInt::Negative(_), WideInt::NonNegative(_)) => Ordering::Less,
            (WideInt::NonNegative(_), WideInt::Negative(_)) => Ordering::Greater,
            (WideInt::NonNegative(lhs), WideInt::NonNegative(rhs)) => lhs.cmp(rhs),
        }
    }
}

impl PartialOrd for WideInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl WideInt {
    /// Returns the difference `self - lower`,
    /// or `None` if `lower` is greater than `self`.
    pub fn distance_from(self, lower: WideInt) -> Option<u128> {
        match (self, lower) {
            (WideInt::NonNegative(upper), WideInt::NonNegative(lower)) => upper.checked_sub(lower),
            (WideInt::Negative(upper), WideInt::Negative(lower)) => {
                (upper >= lower).then(|| upper.abs_diff(lower))
            }
            (WideInt::NonNegative(upper), WideInt::Negative(lower)) => {
                upper.checked_add(lower.unsigned_abs())
            }
            (WideInt::Negative(_), WideInt::NonNegative(_)) => None,
        }
    }
}

/// Primitive integer types that can be used as keys of an [IntegralDictionary][crate::IntegralDictionary].
pub trait IntegralKey: PrimInt + Hash + Debug + Send + Sync + 'static {
    /// Convert into a [WideInt] without loss of information.
    fn widen(self) -> WideInt;

    /// Convert a [WideInt] into this type.
    /// Returns `None` if the value is not representable.
    fn narrow(wide: WideInt) -> Option<Self>;
}

macro_rules! impl_integral_key {
    (signed: $($type:ty),*) => {
        $(
            impl IntegralKey for $type {
                #[allow(trivial_numeric_casts, clippy::cast_sign_loss)]
                fn widen(self) -> WideInt {
                    if self < 0 {
                        WideInt::Negative(self as i128)
                    } else {
                        WideInt::NonNegative(self as u128)
                    }
                }

                fn narrow(wide: WideInt) -> Option<Self> {
                    match wide {
                        WideInt::Negative(value) => <$type>::try_from(value).ok(),
                        WideInt::NonNegative(value) => <$type>::try_from(value).ok(),
                    }
                }
            }
        )*
    };
    (unsigned: $($type:ty),*) => {
        $(
            impl IntegralKey for $type {
                #[allow(trivial_numeric_casts)]
                fn widen(self) -> WideInt {
                    WideInt::NonNegative(self as u128)
                }

                fn narrow(wide: WideInt) -> Option<Self> {
                    match wide {
                        WideInt::Negative(_) => None,
                        WideInt::NonNegative(value) => <$type>::try_from(value).ok(),
                    }
                }
            }
        )*
    };
}

impl_integral_key!(signed: i8, i16, i32, i64, i128, isize);
impl_integral_key!(unsigned: u8, u16, u32, u64, u128, usize);

/// Types that can be used to build and query an [IntegralDictionary][crate::IntegralDictionary].
///
/// Every primitive integer converts to itself.
/// Enumerations implement this trait to be looked up by their underlying value:
///
/// ```
/// use fixdict::ToIntegralKey;
///
/// #[derive(Clone, Copy)]
/// #[repr(u8)]
/// enum Color {
///     Red = 1,
///     Green = 2,
/// }
///
/// impl ToIntegralKey for Color {
///     type Key = u8;
///
///     fn to_integral_key(&self) -> u8 {
///         *self as u8
///     }
/// }
///
/// assert_eq!(Color::Green.to_integral_key(), 2);
/// ```
pub trait ToIntegralKey {
    /// The integral representation
    type Key: IntegralKey;

    /// Returns the integral representation of `self`.
    fn to_integral_key(&self) -> Self::Key;
}

macro_rules! impl_to_integral_key {
    ($($type:ty),*) => {
        $(
            impl ToIntegralKey for $type {
                type Key = $type;

                fn to_integral_key(&self) -> $type {
                    *self
                }
            }
        )*
    };
}

impl_to_integral_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: ToIntegralKey + ?Sized> ToIntegralKey for &T {
    type Key = T::Key;

    fn to_integral_key(&self) -> Self::Key {
        (**self).to_integral_key()
    }
}

/// Three-way comparison of the mathematical values of `lhs` and `rhs`.
pub fn three_way<T: IntegralKey, U: IntegralKey>(lhs: T, rhs: U) -> Ordering {
    lhs.widen().cmp(&rhs.widen())
}

/// Returns `true` if `lhs` and `rhs` denote the same number.
pub fn equal<T: IntegralKey, U: IntegralKey>(lhs: T, rhs: U) -> bool {
    three_way(lhs, rhs) == Ordering::Equal
}

/// Returns `true` if `lhs` is less than `rhs`.
pub fn less<T: IntegralKey, U: IntegralKey>(lhs: T, rhs: U) -> bool {
    three_way(lhs, rhs) == Ordering::Less
}

/// Returns `true` if `lhs` is less than or equal to `rhs`.
pub fn less_equal<T: IntegralKey, U: IntegralKey>(lhs: T, rhs: U) -> bool {
    three_way(lhs, rhs) != Ordering::Greater
}

/// Returns `true` if `lhs` is greater than `rhs`.
pub fn greater<T: IntegralKey, U: IntegralKey>(lhs: T, rhs: U) -> bool {
    three_way(lhs, rhs) == Ordering::Greater
}

/// Returns `true` if `lhs` is greater than or equal to `rhs`.
pub fn greater_equal<T: IntegralKey, U: IntegralKey>(lhs: T, rhs: U) -> bool {
    three_way(lhs, rhs) != Ordering::Less
}

/// Returns `true` if `value` is representable in type `T`.
pub fn in_range<T: IntegralKey, U: IntegralKey>(value: U) -> bool {
    greater_equal(value, T::min_value()) && less_equal(value, T::max_value())
}

/// Converts `value` into type `T` if it is representable there.
pub fn cast<T: IntegralKey, U: IntegralKey>(value: U) -> Option<T> {
    if !in_range::<T, U>(value) {
        return None;
    }

    T::narrow(value.widen())
}
