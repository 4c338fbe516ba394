//! This crate compiles fully known sets of key/value pairs into immutable
//! dictionaries. For each key set, the builder measures the shape of the data
//! (number of entries, density of integer keys, hash collisions of string keys)
//! and selects the lookup structure that suits it best. All structures answer
//! the same `get(key) -> (value, found)` contract.
//!
//! Dictionaries are built once and never modified afterwards, so they can be
//! shared between threads without synchronization. The macros
//! [integral_dictionary] and [string_dictionary] declare such dictionaries as
//! lazily initialized statics.
//!
//! ```
//! use fixdict::{build_integral_map, build_string_map, Options};
//!
//! let numbers = build_integral_map([(10, "a"), (11, "b"), (12, "c")], Options::default())
//!     .expect("keys are unique");
//! assert_eq!(numbers.get(11), (&"b", true));
//! assert_eq!(numbers.get(13), (&"", false));
//!
//! let names = build_string_map([("Red", 1), ("Green", 2)], Options::default())
//!     .expect("keys are unique");
//! assert_eq!(names.lookup("Green"), Some(&2));
//! ```

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod bytesized;
pub mod compare;
pub mod dictionary;
pub mod error;
pub mod hash;
pub mod integral;
pub mod options;
pub mod string;

mod macros;
mod storage;

pub use bytesized::ByteSized;
pub use compare::{IntegralKey, ToIntegralKey};
pub use dictionary::{DictionaryValue, FixedDictionary, Strategy};
pub use error::BuildError;
pub use integral::{build_integral_map, IntegralDictionary};
pub use options::{KeyKind, Options};
pub use string::{
    build_string_map, build_string_map_by_character, build_string_map_by_length,
    StringDictionary,
};

#[doc(hidden)]
pub use once_cell::sync::Lazy;
