//! Error-handling module for the crate

use thiserror::Error;

use crate::{dictionary::Strategy, options::KeyKind};

/// Errors that abort the construction of a dictionary.
///
/// Each of these errors describes a malformed key set or an inconsistent [Options][crate::Options] value.
/// Looking up keys never fails.
#[allow(variant_size_differences)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two entries have the same key (after case folding, if requested)
    #[error("duplicate key {key}")]
    DuplicateKey {
        /// Debug representation of the offending key
        key: String,
    },
    /// Case-insensitive matching was requested for a key with non-ASCII characters
    #[error("key {key:?} contains non-ASCII characters, which is not supported for case-insensitive dictionaries")]
    NonAsciiKey {
        /// The offending key
        key: String,
    },
    /// An option was set that has no meaning for the given kind of key
    #[error("option `{option}` cannot be used with {kind} keys")]
    ConflictingOption {
        /// Name of the option
        option: &'static str,
        /// Kind of the keys of the dictionary
        kind: KeyKind,
    },
    /// An option has a value outside of its domain
    #[error("invalid value for option `{option}`: {reason}")]
    InvalidOption {
        /// Name of the option
        option: &'static str,
        /// Description of the problem
        reason: String,
    },
    /// The value of an entry is the default value, although
    /// `default_value_is_always_invalid` promises that this never happens
    #[error("value of key {key} equals the default value, but default values were declared invalid")]
    DefaultValueIsValid {
        /// Debug representation of the offending key
        key: String,
    },
    /// A specific strategy was requested but cannot represent the given keys
    #[error("strategy {strategy:?} is not applicable: {reason}")]
    NotApplicable {
        /// The requested strategy
        strategy: Strategy,
        /// Why the keys do not qualify
        reason: &'static str,
    },
}
