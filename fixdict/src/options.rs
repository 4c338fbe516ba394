//! This module defines the configuration of the dictionary builders.

use std::fmt::Display;

use crate::error::BuildError;

/// Lower bound for the load factor that is actually applied,
/// which limits dense arrays and hash tables to 64 slots per entry
const MIN_EFFECTIVE_LOAD_FACTOR: f64 = 1.0 / 64.0;

/// Kind of the keys of a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Primitive integers and types convertible to them
    Integral,
    /// Strings
    String,
}

impl Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Integral => write!(f, "integral"),
            KeyKind::String => write!(f, "string"),
        }
    }
}

/// Options that control how a dictionary is built.
///
/// All thresholds only influence the choice of the lookup structure,
/// never the result of a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Minimum ratio of present keys to slots for a dense array or a hash table.
    /// Values below 1/64 have the same effect as 1/64.
    pub min_load_factor: f64,
    /// Minimum number of entries of the dense core of an integral dictionary
    pub dense_lookup_threshold: usize,
    /// Searched variants with at least this many entries use binary instead of linear search
    pub binary_search_threshold: usize,
    /// String dictionaries with fewer entries are searched naively
    pub optimization_threshold: usize,
    /// Maximum number of bucket counts tried when building a hash table
    pub max_n_iterations: usize,
    /// Whether the elements of searched arrays are padded to a power-of-two alignment
    pub adjusts_alignment: bool,
    /// String keys are matched ignoring ASCII case
    pub case_insensitive: bool,
    /// Integral entries are already sorted by key
    pub already_sorted: bool,
    /// Keys are known to be distinct, which skips the duplicate check
    pub already_unique: bool,
    /// No entry of an integral dictionary has the default value as its value,
    /// which allows dense arrays to omit their validity flags
    pub default_value_is_always_invalid: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_load_factor: 0.5,
            dense_lookup_threshold: 4,
            binary_search_threshold: 8,
            optimization_threshold: 4,
            max_n_iterations: 1024,
            adjusts_alignment: true,
            case_insensitive: false,
            already_sorted: false,
            already_unique: false,
            default_value_is_always_invalid: false,
        }
    }
}

impl Options {
    /// Set [Options::min_load_factor].
    pub fn with_min_load_factor(mut self, min_load_factor: f64) -> Self {
        self.min_load_factor = min_load_factor;
        self
    }

    /// Set [Options::dense_lookup_threshold].
    pub fn with_dense_lookup_threshold(mut self, threshold: usize) -> Self {
        self.dense_lookup_threshold = threshold;
        self
    }

    /// Set [Options::binary_search_threshold].
    pub fn with_binary_search_threshold(mut self, threshold: usize) -> Self {
        self.binary_search_threshold = threshold;
        self
    }

    /// Set [Options::optimization_threshold].
    pub fn with_optimization_threshold(mut self, threshold: usize) -> Self {
        self.optimization_threshold = threshold;
        self
    }

    /// Set [Options::max_n_iterations].
    pub fn with_max_n_iterations(mut self, max_n_iterations: usize) -> Self {
        self.max_n_iterations = max_n_iterations;
        self
    }

    /// Set [Options::adjusts_alignment].
    pub fn with_adjusts_alignment(mut self, adjusts_alignment: bool) -> Self {
        self.adjusts_alignment = adjusts_alignment;
        self
    }

    /// Set [Options::case_insensitive].
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Set [Options::already_sorted].
    pub fn with_already_sorted(mut self, already_sorted: bool) -> Self {
        self.already_sorted = already_sorted;
        self
    }

    /// Set [Options::already_unique].
    pub fn with_already_unique(mut self, already_unique: bool) -> Self {
        self.already_unique = already_unique;
        self
    }

    /// Set [Options::default_value_is_always_invalid].
    pub fn with_default_value_is_always_invalid(mut self, invalid: bool) -> Self {
        self.default_value_is_always_invalid = invalid;
        self
    }

    /// Load factor used when measuring dense ranges and hash table sizes
    pub(crate) fn effective_load_factor(&self) -> f64 {
        self.min_load_factor.max(MIN_EFFECTIVE_LOAD_FACTOR)
    }

    /// Check that these options are meaningful for dictionaries with keys of the given kind.
    pub fn validate(&self, kind: KeyKind) -> Result<(), BuildError> {
        if !(self.min_load_factor > 0.0 && self.min_load_factor <= 1.0) {
            return Err(BuildError::InvalidOption {
                option: "min_load_factor",
                reason: format!("{} is not in the interval (0, 1]", self.min_load_factor),
            });
        }

        let conflicting = match kind {
            KeyKind::Integral => self.case_insensitive.then_some("case_insensitive"),
            KeyKind::String => {
                if self.already_sorted {
                    Some("already_sorted")
                } else if self.default_value_is_always_invalid {
                    Some("default_value_is_always_invalid")
                } else {
                    None
                }
            }
        };

        match conflicting {
            Some(option) => Err(BuildError::ConflictingOption { option, kind }),
            None => Ok(()),
        }
    }
}
