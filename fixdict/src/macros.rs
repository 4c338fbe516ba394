//! This module defines macros for declaring dictionaries as statics.
//!
//! The dictionary is built on first access.
//! If the entries or options are malformed, the first access panics
//! with the [BuildError][crate::BuildError] that caused the failure.

/// Declare a lazily built static [IntegralDictionary][crate::IntegralDictionary].
///
/// ```
/// use fixdict::{integral_dictionary, Options, Strategy};
///
/// integral_dictionary! {
///     static HTTP_STATUS: u16 => &'static str = [
///         (200, "OK"),
///         (201, "Created"),
///         (204, "No Content"),
///         (404, "Not Found"),
///     ];
/// }
///
/// integral_dictionary! {
///     static SQUARES: i32 => i64 = [(1, 1), (2, 4), (3, 9)],
///         Options::default().with_default_value_is_always_invalid(true);
/// }
///
/// assert_eq!(HTTP_STATUS.get(404u16), (&"Not Found", true));
/// assert_eq!(HTTP_STATUS.get(-404), (&"", false));
/// assert_eq!(SQUARES.strategy(), Strategy::FullyDense);
/// ```
#[macro_export]
macro_rules! integral_dictionary {
    (@options) => {
        $crate::Options::default()
    };
    (@options $options:expr) => {
        $options
    };
    (
        $(#[$attribute:meta])*
        $visibility:vis static $name:ident: $key:ty => $value:ty = [
            $(($entry_key:expr, $entry_value:expr)),* $(,)?
        ] $(, $options:expr)?;
    ) => {
        $(#[$attribute])*
        $visibility static $name: $crate::Lazy<
            $crate::IntegralDictionary<<$key as $crate::ToIntegralKey>::Key, $value>,
        > = $crate::Lazy::new(|| {
            let options = $crate::integral_dictionary!(@options $($options)?);

            match $crate::build_integral_map::<$key, $value, _>(
                [$(($entry_key, $entry_value)),*],
                options,
            ) {
                Ok(dictionary) => dictionary,
                Err(error) => panic!("failed to build dictionary {}: {}", stringify!($name), error),
            }
        });
    };
}

/// Declare a lazily built static [StringDictionary][crate::StringDictionary].
///
/// ```
/// use fixdict::{string_dictionary, Options};
///
/// string_dictionary! {
///     pub static COLORS: u32 = [
///         ("red", 0xff0000),
///         ("green", 0x00ff00),
///         ("blue", 0x0000ff),
///     ], Options::default().with_case_insensitive(true);
/// }
///
/// assert_eq!(COLORS.lookup("Green"), Some(&0x00ff00));
/// assert!(!COLORS.contains_key("yellow"));
/// ```
#[macro_export]
macro_rules! string_dictionary {
    (@options) => {
        $crate::Options::default()
    };
    (@options $options:expr) => {
        $options
    };
    (
        $(#[$attribute:meta])*
        $visibility:vis static $name:ident: $value:ty = [
            $(($entry_key:expr, $entry_value:expr)),* $(,)?
        ] $(, $options:expr)?;
    ) => {
        $(#[$attribute])*
        $visibility static $name: $crate::Lazy<$crate::StringDictionary<$value>> =
            $crate::Lazy::new(|| {
                let options = $crate::string_dictionary!(@options $($options)?);

                match $crate::build_string_map::<&str, $value, _>(
                    [$(($entry_key, $entry_value)),*],
                    options,
                ) {
                    Ok(dictionary) => dictionary,
                    Err(error) => {
                        panic!("failed to build dictionary {}: {}", stringify!($name), error)
                    }
                }
            });
    };
}
