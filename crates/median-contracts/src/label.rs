//! Human-readable labels for the closed enums in this crate.
//!
//! Every enum a rendering layer displays or a user types on the command line
//! implements [`Labeled`]. The label is also the serde name of the variant,
//! so JSON output, `Display`, and `FromStr` agree on one spelling.

use crate::error::{MedianError, MedianResult};

/// A closed enum with a fixed display label per variant.
pub trait Labeled: Sized + Copy + 'static {
    /// Noun used in error messages, e.g. `"prescription status"`.
    const KIND: &'static str;

    /// Every variant in declaration order.
    const ALL: &'static [Self];

    /// The display label of this variant.
    fn label(self) -> &'static str;
}

/// Parse `value` into `T` by case-insensitive label match.
///
/// Surrounding whitespace is ignored. An unmatched value produces
/// `MedianError::UnknownFilter` naming the enum kind.
pub fn parse_label<T: Labeled>(value: &str) -> MedianResult<T> {
    let wanted = value.trim();
    T::ALL
        .iter()
        .copied()
        .find(|v| v.label().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| MedianError::UnknownFilter {
            kind: T::KIND.to_string(),
            value: value.to_string(),
        })
}

/// Implement `Display` and `FromStr` for a [`Labeled`] enum.
#[macro_export]
macro_rules! impl_labeled {
    ($ty:ty) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad($crate::label::Labeled::label(*self))
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::MedianError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::label::parse_label(s)
            }
        }
    };
}
