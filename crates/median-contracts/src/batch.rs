//! Validated batch sizes for the record generators.

use serde::{Deserialize, Serialize};

use crate::error::{MedianError, MedianResult};

/// A non-negative number of records to generate.
///
/// Generators take `usize` directly; this type is the checked conversion
/// used at boundaries where the count arrives signed (CLI flags, TOML).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BatchSize(usize);

impl BatchSize {
    /// Wrap a count that is already known to be valid.
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    /// The number of records requested.
    pub fn get(self) -> usize {
        self.0
    }

    /// Validate a signed count. Negative values are rejected with
    /// `MedianError::InvalidCount` rather than clamped.
    pub fn from_signed(requested: i64) -> MedianResult<Self> {
        usize::try_from(requested)
            .map(Self)
            .map_err(|_| MedianError::InvalidCount { requested })
    }
}

impl TryFrom<i64> for BatchSize {
    type Error = MedianError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_signed(value)
    }
}

impl From<BatchSize> for i64 {
    fn from(size: BatchSize) -> Self {
        i64::try_from(size.0).unwrap_or(i64::MAX)
    }
}
