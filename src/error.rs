//! Error types for textchain.

use crate::env::PropertyKey;
use std::fmt;

/// Result type alias for textchain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textchain operations.
///
/// Layout degradations (width too small, truncated passes) are reported
/// through [`LayoutStatus`](crate::layout::LayoutStatus) instead; an `Error`
/// always means the request itself was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// Effect range `[start, end)` covers no characters.
    EmptyRange { start: usize, end: usize },
    /// A new effect crosses (partially overlaps) an existing effect on the
    /// same property. Ranges are in element indices, inclusive.
    CrossingEffect {
        key: PropertyKey,
        existing: (usize, usize),
        requested: (usize, usize),
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::EmptyRange { start, end } => {
                write!(f, "empty effect range [{start}, {end})")
            }
            Self::CrossingEffect {
                key,
                existing,
                requested,
            } => {
                write!(
                    f,
                    "effect on {key:?} over elements {}..={} crosses existing effect over {}..={}",
                    requested.0, requested.1, existing.0, existing.1
                )
            }
        }
    }
}

impl std::error::Error for Error {}
