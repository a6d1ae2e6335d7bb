//! Error types shared by the oracle and the search driver.

use crate::gen::GenError;
use crate::geom::Point;

/// Malformed input to a geometric routine.
///
/// All variants are fatal for a search: a broken general-position invariant
/// invalidates every later count.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HoleError {
    #[error("points {a}, {b} and {c} are collinear")]
    Degenerate { a: Point, b: Point, c: Point },
    #[error("point {0} occurs more than once")]
    Duplicate(Point),
    #[error("coordinates of {0} exceed 2^61 in absolute value")]
    CoordinateOutOfRange(Point),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failure of a search run.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Oracle(#[from] HoleError),
    #[error(transparent)]
    Generator(#[from] GenError),
    /// The delta rule produced a negative count; the running state is corrupt.
    #[error("delta rule produced a negative hole count ({0})")]
    NegativeCount(i64),
}

impl SearchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}
