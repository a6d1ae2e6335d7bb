//! Configuration and results of the local search.

use std::time::Duration;

use crate::error::SearchError;
use crate::geom::{Point, MAX_COORD};

const SECS_PER_DAY: u64 = 24 * 3600;

/// Hill-climbing configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Regions walked per round.
    pub tries: usize,
    /// Size the starting set is topped up to.
    pub start: usize,
    /// Coordinate bound for random points and the search box.
    pub bound: i64,
    /// `r` of the r-holes being minimised.
    pub hole_size: usize,
    /// Wall-clock budget, polled at round boundaries.
    pub run_time: Duration,
    /// Minimum time between periodic checkpoints.
    pub save_interval: Duration,
    /// Optional hard cap on rounds; `None` runs until success or timeout.
    pub max_rounds: Option<u64>,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            tries: 1000,
            start: 10,
            bound: 1_000_000,
            hole_size: 6,
            run_time: Duration::from_secs(300),
            save_interval: Duration::from_secs(300),
            max_rounds: None,
        }
    }
}

impl SearchCfg {
    /// Replace `run_time` by a whole number of days; `0` keeps it.
    pub fn with_days(mut self, days: u64) -> Self {
        if days > 0 {
            self.run_time = Duration::from_secs(days.saturating_mul(SECS_PER_DAY));
        }
        self
    }

    /// Reject configurations that cannot run. `supplied` is the size of the
    /// caller's starting set.
    pub fn validate(&self, supplied: usize) -> Result<(), SearchError> {
        if self.tries == 0 {
            return Err(SearchError::invalid("tries must be positive"));
        }
        if self.hole_size < 3 {
            return Err(SearchError::invalid(format!(
                "hole size must be at least 3, got {}",
                self.hole_size
            )));
        }
        check_bound(self.bound)?;
        if self.run_time.is_zero() {
            return Err(SearchError::invalid("run time must be positive"));
        }
        if self.start == 0 && supplied == 0 {
            return Err(SearchError::invalid("empty starting set"));
        }
        Ok(())
    }
}

pub(crate) fn check_bound(bound: i64) -> Result<(), SearchError> {
    if bound <= 0 || bound > MAX_COORD {
        return Err(SearchError::invalid(format!(
            "coordinate bound must be in 1..={MAX_COORD}, got {bound}"
        )));
    }
    Ok(())
}

/// Why a hill climb stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No r-hole left.
    Solved,
    TimedOut,
    RoundLimit,
}

impl Termination {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Termination::Solved
    }
}

/// Result of `hill_climb`.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Final point set; the last point is the one moved most recently.
    pub points: Vec<Point>,
    pub holes: u64,
    /// Count after seeding, before the first round.
    pub initial_holes: u64,
    pub termination: Termination,
    pub rounds: u64,
    pub regions_checked: u64,
    /// Accepted relocations, sideways ones included.
    pub moves: u64,
    /// Accepted relocations that kept the count.
    pub sideways_moves: u64,
    /// Points added while seeding.
    pub seeded: usize,
}

/// Configuration for `extend`.
#[derive(Clone, Copy, Debug)]
pub struct ExtendCfg {
    /// Coordinate bound for the starting candidate and the search box.
    pub bound: i64,
    pub hole_size: usize,
    /// Optional cap on walked regions; `None` walks the whole arrangement.
    pub max_regions: Option<usize>,
}

impl Default for ExtendCfg {
    fn default() -> Self {
        Self {
            bound: 10_000_000_000,
            hole_size: 6,
            max_regions: None,
        }
    }
}

impl ExtendCfg {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.hole_size < 3 {
            return Err(SearchError::invalid(format!(
                "hole size must be at least 3, got {}",
                self.hole_size
            )));
        }
        check_bound(self.bound)
    }
}

/// Result of `extend`.
#[derive(Clone, Debug)]
pub struct ExtendOutcome {
    /// Input set, with `candidate` appended iff `extended`.
    pub points: Vec<Point>,
    /// Count of the input set plus `candidate`.
    pub holes: u64,
    /// Best extra point found.
    pub candidate: Point,
    pub regions_checked: usize,
    /// Regions without an admissible lattice point.
    pub empty_regions: usize,
    pub extended: bool,
}
