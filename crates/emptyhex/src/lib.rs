//! Local search for planar point sets with few empty convex hexagons.
//!
//! Layout
//! - `geom`: exact lattice points and orientation predicates.
//! - `holes`: r-hole counting oracle and the per-point (A, B) split.
//! - `explore`: faces of the line arrangement around a pivot.
//! - `search`: hill climbing and one-point extension on top of both.
//! - `gen`: starting configurations.
//!
//! API Policy
//! - There is no stable public API; `api` is the curated import surface for
//!   the CLI and experiments.

pub mod api;
pub mod error;
pub mod explore;
pub mod gen;
pub mod geom;
pub mod holes;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{HoleError, SearchError};
pub use geom::{Point, Turn};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{is_general_position, turn, Point, Turn};
    pub use crate::holes::{count_convex_rholes, count_convex_rholes_at, HoleSplit};
    pub use crate::search::{hill_climb, SearchCfg, Termination};
}
