//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface for the CLI and experiments;
//!   breaking changes are allowed.

// Exact geometry
pub use crate::geom::{
    check_general_position, extends_general_position, in_triangle, is_general_position,
    sort_around_point, turn, Point, Turn, MAX_COORD,
};
// Oracle
pub use crate::holes::{
    count_convex_rholes, count_convex_rholes_at, count_empty_triangles, count_mono_rholes,
    count_mono_rholes_at, report_convex_rholes, report_mono_rholes, HoleSplit,
};
// Region explorer
pub use crate::explore::{Arrangement, FaceKey, Region, RegionWalk, WalkStats};
// Local search
pub use crate::search::{
    extend, hill_climb, CheckpointError, CheckpointSink, ExtendCfg, ExtendOutcome, MemorySink,
    NullSink, SearchCfg, SearchOutcome, Snapshot, SnapshotKind, Termination,
};
// Generators
pub use crate::gen::{
    convex_position, generate_point_set, horton_set, random_point,
    random_point_in_general_position, GenError, PointSetKind,
};
// Errors
pub use crate::error::{HoleError, SearchError};
