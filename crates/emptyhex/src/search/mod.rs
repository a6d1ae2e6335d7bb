//! Local search for point sets with few r-holes.
//!
//! Purpose
//! - `hill_climb`: repeatedly relocate one point to the face of the
//!   arrangement (see `explore`) that does not increase the hole count.
//! - `extend`: add one point to a hole-free set while keeping it hole-free.
//!
//! Invariants
//! - The working set stays in general position: candidates come from
//!   `Arrangement::representative`, which checks every line exactly.
//! - The running count equals a full recount. Each candidate is evaluated
//!   with two oracle splits and `HoleSplit::swapped_count`; the count is also
//!   recomputed from scratch at every round start.
//! - Moves with an equal count are accepted, so the search can drift along
//!   plateaus.
//!
//! Lifecycle (`hill_climb`)
//! - init: validate, top up to `start` points, count.
//! - seeding: add random points while the count is zero.
//! - rounds: stop on success, time budget or round cap; otherwise recount,
//!   maybe checkpoint, then relocate one random point.
//! - finish: save a `Success` or `Final` snapshot.

mod climb;
mod extend;
mod sink;
mod types;

pub use climb::hill_climb;
pub use extend::extend;
pub use sink::{
    CheckpointError, CheckpointSink, MemorySink, NullSink, SavedSnapshot, Snapshot, SnapshotKind,
};
pub use types::{ExtendCfg, ExtendOutcome, SearchCfg, SearchOutcome, Termination};
