//! Hole-counting oracle.
//!
//! Purpose
//! - Count empty convex r-gons ("r-holes") of a point set exactly.
//! - Count the holes that involve one extra point `p`, split into the part
//!   that `p` creates (A) and the part it destroys (B), so that moving a single
//!   point can be evaluated from two local queries instead of a full recount.
//! - The same counts for colored sets, where only monochromatic holes count
//!   (`*_mono_*`). The delta rule holds unchanged for them.
//!
//! Algorithm
//! - For every pivot, the relevant points are sorted counterclockwise and a
//!   DP over convex chains counts polygons whose fan triangles are all empty
//!   (see `fan`). Exact integer orientation throughout.
//!
//! Delta rule
//! - With `p ∈ S`, `q ∉ S` and `T = S \ {p}`:
//!   `H(T ∪ {q}) = H(S) + A(q, T) − A(p, T) + B(p, T) − B(q, T)`,
//!   which follows from `H(T ∪ {x}) = H(T) + A(x, T) − B(x, T)`.

mod count;
mod fan;

pub use count::{
    count_convex_rholes, count_convex_rholes_at, count_empty_triangles, count_mono_rholes,
    count_mono_rholes_at, report_convex_rholes, report_mono_rholes,
};

/// Holes around a point `p` relative to a set not containing it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoleSplit {
    /// A: holes of `S ∪ {p}` having `p` as a vertex.
    pub incident: u64,
    /// B: holes of `S` whose interior contains `p`.
    pub covering: u64,
}

impl HoleSplit {
    /// Hole count after replacing the point described by `removed` with the
    /// one described by `inserted`, both split against the same remainder.
    #[inline]
    pub fn swapped_count(current: u64, removed: HoleSplit, inserted: HoleSplit) -> i64 {
        current as i64 + inserted.incident as i64 - removed.incident as i64
            + removed.covering as i64
            - inserted.covering as i64
    }
}
