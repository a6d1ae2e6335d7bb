//! Convex fan chains around an anchor vertex.
//!
//! A convex polygon `anchor, v1, ..., v_{r-1}` (counterclockwise) is empty iff
//! every fan triangle `(anchor, v_i, v_{i+1})` is empty: in general position
//! no point can sit on a diagonal. The chain DP below counts such polygons
//! over candidates that are already sorted counterclockwise around the anchor
//! and span less than a half-turn.

use crate::geom::{turn, Point, Turn};

/// Flags of the fan triangle `(anchor, u, v)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FanTri {
    /// No point of the ambient set lies strictly inside.
    pub empty: bool,
    /// The probe point lies strictly inside.
    pub covers: bool,
}

/// Whether the first chain vertex may be any candidate or must be `cand[0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FirstVertex {
    Free,
    Pinned,
}

/// Count empty convex `r`-gons with `anchor` as the extreme vertex.
///
/// `cand` indexes into `pts` and must be sorted counterclockwise around
/// `anchor` within an open half-plane. `tri(u, v)` is queried for `u` before
/// `v` in that order.
///
/// Returns `[plain, covering]`: polygons whose fans cover the probe point zero
/// times and exactly once (it can never be covered twice).
pub(crate) fn count_fan_chains<F>(
    anchor: Point,
    pts: &[Point],
    cand: &[usize],
    r: usize,
    first: FirstVertex,
    tri: F,
) -> [u64; 2]
where
    F: Fn(usize, usize) -> FanTri,
{
    let m = cand.len();
    if r < 3 || m + 1 < r {
        return [0, 0];
    }
    let at = |i: usize, j: usize| i * m + j;
    let mut flags = vec![FanTri::default(); m * m];
    for i in 0..m {
        for j in i + 1..m {
            flags[at(i, j)] = tri(cand[i], cand[j]);
        }
    }

    // ways[c][i*m + j]: chains anchor, ..., cand[i], cand[j] with c covering fans.
    let mut ways = [vec![0u64; m * m], vec![0u64; m * m]];
    let first_end = match first {
        FirstVertex::Free => m,
        FirstVertex::Pinned => 1,
    };
    for i in 0..first_end {
        for j in i + 1..m {
            let f = flags[at(i, j)];
            if f.empty {
                ways[f.covers as usize][at(i, j)] = 1;
            }
        }
    }

    for _ in 3..r {
        let mut next = [vec![0u64; m * m], vec![0u64; m * m]];
        for i in 0..m {
            for j in i + 1..m {
                let (w0, w1) = (ways[0][at(i, j)], ways[1][at(i, j)]);
                if w0 == 0 && w1 == 0 {
                    continue;
                }
                let (pi, pj) = (pts[cand[i]], pts[cand[j]]);
                for l in j + 1..m {
                    let f = flags[at(j, l)];
                    if !f.empty || turn(pi, pj, pts[cand[l]]) != Turn::Left {
                        continue;
                    }
                    if f.covers {
                        next[1][at(j, l)] += w0;
                    } else {
                        next[0][at(j, l)] += w0;
                        next[1][at(j, l)] += w1;
                    }
                }
            }
        }
        ways = next;
    }

    let mut total = [0u64; 2];
    for i in 0..m {
        for j in i + 1..m {
            let (w0, w1) = (ways[0][at(i, j)], ways[1][at(i, j)]);
            if w0 == 0 && w1 == 0 {
                continue;
            }
            // Convex at the last chain vertex.
            if turn(pts[cand[i]], pts[cand[j]], anchor) == Turn::Left {
                total[0] += w0;
                total[1] += w1;
            }
        }
    }
    total
}
