//! Region explorer: faces of the line arrangement around a pivot.
//!
//! Purpose
//! - Relocation candidates for a pivot point. Two positions in the same face
//!   of the arrangement of all lines through pairs of the other points give
//!   the same order type with those points, so one candidate per face is
//!   enough to see every combinatorially distinct move.
//!
//! Model
//! - Lines `l = (i, j)` with `i < j` over `others`, clipped to the square box
//!   `[-B, B]²` where `B = max(bound, 1 + max |coord|)`.
//! - A face is named by its `FaceKey`, the exact side of every line. Its
//!   polygon is recomputed in `f64` (pivot-centred) by clipping the box and
//!   only serves to place representatives.
//! - Neighbours are reached by flipping the side of a line that carries an
//!   edge of the face. Edges are found exactly, as non-empty open intervals
//!   on the line, so the walk reaches every face of the box however thin.
//! - `representative` only returns lattice points whose exact side vector
//!   equals the face key, so floating-point slivers never produce a candidate
//!   that breaks general position.

mod clip;
mod exact;
mod types;
mod walk;

pub use types::{FaceKey, Hs2, Region, ReplayToken, WalkStats, REPRESENTATIVE_SAMPLES};
pub use walk::RegionWalk;

use nalgebra::Vector2;
use rand::Rng;

use crate::error::HoleError;
use crate::geom::{turn, Point, Turn, MAX_COORD};
use clip::{area_centroid, ConvexPolygon};
use exact::OpenInterval;

/// Relative size below which polygon vertices are merged.
const MERGE_TOL: f64 = 1e-12;

/// Lines through pairs of `others` and the search box, seen from `pivot`.
#[derive(Clone, Debug)]
pub struct Arrangement<'a> {
    pivot: Point,
    others: &'a [Point],
    lines: Vec<(usize, usize)>,
    /// Left side of each line, pivot-centred.
    left: Vec<Hs2>,
    half_width: i64,
}

impl<'a> Arrangement<'a> {
    /// Build the arrangement. `others` is assumed to be in general position;
    /// the pivot may lie on lines.
    pub fn new(pivot: Point, others: &'a [Point], bound: i64) -> Result<Self, HoleError> {
        if bound <= 0 || bound > MAX_COORD {
            return Err(HoleError::InvalidArgument(format!(
                "search box bound must be in 1..={MAX_COORD}, got {bound}"
            )));
        }
        let mut extent = 0u64;
        for p in std::iter::once(&pivot).chain(others) {
            if !p.in_range() {
                return Err(HoleError::CoordinateOutOfRange(*p));
            }
            extent = extent.max(p.x.unsigned_abs()).max(p.y.unsigned_abs());
        }
        let half_width = (bound as u64).max(extent + 1).min(MAX_COORD as u64) as i64;

        let m = others.len();
        let mut lines = Vec::with_capacity(m * m.saturating_sub(1) / 2);
        let mut left = Vec::with_capacity(lines.capacity());
        let local = |p: Point| p.offset_from(pivot);
        for i in 0..m {
            for j in i + 1..m {
                lines.push((i, j));
                left.push(Hs2::left_of(local(others[i]), local(others[j])));
            }
        }
        Ok(Self {
            pivot,
            others,
            lines,
            left,
            half_width,
        })
    }

    #[inline]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    #[inline]
    pub fn others(&self) -> &'a [Point] {
        self.others
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// `B`: the box is `[-B, B]²`.
    #[inline]
    pub fn half_width(&self) -> i64 {
        self.half_width
    }

    /// Key of the face containing `q`.
    ///
    /// If `q` lies on lines, it is pushed off them by the symbolic offset
    /// `(ε, ε²)`, so the key always names a non-empty face next to `q`.
    pub fn face_of(&self, q: Point) -> FaceKey {
        let mut key = FaceKey::zeros(self.lines.len());
        for (l, &(i, j)) in self.lines.iter().enumerate() {
            let (a, b) = (self.others[i], self.others[j]);
            let left = match turn(a, b, q) {
                Turn::Left => true,
                Turn::Right => false,
                // sign of (b − a) × (ε, ε²)
                Turn::Collinear => {
                    let (dx, dy) = (b.x as i128 - a.x as i128, b.y as i128 - a.y as i128);
                    dy < 0 || (dy == 0 && dx > 0)
                }
            };
            if left {
                key.set_left(l);
            }
        }
        key
    }

    /// Randomised DFS over faces, starting at the pivot's face. At most
    /// `max_regions` regions are emitted; `None` walks until exhaustion.
    pub fn walk(&self, seed: u64, max_regions: Option<usize>) -> RegionWalk<'_> {
        RegionWalk::new(self, seed, max_regions)
    }

    /// Whether line `l` carries an edge of the face `key` inside the open box.
    ///
    /// Exact: the line `a + t·(b − a)` is cut down to the open interval of `t`
    /// on the face's side of every other line and inside the box.
    pub(crate) fn supports_edge(&self, key: &FaceKey, l: usize) -> bool {
        let (a, b) = (self.others[self.lines[l].0], self.others[self.lines[l].1]);
        let (ax, ay) = (a.x as i128, a.y as i128);
        let (dx, dy) = (b.x as i128 - ax, b.y as i128 - ay);
        let w = self.half_width as i128;
        let mut span = OpenInterval::all();
        for (c0, c1) in [(w - ax, -dx), (w + ax, dx), (w - ay, -dy), (w + ay, dy)] {
            span.restrict(c0, c1, true);
        }
        for (k, &(i, j)) in self.lines.iter().enumerate() {
            if k == l {
                continue;
            }
            let (p, q) = (self.others[i], self.others[j]);
            let (ex, ey) = (q.x as i128 - p.x as i128, q.y as i128 - p.y as i128);
            // (q − p) × (a + t·d − p)
            let c0 = ex * (ay - p.y as i128) - ey * (ax - p.x as i128);
            let c1 = ex * dy - ey * dx;
            if !span.restrict(c0, c1, key.side(k) == Turn::Left) {
                return false;
            }
        }
        !span.is_empty()
    }

    /// Keys of the faces sharing an edge with `key`, by line index.
    pub(crate) fn neighbours(&self, key: &FaceKey) -> Vec<FaceKey> {
        (0..self.lines.len())
            .filter(|&l| self.supports_edge(key, l))
            .map(|l| key.flipped(l))
            .collect()
    }

    /// Float polygon of the face named by `key`. Empty when the face is
    /// thinner than `f64` resolves.
    pub(crate) fn face_polygon(&self, key: &FaceKey) -> ConvexPolygon {
        let center = Vector2::new(-self.pivot.x as f64, -self.pivot.y as f64);
        let h = self.half_width as f64;
        let mut poly = ConvexPolygon::square(center, h);
        for (l, hs) in self.left.iter().enumerate() {
            let hs = match key.side(l) {
                Turn::Left => *hs,
                _ => hs.flipped(),
            };
            poly = poly.clip(&hs);
            if poly.is_empty() {
                return poly;
            }
        }
        poly.compact(MERGE_TOL * h);
        poly
    }

    /// A lattice point strictly inside the face of `region`, in the box and
    /// distinct from `others`, or `None`.
    ///
    /// Tries the rounded area centroid first, then `REPRESENTATIVE_SAMPLES`
    /// uniform samples from random fan triangles. The samples are driven by
    /// the region's replay token, so the result is a function of the region.
    pub fn representative(&self, region: &Region) -> Option<Point> {
        let verts = &region.vertices;
        let (_, centroid) = area_centroid(verts)?;
        if let Some(q) = self.lattice_point(centroid).filter(|q| self.admits(*q, &region.key)) {
            return Some(q);
        }
        let mut rng = region.token.to_std_rng();
        for _ in 0..REPRESENTATIVE_SAMPLES {
            let k = rng.gen_range(1..verts.len() - 1);
            let (mut s, mut t) = (rng.gen::<f64>(), rng.gen::<f64>());
            if s + t > 1.0 {
                (s, t) = (1.0 - s, 1.0 - t);
            }
            let x = verts[0] + (verts[k] - verts[0]) * s + (verts[k + 1] - verts[0]) * t;
            if let Some(q) = self.lattice_point(x).filter(|q| self.admits(*q, &region.key)) {
                return Some(q);
            }
        }
        None
    }

    /// Nearest lattice point to a pivot-centred position.
    fn lattice_point(&self, local: Vector2<f64>) -> Option<Point> {
        if !local.x.is_finite() || !local.y.is_finite() {
            return None;
        }
        let limit = 2.0 * MAX_COORD as f64;
        if local.x.abs() > limit || local.y.abs() > limit {
            return None;
        }
        let x = self.pivot.x.checked_add(local.x.round() as i64)?;
        let y = self.pivot.y.checked_add(local.y.round() as i64)?;
        Some(Point::new(x, y))
    }

    /// Exact membership of `q` in the open face `key`, inside the box.
    pub fn admits(&self, q: Point, key: &FaceKey) -> bool {
        let b = self.half_width;
        if q.x.abs() > b || q.y.abs() > b || self.others.contains(&q) {
            return false;
        }
        self.lines
            .iter()
            .enumerate()
            .all(|(l, &(i, j))| turn(self.others[i], self.others[j], q) == key.side(l))
    }
}

#[cfg(test)]
mod tests;
