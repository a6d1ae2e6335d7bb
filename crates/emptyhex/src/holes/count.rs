//! Hole counts: full count, per-point split, and explicit report, for plain
//! and for colored (monochromatic) holes.

use super::fan::{count_fan_chains, FanTri, FirstVertex};
use super::HoleSplit;
use crate::error::HoleError;
use crate::geom::{angular_cmp, check_general_position, in_triangle, turn, Point, Turn};

/// Point colors for monochromatic counts; `None` counts every hole.
///
/// A monochromatic hole has all vertices of one color and no point of any
/// color inside.
#[derive(Clone, Copy, Debug)]
struct Palette<'a>(Option<&'a [u32]>);

const ANY_COLOR: Palette<'static> = Palette(None);

impl Palette<'_> {
    fn of(&self, k: usize) -> Option<u32> {
        self.0.map(|colors| colors[k])
    }

    /// Whether point `k` may be a vertex next to vertices of color `c`.
    fn admits(&self, c: Option<u32>, k: usize) -> bool {
        match (self.0, c) {
            (Some(colors), Some(c)) => colors[k] == c,
            _ => true,
        }
    }
}

fn check_colors(points: &[Point], colors: &[u32]) -> Result<(), HoleError> {
    if colors.len() != points.len() {
        return Err(HoleError::InvalidArgument(format!(
            "{} colors for {} points",
            colors.len(),
            points.len()
        )));
    }
    Ok(())
}

fn check_args(points: &[Point], r: usize) -> Result<(), HoleError> {
    if r < 3 {
        return Err(HoleError::InvalidArgument(format!(
            "hole size must be at least 3, got {r}"
        )));
    }
    if let Some(p) = points.iter().find(|p| !p.in_range()) {
        return Err(HoleError::CoordinateOutOfRange(*p));
    }
    Ok(())
}

/// Indices of the points above `points[b]`, counterclockwise around it.
/// They all lie in the half-plane `[0, π)` seen from the pivot.
fn upper_fan(b: usize, points: &[Point]) -> Vec<usize> {
    let pivot = points[b];
    let mut up: Vec<usize> = (0..points.len())
        .filter(|&k| pivot.is_below(&points[k]))
        .collect();
    up.sort_by(|&u, &v| angular_cmp(pivot, points[u], points[v]));
    up
}

fn triangle_is_empty<I>(a: Point, b: Point, c: Point, mut others: I) -> bool
where
    I: Iterator<Item = Point>,
{
    !others.any(|x| in_triangle(x, a, b, c))
}

/// Number of empty convex `r`-gons ("r-holes") in `points`.
///
/// Every hole is counted once, at its lowest vertex. Points below the pivot
/// cannot be inside a fan triangle, so emptiness is checked against the upper
/// fan only. O(r·n⁴).
pub fn count_convex_rholes(points: &[Point], r: usize) -> Result<u64, HoleError> {
    check_args(points, r)?;
    check_general_position(points)?;
    Ok(count_holes(points, ANY_COLOR, r))
}

/// Number of monochromatic `r`-holes: `colors[k]` is the color of
/// `points[k]`, every vertex shares one color and no point of any color
/// lies inside.
pub fn count_mono_rholes(points: &[Point], colors: &[u32], r: usize) -> Result<u64, HoleError> {
    check_args(points, r)?;
    check_colors(points, colors)?;
    check_general_position(points)?;
    Ok(count_holes(points, Palette(Some(colors)), r))
}

fn count_holes(points: &[Point], palette: Palette<'_>, r: usize) -> u64 {
    let mut total = 0;
    for b in 0..points.len() {
        let anchor = points[b];
        let up = upper_fan(b, points);
        let color = palette.of(b);
        let cand: Vec<usize> = up.iter().copied().filter(|&k| palette.admits(color, k)).collect();
        let [holes, _] = count_fan_chains(anchor, points, &cand, r, FirstVertex::Free, |u, v| {
            FanTri {
                empty: triangle_is_empty(anchor, points[u], points[v], up.iter().map(|&k| points[k])),
                covers: false,
            }
        });
        total += holes;
    }
    total
}

/// Empty triangles; same as `count_convex_rholes(points, 3)`.
pub fn count_empty_triangles(points: &[Point]) -> Result<u64, HoleError> {
    count_convex_rholes(points, 3)
}

/// Split of the `r`-holes around a point `p` that is not in `points`.
///
/// - `incident` (A): holes of `points ∪ {p}` with `p` as a vertex.
/// - `covering` (B): holes of `points` whose interior contains `p`.
///
/// Fails if `p` is in `points` or `points ∪ {p}` is not in general position.
pub fn count_convex_rholes_at(p: Point, points: &[Point], r: usize) -> Result<HoleSplit, HoleError> {
    split_at(p, None, points, ANY_COLOR, r)
}

/// `count_convex_rholes_at` for monochromatic holes, with `p` of color
/// `color`. `covering` counts monochromatic holes of any color around `p`.
pub fn count_mono_rholes_at(
    p: Point,
    color: u32,
    points: &[Point],
    colors: &[u32],
    r: usize,
) -> Result<HoleSplit, HoleError> {
    check_colors(points, colors)?;
    split_at(p, Some(color), points, Palette(Some(colors)), r)
}

fn split_at(
    p: Point,
    color: Option<u32>,
    points: &[Point],
    palette: Palette<'_>,
    r: usize,
) -> Result<HoleSplit, HoleError> {
    check_args(points, r)?;
    if !p.in_range() {
        return Err(HoleError::CoordinateOutOfRange(p));
    }
    if points.contains(&p) {
        return Err(HoleError::Duplicate(p));
    }
    let mut all = Vec::with_capacity(points.len() + 1);
    all.extend_from_slice(points);
    all.push(p);
    check_general_position(&all)?;
    Ok(HoleSplit {
        incident: incident_holes(p, color, points, palette, r),
        covering: covering_holes(p, points, palette, r),
    })
}

/// Holes with `p` as a vertex. For each first vertex `v` (counterclockwise
/// after `p`), the other vertices lie strictly left of the ray `p → v`, which
/// is a contiguous run in the angular order around `p`.
fn incident_holes(p: Point, color: Option<u32>, points: &[Point], palette: Palette<'_>, r: usize) -> u64 {
    let n = points.len();
    let mut order: Vec<usize> = (0..n).filter(|&k| palette.admits(color, k)).collect();
    let m = order.len();
    if m + 1 < r {
        return 0;
    }
    let mut empty = vec![false; n * n];
    for (a, &u) in order.iter().enumerate() {
        for &v in &order[a + 1..] {
            let e = triangle_is_empty(p, points[u], points[v], points.iter().copied());
            empty[u * n + v] = e;
            empty[v * n + u] = e;
        }
    }
    order.sort_by(|&u, &v| angular_cmp(p, points[u], points[v]));

    let mut total = 0;
    let mut cand = Vec::with_capacity(m);
    for s in 0..m {
        let first = order[s];
        cand.clear();
        cand.push(first);
        for step in 1..m {
            let k = order[(s + step) % m];
            if turn(p, points[first], points[k]) != Turn::Left {
                break;
            }
            cand.push(k);
        }
        let [holes, _] = count_fan_chains(p, points, &cand, r, FirstVertex::Pinned, |u, v| FanTri {
            empty: empty[u * n + v],
            covers: false,
        });
        total += holes;
    }
    total
}

/// Holes of `points` that contain `p`: lowest-vertex DP where exactly one fan
/// triangle covers `p`. Pivots not below `p` are skipped.
fn covering_holes(p: Point, points: &[Point], palette: Palette<'_>, r: usize) -> u64 {
    let mut total = 0;
    for b in 0..points.len() {
        let anchor = points[b];
        if !anchor.is_below(&p) {
            continue;
        }
        let up = upper_fan(b, points);
        let color = palette.of(b);
        let cand: Vec<usize> = up.iter().copied().filter(|&k| palette.admits(color, k)).collect();
        let [_, covering] = count_fan_chains(anchor, points, &cand, r, FirstVertex::Free, |u, v| {
            let (pu, pv) = (points[u], points[v]);
            FanTri {
                empty: triangle_is_empty(anchor, pu, pv, up.iter().map(|&k| points[k])),
                covers: in_triangle(p, anchor, pu, pv),
            }
        });
        total += covering;
    }
    total
}

/// All `r`-holes of `points`, each as its vertices in counterclockwise order
/// starting at the lowest vertex.
pub fn report_convex_rholes(points: &[Point], r: usize) -> Result<Vec<Vec<Point>>, HoleError> {
    check_args(points, r)?;
    check_general_position(points)?;
    Ok(report_holes(points, ANY_COLOR, r))
}

/// All monochromatic `r`-holes, listed like `report_convex_rholes`.
pub fn report_mono_rholes(points: &[Point], colors: &[u32], r: usize) -> Result<Vec<Vec<Point>>, HoleError> {
    check_args(points, r)?;
    check_colors(points, colors)?;
    check_general_position(points)?;
    Ok(report_holes(points, Palette(Some(colors)), r))
}

fn report_holes(points: &[Point], palette: Palette<'_>, r: usize) -> Vec<Vec<Point>> {
    let mut out = Vec::new();
    for b in 0..points.len() {
        let anchor = points[b];
        let up = upper_fan(b, points);
        let color = palette.of(b);
        let fan: Vec<Point> = up
            .iter()
            .filter(|&&k| palette.admits(color, k))
            .map(|&k| points[k])
            .collect();
        let m = fan.len();
        if m + 1 < r {
            continue;
        }
        let mut empty = vec![false; m * m];
        for i in 0..m {
            for j in i + 1..m {
                empty[i * m + j] = triangle_is_empty(anchor, fan[i], fan[j], up.iter().map(|&k| points[k]));
            }
        }
        let ctx = ReportCtx {
            anchor,
            fan: &fan,
            empty: &empty,
            r,
        };
        let mut chain = Vec::with_capacity(r);
        for i in 0..m {
            for j in i + 1..m {
                if empty[i * m + j] {
                    chain.clear();
                    chain.extend([i, j]);
                    ctx.extend(&mut chain, &mut out);
                }
            }
        }
    }
    out
}

struct ReportCtx<'a> {
    anchor: Point,
    fan: &'a [Point],
    empty: &'a [bool],
    r: usize,
}

impl ReportCtx<'_> {
    fn extend(&self, chain: &mut Vec<usize>, out: &mut Vec<Vec<Point>>) {
        let m = self.fan.len();
        let (i, j) = (chain[chain.len() - 2], chain[chain.len() - 1]);
        if chain.len() + 1 == self.r {
            if turn(self.fan[i], self.fan[j], self.anchor) == Turn::Left {
                let mut hole = Vec::with_capacity(self.r);
                hole.push(self.anchor);
                hole.extend(chain.iter().map(|&k| self.fan[k]));
                out.push(hole);
            }
            return;
        }
        for l in j + 1..m {
            if self.empty[j * m + l] && turn(self.fan[i], self.fan[j], self.fan[l]) == Turn::Left {
                chain.push(l);
                self.extend(chain, out);
                chain.pop();
            }
        }
    }
}
