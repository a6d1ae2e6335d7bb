//! Exact orientation predicates on lattice points.

use std::cmp::Ordering;

use super::types::{Point, Turn};
use crate::error::HoleError;

type Dir = (i128, i128);

#[inline]
fn dir(from: Point, to: Point) -> Dir {
    (to.x as i128 - from.x as i128, to.y as i128 - from.y as i128)
}

#[inline]
fn cross_dirs(u: Dir, v: Dir) -> i128 {
    u.0 * v.1 - u.1 * v.0
}

/// 0 for directions in `[0, π)`, 1 for `[π, 2π)`. The zero vector lands in 0.
#[inline]
fn half(d: Dir) -> u8 {
    if d.1 > 0 || (d.1 == 0 && d.0 >= 0) {
        0
    } else {
        1
    }
}

/// Twice the signed area of `(a, b, c)`; positive for a counterclockwise triple.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> i128 {
    cross_dirs(dir(a, b), dir(a, c))
}

/// Orientation of `(a, b, c)`: sign of `(b − a) × (c − a)`.
#[inline]
pub fn turn(a: Point, b: Point, c: Point) -> Turn {
    match cross(a, b, c).cmp(&0) {
        Ordering::Greater => Turn::Left,
        Ordering::Less => Turn::Right,
        Ordering::Equal => Turn::Collinear,
    }
}

/// `x` lies strictly inside triangle `(a, b, c)` (either orientation).
#[inline]
pub fn in_triangle(x: Point, a: Point, b: Point, c: Point) -> bool {
    let t = turn(a, b, x);
    t != Turn::Collinear && turn(b, c, x) == t && turn(c, a, x) == t
}

/// Counterclockwise angular order around `pivot`, starting at the positive x-axis.
/// Ties on the same ray are broken by distance.
pub fn angular_cmp(pivot: Point, a: Point, b: Point) -> Ordering {
    let (da, db) = (dir(pivot, a), dir(pivot, b));
    half(da)
        .cmp(&half(db))
        .then_with(|| 0.cmp(&cross_dirs(da, db)))
        .then_with(|| norm2(da).cmp(&norm2(db)))
}

#[inline]
fn norm2(d: Dir) -> u128 {
    let (x, y) = (d.0.unsigned_abs(), d.1.unsigned_abs());
    x * x + y * y
}

/// Points sorted counterclockwise around `pivot`.
pub fn sort_around_point(pivot: Point, points: &[Point]) -> Vec<Point> {
    let mut out = points.to_vec();
    out.sort_by(|a, b| angular_cmp(pivot, *a, *b));
    out
}

/// `Ok` iff no point repeats and no three points are collinear.
///
/// For every point the directions to all others are folded into `[0, π)` and
/// sorted; a collinear triple shows up as two adjacent parallel directions.
/// O(n² log n).
pub fn check_general_position(points: &[Point]) -> Result<(), HoleError> {
    let mut dirs: Vec<(usize, Dir)> = Vec::with_capacity(points.len());
    for (i, &a) in points.iter().enumerate() {
        dirs.clear();
        for (j, &b) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = dir(a, b);
            if d == (0, 0) {
                return Err(HoleError::Duplicate(a));
            }
            let d = if half(d) == 0 { d } else { (-d.0, -d.1) };
            dirs.push((j, d));
        }
        dirs.sort_by(|u, v| 0.cmp(&cross_dirs(u.1, v.1)));
        for w in dirs.windows(2) {
            if cross_dirs(w[0].1, w[1].1) == 0 {
                return Err(HoleError::Degenerate {
                    a,
                    b: points[w[0].0],
                    c: points[w[1].0],
                });
            }
        }
    }
    Ok(())
}

#[inline]
pub fn is_general_position(points: &[Point]) -> bool {
    check_general_position(points).is_ok()
}

/// `q` can join `points` without breaking general position.
pub fn extends_general_position(q: Point, points: &[Point]) -> bool {
    if points.contains(&q) {
        return false;
    }
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            if turn(a, b, q) == Turn::Collinear {
                return false;
            }
        }
    }
    true
}
