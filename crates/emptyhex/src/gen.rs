//! Point-set generators.
//!
//! Purpose
//! - Starting configurations for the search: uniform random lattice points
//!   (kept in general position) and two classical families.
//!
//! Families
//! - Horton sets: `2^k` points without empty convex 7-gons, built by
//!   interleaving a scaled copy with a lifted copy of the previous level.
//! - Convex position: Jarník polygon whose edges are the shortest primitive
//!   lattice directions, sorted by angle.

use rand::Rng;

use crate::geom::{extends_general_position, sort_around_point, Point, MAX_COORD};

/// Draws before `random_point_in_general_position` gives up.
pub const MAX_DRAWS: usize = 10_000;

/// Largest Horton level whose coordinates stay below `MAX_COORD`.
const MAX_HORTON_LEVEL: u32 = 11;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenError {
    #[error("invalid generator params: {0}")]
    InvalidParams(String),
    #[error("no point in general position after {draws} draws")]
    Exhausted { draws: usize },
}

/// Named families accepted by `generate_point_set`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointSetKind {
    Random,
    Horton,
    Convex,
}

fn check_bound(bound: i64) -> Result<(), GenError> {
    if bound <= 0 || bound > MAX_COORD {
        return Err(GenError::InvalidParams(format!(
            "coordinate bound must be in 1..={MAX_COORD}, got {bound}"
        )));
    }
    Ok(())
}

/// Uniform lattice point in `[-bound, bound]²`.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, bound: i64) -> Point {
    Point::new(rng.gen_range(-bound..=bound), rng.gen_range(-bound..=bound))
}

/// Random point that keeps `points ∪ {q}` in general position.
pub fn random_point_in_general_position<R: Rng + ?Sized>(
    rng: &mut R,
    bound: i64,
    points: &[Point],
) -> Result<Point, GenError> {
    check_bound(bound)?;
    for _ in 0..MAX_DRAWS {
        let q = random_point(rng, bound);
        if extends_general_position(q, points) {
            return Ok(q);
        }
    }
    Err(GenError::Exhausted { draws: MAX_DRAWS })
}

/// First `n` points of the Horton set of `2^k ≥ n` points.
pub fn horton_set(n: usize) -> Result<Vec<Point>, GenError> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let k = n.next_power_of_two().trailing_zeros();
    if k > MAX_HORTON_LEVEL {
        return Err(GenError::InvalidParams(format!(
            "Horton sets are limited to 2^{MAX_HORTON_LEVEL} points, got {n}"
        )));
    }
    let mut h = horton_level(k);
    h.truncate(n);
    Ok(h)
}

fn horton_level(k: u32) -> Vec<Point> {
    if k == 0 {
        return vec![Point::new(0, 0)];
    }
    // Vertical lift between the even and odd halves.
    let lift = if k <= 1 {
        0
    } else {
        let f = 1i64 << (k * (k - 1) / 2 - 1);
        let f_prev = if k <= 2 { 0 } else { 1i64 << ((k - 1) * (k - 2) / 2 - 1) };
        f - f_prev
    };
    let prev = horton_level(k - 1);
    let mut out = Vec::with_capacity(prev.len() * 2);
    for q in prev {
        out.push(Point::new(2 * q.x, q.y));
        out.push(Point::new(2 * q.x + 1, q.y + lift));
    }
    out
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// The first `n` primitive directions by L1 norm, in symmetric pairs, sorted
/// counterclockwise.
fn primitive_directions(n: usize) -> Vec<Point> {
    let mut dirs = vec![
        Point::new(1, 0),
        Point::new(-1, 0),
        Point::new(0, 1),
        Point::new(0, -1),
    ];
    let mut k = 2;
    'outer: while dirs.len() < n {
        for i in 1..k {
            let j = k - i;
            if gcd(i, j) != 1 {
                continue;
            }
            for d in [(i, j), (-i, -j), (-i, j), (i, -j)] {
                if dirs.len() == n {
                    break 'outer;
                }
                dirs.push(Point::from(d));
            }
        }
        k += 1;
    }
    dirs.truncate(n);
    sort_around_point(Point::new(0, 0), &dirs)
}

/// `n` points in convex and general position with small coordinates.
pub fn convex_position(n: usize) -> Vec<Point> {
    let m = n + (4 - n % 4) % 4;
    let dirs = primitive_directions(m);
    let mut pts = Vec::with_capacity(m);
    let mut cur = Point::new(0, 0);
    for d in dirs {
        pts.push(cur);
        cur = Point::new(cur.x + d.x, cur.y + d.y);
    }
    pts.truncate(n);
    pts
}

/// `n` points of the given family. `bound` only applies to `Random`.
pub fn generate_point_set<R: Rng + ?Sized>(
    kind: PointSetKind,
    n: usize,
    bound: i64,
    rng: &mut R,
) -> Result<Vec<Point>, GenError> {
    match kind {
        PointSetKind::Random => {
            let mut out = Vec::with_capacity(n);
            for _ in 0..n {
                let q = random_point_in_general_position(rng, bound, &out)?;
                out.push(q);
            }
            Ok(out)
        }
        PointSetKind::Horton => horton_set(n),
        PointSetKind::Convex => Ok(convex_position(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{is_general_position, turn, Turn};
    use crate::holes::count_convex_rholes;
    use rand::{rngs::StdRng, SeedableRng};

    fn binomial(n: u64, k: u64) -> u64 {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn horton_eight_matches_the_recursive_construction() {
        let h = horton_set(8).unwrap();
        let expected: Vec<Point> = [(0, 0), (1, 3), (2, 1), (3, 4), (4, 0), (5, 3), (6, 1), (7, 4)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(h, expected);
        assert_eq!(horton_set(5).unwrap(), expected[..5].to_vec());
        assert!(horton_set(0).unwrap().is_empty());
        assert!(horton_set(1 << 12).is_err());
    }

    #[test]
    fn convex_position_is_a_convex_polygon() {
        for n in [3usize, 4, 7, 8, 13] {
            let c = convex_position(n);
            assert_eq!(c.len(), n);
            assert!(is_general_position(&c));
            for k in 0..n {
                assert_eq!(turn(c[k], c[(k + 1) % n], c[(k + 2) % n]), Turn::Left, "n = {n}");
            }
        }
    }

    #[test]
    fn convex_position_has_every_subset_as_a_hole() {
        let c = convex_position(8);
        for r in 3..=8 {
            assert_eq!(count_convex_rholes(&c, r).unwrap(), binomial(8, r as u64));
        }
    }

    #[test]
    fn random_sets_respect_bound_and_general_position() {
        let mut rng = StdRng::seed_from_u64(11);
        let set = generate_point_set(PointSetKind::Random, 25, 50, &mut rng).unwrap();
        assert_eq!(set.len(), 25);
        assert!(is_general_position(&set));
        assert!(set.iter().all(|p| p.x.abs() <= 50 && p.y.abs() <= 50));
        assert!(random_point_in_general_position(&mut rng, 0, &set).is_err());
    }

    #[test]
    fn tiny_grid_runs_out_of_general_position_points() {
        let mut rng = StdRng::seed_from_u64(2);
        // Every lattice point of [-1, 1]² is collinear with two of these.
        let blockers: Vec<Point> = [(-1, -1), (1, -1), (-1, 1), (1, 1), (0, 0)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(
            random_point_in_general_position(&mut rng, 1, &blockers),
            Err(GenError::Exhausted { draws: MAX_DRAWS })
        );
    }
}
