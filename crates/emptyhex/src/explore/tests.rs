use super::clip::{area_centroid, ConvexPolygon};
use super::*;
use crate::gen::random_point_in_general_position;
use nalgebra::Vector2;
use rand::{rngs::StdRng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};

fn pts(raw: &[(i64, i64)]) -> Vec<Point> {
    raw.iter().map(|&c| Point::from(c)).collect()
}

fn random_set(n: usize, bound: i64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let q = random_point_in_general_position(&mut rng, bound, &out).unwrap();
        out.push(q);
    }
    out
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// Faces of the line arrangement inside the open box `(-w, w)²`:
/// `1 + L + Σ_v (k_v − 1)` over the vertices inside the box, found by exact
/// rational intersection. Every line must cross the box.
fn boxed_face_count(others: &[Point], w: i64) -> usize {
    let w = w as i128;
    let m = others.len();
    let mut lines = Vec::new();
    for i in 0..m {
        for j in i + 1..m {
            let (a, b) = (others[i], others[j]);
            // a·x + b·y = c with integer coefficients.
            let (la, lb) = ((b.y - a.y) as i128, (a.x - b.x) as i128);
            lines.push((la, lb, la * a.x as i128 + lb * a.y as i128));
        }
    }
    let mut through: FxHashMap<(i128, i128, i128), FxHashSet<usize>> = FxHashMap::default();
    for u in 0..lines.len() {
        for v in u + 1..lines.len() {
            let ((a1, b1, c1), (a2, b2, c2)) = (lines[u], lines[v]);
            let det = a1 * b2 - a2 * b1;
            if det == 0 {
                continue;
            }
            let (mut xn, mut yn, mut d) = (c1 * b2 - c2 * b1, a1 * c2 - a2 * c1, det);
            if d < 0 {
                (xn, yn, d) = (-xn, -yn, -d);
            }
            if xn.abs() >= w * d || yn.abs() >= w * d {
                continue;
            }
            let g = gcd(gcd(xn, yn), d);
            let entry = through.entry((xn / g, yn / g, d / g)).or_default();
            entry.insert(u);
            entry.insert(v);
        }
    }
    1 + lines.len() + through.values().map(|s| s.len() - 1).sum::<usize>()
}

#[test]
fn half_plane_left_of_matches_turn() {
    let (a, b) = (Vector2::new(0.0, 0.0), Vector2::new(2.0, 1.0));
    let hs = Hs2::left_of(a, b);
    assert!(hs.satisfies(Vector2::new(0.0, 1.0)));
    assert!(!hs.satisfies(Vector2::new(1.0, -1.0)));
    assert!(hs.flipped().satisfies(Vector2::new(1.0, -1.0)));
    assert_eq!(hs.excess(Vector2::new(4.0, 2.0)), 0.0);
}

#[test]
fn clipping_keeps_the_inside() {
    let square = ConvexPolygon::square(Vector2::zeros(), 1.0);
    let hs = Hs2::new(Vector2::new(1.0, 0.0), 0.0); // x <= 0
    let half = square.clip(&hs);
    assert_eq!(half.verts.len(), 4);
    assert!(half.verts.iter().all(|v| v.x <= 0.0));
    let (area, c) = area_centroid(&half.verts).unwrap();
    assert!((area - 2.0).abs() < 1e-12);
    assert!((c - Vector2::new(-0.5, 0.0)).norm() < 1e-12);
    let gone = half.clip(&Hs2::new(Vector2::new(-1.0, 0.0), -2.0)); // x >= 2
    assert!(gone.is_empty());
}

#[test]
fn compact_merges_repeated_vertices() {
    let mut poly = ConvexPolygon {
        verts: vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1e-15),
            Vector2::new(0.0, 1.0),
        ],
    };
    poly.compact(1e-9);
    assert_eq!(
        poly.verts,
        vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)]
    );
}

#[test]
fn few_others_give_few_regions() {
    let pivot = Point::new(3, 4);
    for (others, faces) in [
        (vec![], 1),
        (pts(&[(1, 1)]), 1),
        (pts(&[(1, 1), (5, 2)]), 2),
        (pts(&[(0, 0), (10, 1), (2, 9)]), 7),
    ] {
        let arr = Arrangement::new(pivot, &others, 100).unwrap();
        let regions: Vec<Region> = arr.walk(1, None).collect();
        assert_eq!(regions.len(), faces, "others = {others:?}");
        let keys: FxHashSet<FaceKey> = regions.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys.len(), faces);
    }
}

#[test]
fn walk_starts_at_the_pivot_face() {
    let others = random_set(6, 50, 4);
    let pivot = Point::new(3, -2);
    let arr = Arrangement::new(pivot, &others, 100).unwrap();
    let first = arr.walk(9, Some(1)).next().unwrap();
    assert_eq!(first.key, arr.face_of(pivot));
    assert_eq!(first.token, ReplayToken { seed: 9, index: 0 });
}

#[test]
fn exhaustive_walk_visits_every_face_once() {
    for bound in [1_000, 1_000_000, 10_000_000_000] {
        for seed in 0..12 {
            let others = random_set(7, 20, seed);
            let arr = Arrangement::new(Point::new(0, 0), &others, bound).unwrap();
            let mut walk = arr.walk(seed, None);
            let keys: Vec<FaceKey> = walk.by_ref().map(|r| r.key).collect();
            let distinct: FxHashSet<&FaceKey> = keys.iter().collect();
            assert_eq!(distinct.len(), keys.len(), "bound {bound}, seed {seed}");
            assert_eq!(
                keys.len(),
                boxed_face_count(&others, arr.half_width()),
                "bound {bound}, seed {seed}"
            );
            assert_eq!(walk.stats().emitted, keys.len());
            assert_eq!(walk.visited(), keys.len());
        }
    }
}

#[test]
fn small_box_cuts_off_far_vertices() {
    // Nearly parallel lines meet far outside a tight box.
    let others = pts(&[(0, 0), (100, 1), (0, 5), (100, 7)]);
    let arr = Arrangement::new(Point::new(50, 50), &others, 200).unwrap();
    let faces = arr.walk(0, None).count();
    assert_eq!(faces, boxed_face_count(&others, arr.half_width()));
    let wide = Arrangement::new(Point::new(50, 50), &others, 1_000_000).unwrap();
    assert!(wide.walk(0, None).count() > faces);
}

#[test]
fn neighbours_are_mutual_and_differ_in_one_line() {
    let others = random_set(6, 15, 21);
    let arr = Arrangement::new(Point::new(2, -3), &others, 10_000_000_000).unwrap();
    let faces: FxHashSet<FaceKey> = arr.walk(1, None).map(|r| r.key).collect();
    for key in &faces {
        let near = arr.neighbours(key);
        assert!(!near.is_empty());
        for other in near {
            assert!(faces.contains(&other));
            assert!(arr.neighbours(&other).contains(key));
            let flips = (0..arr.line_count())
                .filter(|&l| other.side(l) != key.side(l))
                .count();
            assert_eq!(flips, 1);
        }
    }
}

#[test]
fn wedge_edges_are_found_exactly() {
    // Lines 0 and 1 cross at (0, 0); the wedge opening to the left is bounded
    // by both and never reaches line 2 (x = 10).
    let others = pts(&[(0, 0), (10, 1), (10, -1)]);
    let arr = Arrangement::new(Point::new(20, 0), &others, 100).unwrap();
    let key = arr.face_of(Point::new(-5, 0));
    assert!(arr.supports_edge(&key, 0));
    assert!(arr.supports_edge(&key, 1));
    assert!(!arr.supports_edge(&key, 2));
    assert_eq!(arr.neighbours(&key).len(), 2);
}

#[test]
fn walks_with_different_seeds_find_the_same_faces() {
    let others = random_set(5, 40, 8);
    let arr = Arrangement::new(Point::new(1, 1), &others, 1000).unwrap();
    let a: FxHashSet<FaceKey> = arr.walk(1, None).map(|r| r.key).collect();
    let b: FxHashSet<FaceKey> = arr.walk(2, None).map(|r| r.key).collect();
    assert_eq!(a, b);
    let order_a: Vec<FaceKey> = arr.walk(1, None).map(|r| r.key).collect();
    let order_b: Vec<FaceKey> = arr.walk(1, None).map(|r| r.key).collect();
    assert_eq!(order_a, order_b);
}

#[test]
fn budget_caps_the_walk() {
    let others = random_set(7, 100, 2);
    let arr = Arrangement::new(Point::new(0, 0), &others, 1000).unwrap();
    let mut walk = arr.walk(5, Some(4));
    assert_eq!(walk.by_ref().count(), 4);
    assert_eq!(walk.stats().emitted, 4);
    assert_eq!(arr.walk(5, Some(0)).count(), 0);
}

#[test]
fn representatives_lie_in_their_face() {
    let others = random_set(7, 200, 6);
    let arr = Arrangement::new(Point::new(10, -20), &others, 1000).unwrap();
    let mut found = 0;
    for region in arr.walk(3, None) {
        let Some(q) = arr.representative(&region) else {
            continue;
        };
        found += 1;
        assert_eq!(arr.representative(&region), Some(q));
        assert!(arr.admits(q, &region.key));
        assert_eq!(arr.face_of(q), region.key);
        assert!(crate::geom::extends_general_position(q, &others));
        assert!(q.x.abs() <= arr.half_width() && q.y.abs() <= arr.half_width());
    }
    assert!(found > 0);
}

#[test]
fn lone_region_representative_avoids_the_other_point() {
    let others = pts(&[(0, 0)]);
    let arr = Arrangement::new(Point::new(0, 0), &others, 10).unwrap();
    let region = arr.walk(0, None).next().unwrap();
    let q = arr.representative(&region).unwrap();
    assert_ne!(q, Point::new(0, 0));
}

#[test]
fn box_grows_to_cover_the_points() {
    let others = pts(&[(-500, 3), (7, 8)]);
    let arr = Arrangement::new(Point::new(0, 900), &others, 10).unwrap();
    assert_eq!(arr.half_width(), 901);
    assert_eq!(arr.line_count(), 1);
}

#[test]
fn invalid_arrangements_are_rejected() {
    let others = pts(&[(0, 0), (1, 2)]);
    assert!(matches!(
        Arrangement::new(Point::new(5, 5), &others, 0),
        Err(HoleError::InvalidArgument(_))
    ));
    let far = Point::new(0, MAX_COORD + 1);
    assert_eq!(
        Arrangement::new(far, &others, 10).err(),
        Some(HoleError::CoordinateOutOfRange(far))
    );
}
