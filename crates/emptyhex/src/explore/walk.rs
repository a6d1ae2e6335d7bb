//! Randomised depth-first walk over arrangement faces.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashSet;

use super::clip::area_centroid;
use super::types::{FaceKey, Region, ReplayToken, WalkStats};
use super::Arrangement;

/// Lazy stream of faces, each emitted at most once.
///
/// Faces are marked visited when popped, so a key pushed twice is expanded
/// once. The walk ends when the budget is spent or the stack runs dry.
pub struct RegionWalk<'a> {
    arr: &'a Arrangement<'a>,
    seed: u64,
    rng: StdRng,
    budget: Option<usize>,
    stack: Vec<FaceKey>,
    visited: FxHashSet<FaceKey>,
    stats: WalkStats,
}

impl<'a> RegionWalk<'a> {
    pub(crate) fn new(arr: &'a Arrangement<'a>, seed: u64, budget: Option<usize>) -> Self {
        Self {
            arr,
            seed,
            rng: StdRng::seed_from_u64(seed),
            budget,
            stack: vec![arr.face_of(arr.pivot())],
            visited: FxHashSet::default(),
            stats: WalkStats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Faces popped so far; equals `stats().emitted` once the stack has
    /// been drained.
    #[inline]
    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}

impl Iterator for RegionWalk<'_> {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        if self.budget.is_some_and(|b| self.stats.emitted >= b) {
            return None;
        }
        while let Some(key) = self.stack.pop() {
            if !self.visited.insert(key.clone()) {
                continue;
            }
            let mut next = self.arr.neighbours(&key);
            next.retain(|k| !self.visited.contains(k));
            next.shuffle(&mut self.rng);
            self.stack.extend(next);

            let poly = self.arr.face_polygon(&key);
            let area = match area_centroid(&poly.verts) {
                Some((area, _)) => area,
                None => {
                    self.stats.thin_faces += 1;
                    0.0
                }
            };
            let token = ReplayToken {
                seed: self.seed,
                index: self.stats.emitted as u64,
            };
            self.stats.emitted += 1;
            return Some(Region {
                key,
                vertices: if area > 0.0 { poly.verts } else { Vec::new() },
                area,
                token,
            });
        }
        None
    }
}
