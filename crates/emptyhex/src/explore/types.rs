//! Face keys, regions and the float half-planes used to draw them.
//!
//! - `FaceKey`: exact identity of an arrangement face (one side bit per line).
//! - `Region`: an emitted face with its polygon and replay token.
//! - `Hs2`: closed half-plane `n·x <= c` in the pivot-centred frame.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::geom::Turn;

/// Random interior samples tried after the centroid fails.
pub const REPRESENTATIVE_SAMPLES: usize = 16;

/// Closed half-plane `n · x <= c` (no normalization required here).
#[derive(Clone, Copy, Debug)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Signed violation: `<= 0` inside.
    #[inline]
    pub fn excess(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }

    #[inline]
    pub fn satisfies(&self, p: Vector2<f64>) -> bool {
        self.excess(p) <= 0.0
    }

    /// The complementary closed half-plane.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self::new(-self.n, -self.c)
    }

    /// Points strictly left of the directed line `a → b`, closed.
    #[inline]
    pub fn left_of(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        let d = b - a;
        let n = Vector2::new(d.y, -d.x);
        Self::new(n, n.dot(&a))
    }
}

/// Side vector of a face: bit `l` set iff the face lies left of line `l`.
///
/// Two faces of the same arrangement are equal iff their keys are.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceKey(Box<[u64]>);

impl FaceKey {
    pub(crate) fn zeros(lines: usize) -> Self {
        Self(vec![0u64; lines.div_ceil(64)].into_boxed_slice())
    }

    #[inline]
    pub fn side(&self, line: usize) -> Turn {
        if self.0[line / 64] >> (line % 64) & 1 == 1 {
            Turn::Left
        } else {
            Turn::Right
        }
    }

    #[inline]
    pub(crate) fn set_left(&mut self, line: usize) {
        self.0[line / 64] |= 1 << (line % 64);
    }

    /// Key of the face across `line`.
    #[inline]
    pub fn flipped(&self, line: usize) -> Self {
        let mut out = self.clone();
        out.0[line / 64] ^= 1 << (line % 64);
        out
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub(crate) fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One face of the arrangement, as emitted by a walk.
#[derive(Clone, Debug)]
pub struct Region {
    pub key: FaceKey,
    /// Counterclockwise boundary, relative to the pivot. Empty for faces
    /// thinner than `f64` resolves.
    pub vertices: Vec<Vector2<f64>>,
    pub area: f64,
    /// `(walk seed, emission index)`; drives representative sampling.
    pub token: ReplayToken,
}

/// Counters of a finished or running walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Regions handed out.
    pub emitted: usize,
    /// Emitted faces too thin for their `f64` polygon; they carry no
    /// vertices and yield no representative.
    pub thin_faces: usize,
}
