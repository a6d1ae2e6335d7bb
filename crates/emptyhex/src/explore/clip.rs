//! Convex polygons in `f64`, clipped one half-plane at a time.

use nalgebra::Vector2;

use super::types::Hs2;

/// Convex polygon, counterclockwise.
#[derive(Clone, Debug, Default)]
pub(crate) struct ConvexPolygon {
    pub verts: Vec<Vector2<f64>>,
}

impl ConvexPolygon {
    /// Axis-aligned square `[-h, h]²` around `center`.
    pub fn square(center: Vector2<f64>, h: f64) -> Self {
        let verts = [(-h, -h), (h, -h), (h, h), (-h, h)]
            .into_iter()
            .map(|(x, y)| center + Vector2::new(x, y))
            .collect();
        Self { verts }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.len() < 3
    }

    /// Sutherland–Hodgman step against `hs`.
    pub fn clip(&self, hs: &Hs2) -> Self {
        let n = self.verts.len();
        let mut out = Self {
            verts: Vec::with_capacity(n + 1),
        };
        if n == 0 {
            return out;
        }
        for k in 0..n {
            let (cur, nxt) = (self.verts[k], self.verts[(k + 1) % n]);
            let (ec, en) = (hs.excess(cur), hs.excess(nxt));
            let (cur_in, nxt_in) = (ec <= 0.0, en <= 0.0);
            if cur_in {
                out.verts.push(cur);
            }
            if cur_in != nxt_in {
                let t = ec / (ec - en);
                out.verts.push(cur + (nxt - cur) * t);
            }
        }
        out
    }

    /// Drop vertices closer than `tol` to their predecessor.
    pub fn compact(&mut self, tol: f64) {
        let tol2 = tol * tol;
        let mut k = 0;
        while self.verts.len() > 1 && k < self.verts.len() {
            let next = (k + 1) % self.verts.len();
            if (self.verts[next] - self.verts[k]).norm_squared() <= tol2 {
                self.verts.remove(next);
                if next < k {
                    k -= 1;
                }
            } else {
                k += 1;
            }
        }
    }
}

/// Signed area (shoelace) and area centroid. `None` for non-positive area.
pub(crate) fn area_centroid(verts: &[Vector2<f64>]) -> Option<(f64, Vector2<f64>)> {
    let n = verts.len();
    if n < 3 {
        return None;
    }
    // Relative to the first vertex to keep cancellation small.
    let o = verts[0];
    let mut a2 = 0.0;
    let mut c = Vector2::zeros();
    for k in 1..n - 1 {
        let (u, v) = (verts[k] - o, verts[k + 1] - o);
        let w = u.x * v.y - u.y * v.x;
        a2 += w;
        c += (u + v) * w;
    }
    if a2.is_nan() || a2 <= 0.0 {
        return None;
    }
    Some((0.5 * a2, o + c / (3.0 * a2)))
}
