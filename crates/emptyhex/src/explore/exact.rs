//! Exact open intervals on a line parameter `t`.
//!
//! Bounds are ratios of `i128` values below `2^126` in magnitude. Ratios are
//! compared by continued-fraction expansion, so no product is ever formed.

use std::cmp::Ordering;

/// `num / den` with `den > 0`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    /// `num / den` for a nonzero `den` of either sign.
    pub fn new(num: i128, den: i128) -> Self {
        debug_assert!(den != 0);
        if den < 0 {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }
}

/// Compare `a / b` with `c / d` for `b, d > 0`.
fn cmp_fractions(mut a: i128, mut b: i128, mut c: i128, mut d: i128) -> Ordering {
    loop {
        let (qa, ra) = (a.div_euclid(b), a.rem_euclid(b));
        let (qc, rc) = (c.div_euclid(d), c.rem_euclid(d));
        if qa != qc {
            return qa.cmp(&qc);
        }
        match (ra == 0, rc == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        // ra/b vs rc/d, both in (0, 1), orders like d/rc vs b/ra.
        (a, b, c, d) = (d, rc, b, ra);
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_fractions(self.num, self.den, other.num, other.den)
    }
}

/// Open interval `(lo, hi)`; a missing bound is infinite.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OpenInterval {
    lo: Option<Ratio>,
    hi: Option<Ratio>,
    void: bool,
}

impl OpenInterval {
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep the `t` with `c0 + t·c1` strictly positive (or strictly negative
    /// when `positive` is false). Returns whether anything is left.
    pub fn restrict(&mut self, c0: i128, c1: i128, positive: bool) -> bool {
        let (c0, c1) = if positive { (c0, c1) } else { (-c0, -c1) };
        match c1.cmp(&0) {
            Ordering::Equal => self.void |= c0 <= 0,
            Ordering::Greater => {
                let root = Ratio::new(-c0, c1);
                self.lo = Some(self.lo.map_or(root, |lo| lo.max(root)));
            }
            Ordering::Less => {
                let root = Ratio::new(-c0, c1);
                self.hi = Some(self.hi.map_or(root, |hi| hi.min(root)));
            }
        }
        !self.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.void || matches!((self.lo, self.hi), (Some(lo), Some(hi)) if lo >= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_order_exactly_near_the_i128_limit() {
        let big = 1i128 << 125;
        assert!(Ratio::new(big, big - 1) < Ratio::new(big - 1, big - 2));
        assert!(Ratio::new(big - 1, big) < Ratio::new(big, big + 1));
        assert_eq!(Ratio::new(-6, -4), Ratio::new(3, 2));
        assert!(Ratio::new(-7, 3) < Ratio::new(-2, 1));
        assert_eq!(Ratio::new(0, -5), Ratio::new(0, 1));
    }

    #[test]
    fn restrictions_shrink_to_empty() {
        let mut span = OpenInterval::all();
        assert!(span.restrict(-1, 1, true)); // t > 1
        assert!(span.restrict(3, -1, true)); // t < 3
        assert!(!span.restrict(-3, 1, true)); // t > 3
        let mut span = OpenInterval::all();
        assert!(span.restrict(2, 0, true));
        assert!(!span.restrict(2, 0, false));
    }

    #[test]
    fn touching_bounds_leave_nothing() {
        let mut span = OpenInterval::all();
        assert!(span.restrict(0, 1, true)); // t > 0
        assert!(!span.restrict(0, 1, false)); // t < 0
    }
}
