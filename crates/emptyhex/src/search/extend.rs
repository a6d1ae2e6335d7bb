//! One-point extension of a hole-free set.

use rand::Rng;

use super::sink::{CheckpointSink, Snapshot, SnapshotKind};
use super::types::{ExtendCfg, ExtendOutcome};
use crate::error::SearchError;
use crate::explore::Arrangement;
use crate::gen::random_point_in_general_position;
use crate::geom::{check_general_position, Point};
use crate::holes::{count_convex_rholes, count_convex_rholes_at, HoleSplit};

/// Look for one more point that keeps `points` free of `cfg.hole_size`-holes.
///
/// Starts from a random point, then walks the arrangement of `points` around
/// it and keeps the last candidate that does not increase the count. Stops
/// at the first candidate with no hole, saving a `Success` snapshot of the
/// extended set.
pub fn extend<R, S>(
    points: Vec<Point>,
    cfg: ExtendCfg,
    rng: &mut R,
    sink: &mut S,
) -> Result<ExtendOutcome, SearchError>
where
    R: Rng + ?Sized,
    S: CheckpointSink + ?Sized,
{
    cfg.validate()?;
    check_general_position(&points)?;
    let r = cfg.hole_size;
    let existing = count_convex_rholes(&points, r)?;
    if existing != 0 {
        tracing::warn!(holes = existing, r, "initial set already has holes");
    }

    let mut best = random_point_in_general_position(&mut *rng, cfg.bound, &points)?;
    let mut base = count_convex_rholes_at(best, &points, r)?;
    let mut min_h = existing + base.incident - base.covering;
    tracing::info!(points = points.len() + 1, holes = min_h, "extend start");

    let mut regions_checked = 0;
    let mut empty_regions = 0;
    if min_h > 0 {
        let arr = Arrangement::new(best, &points, cfg.bound)?;
        for region in arr.walk(rng.gen(), cfg.max_regions) {
            regions_checked += 1;
            let Some(q) = arr.representative(&region) else {
                empty_regions += 1;
                continue;
            };
            let split = count_convex_rholes_at(q, &points, r)?;
            let new_h = HoleSplit::swapped_count(min_h, base, split);
            let new_h = u64::try_from(new_h).map_err(|_| SearchError::NegativeCount(new_h))?;
            if new_h <= min_h {
                if new_h < min_h {
                    tracing::info!(points = points.len() + 1, holes = new_h, "improved");
                }
                min_h = new_h;
                base = split;
                best = q;
                if min_h == 0 {
                    break;
                }
            }
        }
    }
    tracing::info!(regions = regions_checked, empty = empty_regions, holes = min_h, best = %best, "extend done");

    let extended = min_h == 0;
    let mut points = points;
    if extended {
        points.push(best);
        let snap = Snapshot::now(&points, 0, r, SnapshotKind::Success);
        if let Err(e) = sink.save(&snap) {
            tracing::warn!(error = %e, "checkpoint failed");
        }
    }
    Ok(ExtendOutcome {
        points,
        holes: min_h,
        candidate: best,
        regions_checked,
        empty_regions,
        extended,
    })
}
