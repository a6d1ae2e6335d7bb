//! Hill climbing over single-point relocations.

use std::time::Instant;

use rand::Rng;

use super::sink::{CheckpointSink, Snapshot, SnapshotKind};
use super::types::{SearchCfg, SearchOutcome, Termination};
use crate::error::SearchError;
use crate::explore::Arrangement;
use crate::gen::random_point_in_general_position;
use crate::geom::{check_general_position, Point};
use crate::holes::{count_convex_rholes, count_convex_rholes_at, HoleSplit};

/// Minimise the number of `cfg.hole_size`-holes by moving one point at a time.
///
/// `points` (possibly empty) is topped up with random points in general
/// position until it has `cfg.start` points. If the set has no hole, random
/// points are added until it has one. Each round takes a random point out,
/// walks up to `cfg.tries` faces of the arrangement of the others around it,
/// and moves it to every candidate that does not increase the count. The run
/// stops at zero holes, when `cfg.run_time` is spent or after
/// `cfg.max_rounds` rounds; a final snapshot is saved in every case.
pub fn hill_climb<R, S>(
    points: Option<Vec<Point>>,
    cfg: SearchCfg,
    rng: &mut R,
    sink: &mut S,
) -> Result<SearchOutcome, SearchError>
where
    R: Rng + ?Sized,
    S: CheckpointSink + ?Sized,
{
    let points = points.unwrap_or_default();
    cfg.validate(points.len())?;
    Climber::init(points, cfg, rng, sink)?.run()
}

/// Running search state; the point in flight lives outside `pts`.
struct Climber<'a, R: ?Sized, S: ?Sized> {
    cfg: SearchCfg,
    rng: &'a mut R,
    sink: &'a mut S,
    pts: Vec<Point>,
    min_h: u64,
    initial_holes: u64,
    seeded: usize,
    rounds: u64,
    regions_checked: u64,
    moves: u64,
    sideways: u64,
    started: Instant,
    last_save: Instant,
}

impl<'a, R, S> Climber<'a, R, S>
where
    R: Rng + ?Sized,
    S: CheckpointSink + ?Sized,
{
    fn init(
        mut pts: Vec<Point>,
        cfg: SearchCfg,
        rng: &'a mut R,
        sink: &'a mut S,
    ) -> Result<Self, SearchError> {
        let started = Instant::now();
        check_general_position(&pts)?;
        while pts.len() < cfg.start {
            let q = random_point_in_general_position(&mut *rng, cfg.bound, &pts)?;
            pts.push(q);
        }
        let min_h = count_convex_rholes(&pts, cfg.hole_size)?;
        tracing::info!(points = pts.len(), holes = min_h, r = cfg.hole_size, "start");
        let mut climber = Self {
            cfg,
            rng,
            sink,
            pts,
            min_h,
            initial_holes: min_h,
            seeded: 0,
            rounds: 0,
            regions_checked: 0,
            moves: 0,
            sideways: 0,
            started,
            last_save: started,
        };
        climber.seed()?;
        Ok(climber)
    }

    /// Grow the set until there is something to minimise.
    fn seed(&mut self) -> Result<(), SearchError> {
        while self.min_h == 0 {
            let q = random_point_in_general_position(&mut *self.rng, self.cfg.bound, &self.pts)?;
            self.pts.push(q);
            self.seeded += 1;
            self.min_h = count_convex_rholes(&self.pts, self.cfg.hole_size)?;
        }
        if self.seeded > 0 {
            tracing::info!(added = self.seeded, points = self.pts.len(), holes = self.min_h, "seeded");
        }
        self.initial_holes = self.min_h;
        Ok(())
    }

    fn run(mut self) -> Result<SearchOutcome, SearchError> {
        let termination = loop {
            if self.min_h == 0 {
                break Termination::Solved;
            }
            if self.started.elapsed() >= self.cfg.run_time {
                break Termination::TimedOut;
            }
            if self.cfg.max_rounds.is_some_and(|m| self.rounds >= m) {
                break Termination::RoundLimit;
            }
            let recount = count_convex_rholes(&self.pts, self.cfg.hole_size)?;
            if recount != self.min_h {
                tracing::warn!(running = self.min_h, recount, "running count drifted");
                self.min_h = recount;
            }
            tracing::info!(round = self.rounds, points = self.pts.len(), holes = self.min_h, "round");
            if self.last_save.elapsed() >= self.cfg.save_interval {
                self.checkpoint(SnapshotKind::Periodic);
                self.last_save = Instant::now();
            }
            self.round()?;
            self.rounds += 1;
        };
        let kind = if termination.is_success() {
            SnapshotKind::Success
        } else {
            SnapshotKind::Final
        };
        self.checkpoint(kind);
        tracing::info!(
            termination = ?termination,
            rounds = self.rounds,
            regions = self.regions_checked,
            moves = self.moves,
            sideways = self.sideways,
            holes = self.min_h,
            "done"
        );
        Ok(SearchOutcome {
            points: self.pts,
            holes: self.min_h,
            initial_holes: self.initial_holes,
            termination,
            rounds: self.rounds,
            regions_checked: self.regions_checked,
            moves: self.moves,
            sideways_moves: self.sideways,
            seeded: self.seeded,
        })
    }

    /// Take a random point out, relocate it, put it back at the end.
    fn round(&mut self) -> Result<(), SearchError> {
        let idx = self.rng.gen_range(0..self.pts.len());
        let mut p = self.pts.remove(idx);
        let moved = self.relocate(&mut p);
        self.pts.push(p);
        moved
    }

    fn relocate(&mut self, p: &mut Point) -> Result<(), SearchError> {
        let r = self.cfg.hole_size;
        let mut base = count_convex_rholes_at(*p, &self.pts, r)?;
        let arr = Arrangement::new(*p, &self.pts, self.cfg.bound)?;
        let mut walk = arr.walk(self.rng.gen(), Some(self.cfg.tries));
        for region in walk.by_ref() {
            let Some(q) = arr.representative(&region) else {
                continue;
            };
            let split = count_convex_rholes_at(q, &self.pts, r)?;
            let new_h = HoleSplit::swapped_count(self.min_h, base, split);
            let new_h = u64::try_from(new_h).map_err(|_| SearchError::NegativeCount(new_h))?;
            if new_h > self.min_h {
                continue;
            }
            if new_h < self.min_h {
                tracing::info!(points = self.pts.len() + 1, holes = new_h, "improved");
            } else {
                tracing::debug!(from = %p, to = %q, holes = new_h, "sideways move");
                self.sideways += 1;
            }
            self.moves += 1;
            self.min_h = new_h;
            base = split;
            *p = q;
            if new_h == 0 {
                break;
            }
        }
        self.regions_checked += walk.stats().emitted as u64;
        Ok(())
    }

    fn checkpoint(&mut self, kind: SnapshotKind) {
        let snap = Snapshot::now(&self.pts, self.min_h, self.cfg.hole_size, kind);
        if let Err(e) = self.sink.save(&snap) {
            tracing::warn!(error = %e, kind = kind.as_str(), "checkpoint failed; continuing");
        }
    }
}
