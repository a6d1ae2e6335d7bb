//! Checkpoint sink: where the driver hands snapshots of its state.
//!
//! The core never touches the file system; the CLI plugs in a JSON writer.
//! Failures are returned to the driver, which logs them and keeps going.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::geom::Point;

/// Why a snapshot was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// Save interval elapsed at a round start.
    Periodic,
    /// Time or round budget ran out.
    Final,
    /// Hole count reached zero.
    Success,
}

impl SnapshotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotKind::Periodic => "periodic",
            SnapshotKind::Final => "final",
            SnapshotKind::Success => "success",
        }
    }
}

/// Borrowed view of the search state at one instant.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub points: &'a [Point],
    pub holes: u64,
    pub hole_size: usize,
    pub kind: SnapshotKind,
    /// Seconds since the Unix epoch.
    pub unix_time: u64,
}

impl<'a> Snapshot<'a> {
    pub fn now(points: &'a [Point], holes: u64, hole_size: usize, kind: SnapshotKind) -> Self {
        Self {
            points,
            holes,
            hole_size,
            kind,
            unix_time: unix_now(),
        }
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("checkpoint io: {0}")]
    Io(#[from] io::Error),
    #[error("checkpoint encoding: {0}")]
    Encode(String),
}

/// Persistence collaborator of the driver.
pub trait CheckpointSink {
    fn save(&mut self, snapshot: &Snapshot<'_>) -> Result<(), CheckpointError>;
}

impl<S: CheckpointSink + ?Sized> CheckpointSink for &mut S {
    fn save(&mut self, snapshot: &Snapshot<'_>) -> Result<(), CheckpointError> {
        (**self).save(snapshot)
    }
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl CheckpointSink for NullSink {
    fn save(&mut self, _snapshot: &Snapshot<'_>) -> Result<(), CheckpointError> {
        Ok(())
    }
}

/// Owned copy of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub points: Vec<Point>,
    pub holes: u64,
    pub hole_size: usize,
    pub kind: SnapshotKind,
}

/// Keeps every snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub saved: Vec<SavedSnapshot>,
}

impl MemorySink {
    pub fn count(&self, kind: SnapshotKind) -> usize {
        self.saved.iter().filter(|s| s.kind == kind).count()
    }

    pub fn last(&self) -> Option<&SavedSnapshot> {
        self.saved.last()
    }
}

impl CheckpointSink for MemorySink {
    fn save(&mut self, snapshot: &Snapshot<'_>) -> Result<(), CheckpointError> {
        self.saved.push(SavedSnapshot {
            points: snapshot.points.to_vec(),
            holes: snapshot.holes,
            hole_size: snapshot.hole_size,
            kind: snapshot.kind,
        });
        Ok(())
    }
}
