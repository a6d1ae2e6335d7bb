use anyhow::{Context, Result};
use emptyhex::api::{CheckpointError, CheckpointSink, Point, Snapshot, SnapshotKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// On-disk checkpoint: metadata plus the ordered point list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointDoc {
    pub size: usize,
    pub holes: u64,
    pub hole_size: usize,
    pub unix_time: u64,
    pub kind: String,
    pub code_rev: String,
    pub points: Vec<[i64; 2]>,
}

impl CheckpointDoc {
    pub fn from_snapshot(snap: &Snapshot<'_>) -> Self {
        Self {
            size: snap.points.len(),
            holes: snap.holes,
            hole_size: snap.hole_size,
            unix_time: snap.unix_time,
            kind: snap.kind.as_str().to_string(),
            code_rev: current_git_rev(),
            points: snap.points.iter().map(|&p| p.into()).collect(),
        }
    }
}

/// Accepted input layouts: a checkpoint document or a bare `[[x, y], ...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointSetFile {
    Doc(CheckpointDoc),
    Bare(Vec<[i64; 2]>),
}

/// One entry of a colored point set: `[x, y]` (color 0) or `[x, y, color]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColoredEntry {
    Plain([i64; 2]),
    Colored(i64, i64, u32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColoredFile {
    Doc(CheckpointDoc),
    Bare(Vec<ColoredEntry>),
}

/// `<unix>_<n>_pts_<h>_h.json` for periodic/final snapshots,
/// `<n>_pts_<h>_holes_<unix>.found.json` for successes.
pub fn snapshot_file_name(snap: &Snapshot<'_>) -> String {
    let n = snap.points.len();
    match snap.kind {
        SnapshotKind::Success => format!("{n}_pts_{}_holes_{}.found.json", snap.holes, snap.unix_time),
        SnapshotKind::Periodic | SnapshotKind::Final => {
            format!("{}_{n}_pts_{}_h.json", snap.unix_time, snap.holes)
        }
    }
}

/// Writes each snapshot as a pretty JSON file under `dir`.
#[derive(Debug)]
pub struct JsonCheckpointSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonCheckpointSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("creating checkpoint dir {}", dir.display()))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl CheckpointSink for JsonCheckpointSink {
    fn save(&mut self, snapshot: &Snapshot<'_>) -> Result<(), CheckpointError> {
        let doc = CheckpointDoc::from_snapshot(snapshot);
        let bytes = serde_json::to_vec_pretty(&doc).map_err(|e| CheckpointError::Encode(e.to_string()))?;
        let path = self.dir.join(snapshot_file_name(snapshot));
        // Write then rename so a crash never leaves a truncated checkpoint.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        tracing::info!(path = %path.display(), kind = snapshot.kind.as_str(), "checkpoint");
        self.written.push(path);
        Ok(())
    }
}

pub fn load_point_set<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: PointSetFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing point set {}", path.display()))?;
    let raw = match file {
        PointSetFile::Doc(doc) => doc.points,
        PointSetFile::Bare(points) => points,
    };
    Ok(raw.into_iter().map(Point::from).collect())
}

/// Points and their colors. Checkpoint documents and `[x, y]` entries are
/// color 0.
pub fn load_colored_point_set<P: AsRef<Path>>(path: P) -> Result<(Vec<Point>, Vec<u32>)> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: ColoredFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing colored point set {}", path.display()))?;
    Ok(match file {
        ColoredFile::Doc(doc) => {
            let colors = vec![0; doc.points.len()];
            (doc.points.into_iter().map(Point::from).collect(), colors)
        }
        ColoredFile::Bare(entries) => entries
            .into_iter()
            .map(|e| match e {
                ColoredEntry::Plain(xy) => (Point::from(xy), 0),
                ColoredEntry::Colored(x, y, c) => (Point::new(x, y), c),
            })
            .unzip(),
    })
}

/// Bare `[[x, y], ...]` output, as produced by `generate`.
pub fn write_point_set<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let raw: Vec<[i64; 2]> = points.iter().map(|&p| p.into()).collect();
    fs::write(path, serde_json::to_vec(&raw)?).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Build-time `GIT_COMMIT`, else runtime `GIT_COMMIT`, else `git rev-parse`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Point> {
        [(3, -7), (0, 0), (1_000_000_007, 5), (-2, 9)]
            .into_iter()
            .map(Point::from)
            .collect()
    }

    #[test]
    fn file_names_distinguish_successes() {
        let pts = sample();
        let mut snap = Snapshot {
            points: &pts,
            holes: 12,
            hole_size: 6,
            kind: SnapshotKind::Periodic,
            unix_time: 1700000000,
        };
        assert_eq!(snapshot_file_name(&snap), "1700000000_4_pts_12_h.json");
        snap.kind = SnapshotKind::Success;
        snap.holes = 0;
        assert_eq!(snapshot_file_name(&snap), "4_pts_0_holes_1700000000.found.json");
    }

    #[test]
    fn checkpoint_round_trip_preserves_points_and_order() {
        let dir = tempdir().unwrap();
        let mut sink = JsonCheckpointSink::new(dir.path().join("ckpt")).unwrap();
        let pts = sample();
        let snap = Snapshot::now(&pts, 3, 6, SnapshotKind::Final);
        sink.save(&snap).unwrap();
        assert_eq!(sink.written().len(), 1);
        let path = &sink.written()[0];
        assert_eq!(load_point_set(path).unwrap(), pts);

        let doc: CheckpointDoc = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc.size, 4);
        assert_eq!(doc.holes, 3);
        assert_eq!(doc.kind, "final");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn bare_arrays_load_too() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/set.json");
        write_point_set(&path, &sample()).unwrap();
        assert_eq!(load_point_set(&path).unwrap(), sample());
        fs::write(&path, "[[0, 0], [1, 0], [0, 1], [1, 1]]").unwrap();
        assert_eq!(load_point_set(&path).unwrap().len(), 4);
    }

    #[test]
    fn colored_sets_mix_plain_and_colored_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colored.json");
        fs::write(&path, "[[0, 2, 0], [1, 0, 1], [2, 4], [4, 1, 3]]").unwrap();
        let (points, colors) = load_colored_point_set(&path).unwrap();
        assert_eq!(points[3], Point::new(4, 1));
        assert_eq!(colors, vec![0, 1, 0, 3]);
        fs::write(&path, "[[0, 2, -1]]").unwrap();
        assert!(load_colored_point_set(&path).is_err());

        let mut sink = JsonCheckpointSink::new(dir.path()).unwrap();
        let pts = sample();
        sink.save(&Snapshot::now(&pts, 0, 6, SnapshotKind::Final)).unwrap();
        let (points, colors) = load_colored_point_set(&sink.written()[0]).unwrap();
        assert_eq!(points, pts);
        assert_eq!(colors, vec![0; 4]);
    }

    #[test]
    fn malformed_files_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"points\": 3}").unwrap();
        let err = load_point_set(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing point set"));
        assert!(load_point_set(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn sink_reports_io_failures() {
        let dir = tempdir().unwrap();
        let mut sink = JsonCheckpointSink::new(dir.path()).unwrap();
        fs::remove_dir_all(dir.path()).unwrap();
        let pts = sample();
        let err = sink.save(&Snapshot::now(&pts, 1, 6, SnapshotKind::Periodic)).unwrap_err();
        assert!(matches!(err, CheckpointError::Io(_)));
    }
}
