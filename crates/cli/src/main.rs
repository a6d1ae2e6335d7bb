use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use emptyhex::api::{
    check_general_position, count_convex_rholes, count_mono_rholes, extend, generate_point_set,
    hill_climb, report_convex_rholes, report_mono_rholes, ExtendCfg, PointSetKind, SearchCfg,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

mod checkpoint;

use checkpoint::{load_colored_point_set, load_point_set, write_point_set, JsonCheckpointSink};

/// Exit status when the time or round budget ran out before success.
const EXIT_BUDGET: u8 = 2;

#[derive(Parser)]
#[command(name = "emptyhex-cli")]
#[command(about = "Local search for point sets without empty convex hexagons")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Hill-climb towards a set with no r-holes
    Climb {
        /// Starting set (checkpoint JSON or bare [[x, y], ...])
        #[arg(long)]
        input: Option<PathBuf>,
        /// Regions walked per round
        #[arg(long, default_value_t = 1000)]
        tries: usize,
        /// Size the starting set is topped up to
        #[arg(long, default_value_t = 10)]
        start: usize,
        /// Maximum absolute coordinate of random points
        #[arg(long, default_value_t = 1_000_000)]
        bound: i64,
        /// Run time in seconds
        #[arg(long, default_value_t = 300)]
        run_time: u64,
        /// Run time in days; overrides --run-time when positive
        #[arg(long, default_value_t = 0)]
        days: u64,
        /// Seconds between periodic checkpoints
        #[arg(long, default_value_t = 300)]
        save_interval: u64,
        #[arg(long, default_value_t = 6)]
        hole_size: usize,
        #[arg(long)]
        max_rounds: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Add one point to a hole-free set, keeping it hole-free
    Extend {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 10_000_000_000)]
        bound: i64,
        #[arg(long, default_value_t = 6)]
        hole_size: usize,
        /// Cap on walked regions (default: whole arrangement)
        #[arg(long)]
        max_regions: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Count the r-holes of a point set
    Count {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 6)]
        hole_size: usize,
        /// Also list every hole
        #[arg(long)]
        report: bool,
        /// Count monochromatic holes; entries may be [x, y, color]
        #[arg(long)]
        mono: bool,
    },
    /// Write a named point-set family as bare JSON
    Generate {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long)]
        n: usize,
        #[arg(long, default_value_t = 1_000_000)]
        bound: i64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Random,
    Horton,
    Convex,
}

impl From<Kind> for PointSetKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Random => PointSetKind::Random,
            Kind::Horton => PointSetKind::Horton,
            Kind::Convex => PointSetKind::Convex,
        }
    }
}

fn main() -> Result<ExitCode> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Climb {
            input,
            tries,
            start,
            bound,
            run_time,
            days,
            save_interval,
            hole_size,
            max_rounds,
            seed,
            out_dir,
        } => {
            let cfg = SearchCfg {
                tries,
                start,
                bound,
                hole_size,
                run_time: Duration::from_secs(run_time),
                save_interval: Duration::from_secs(save_interval),
                max_rounds,
            }
            .with_days(days);
            climb(input, cfg, seed, out_dir)
        }
        Action::Extend {
            input,
            bound,
            hole_size,
            max_regions,
            seed,
            out_dir,
        } => {
            let cfg = ExtendCfg {
                bound,
                hole_size,
                max_regions,
            };
            extend_set(input, cfg, seed, out_dir)
        }
        Action::Count {
            input,
            hole_size,
            report,
            mono,
        } => count(input, hole_size, report, mono),
        Action::Generate {
            kind,
            n,
            bound,
            seed,
            out,
        } => generate(kind, n, bound, seed, out),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn climb(input: Option<PathBuf>, cfg: SearchCfg, seed: Option<u64>, out_dir: PathBuf) -> Result<ExitCode> {
    tracing::info!(input = ?input, seed = ?seed, out_dir = %out_dir.display(), "climb");
    let points = input.as_ref().map(load_point_set).transpose()?;
    let mut rng = make_rng(seed);
    let mut sink = JsonCheckpointSink::new(&out_dir)?;
    let outcome = hill_climb(points, cfg, &mut rng, &mut sink).context("hill climb")?;
    let summary = serde_json::json!({
        "size": outcome.points.len(),
        "holes": outcome.holes,
        "initial_holes": outcome.initial_holes,
        "termination": format!("{:?}", outcome.termination),
        "rounds": outcome.rounds,
        "regions_checked": outcome.regions_checked,
        "moves": outcome.moves,
        "sideways_moves": outcome.sideways_moves,
        "checkpoints": sink.written(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(if outcome.termination.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_BUDGET)
    })
}

fn extend_set(input: PathBuf, cfg: ExtendCfg, seed: Option<u64>, out_dir: PathBuf) -> Result<ExitCode> {
    tracing::info!(input = %input.display(), seed = ?seed, "extend");
    let points = load_point_set(&input)?;
    let mut rng = make_rng(seed);
    let mut sink = JsonCheckpointSink::new(&out_dir)?;
    let outcome = extend(points, cfg, &mut rng, &mut sink).context("extend")?;
    let summary = serde_json::json!({
        "extended": outcome.extended,
        "size": outcome.points.len(),
        "holes": outcome.holes,
        "candidate": <[i64; 2]>::from(outcome.candidate),
        "regions_checked": outcome.regions_checked,
        "empty_regions": outcome.empty_regions,
        "checkpoints": sink.written(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(if outcome.extended {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_BUDGET)
    })
}

fn count(input: PathBuf, hole_size: usize, report: bool, mono: bool) -> Result<ExitCode> {
    let (points, colors) = if mono {
        load_colored_point_set(&input)?
    } else {
        (load_point_set(&input)?, Vec::new())
    };
    check_general_position(&points).with_context(|| format!("{} is not in general position", input.display()))?;
    let holes = if mono {
        count_mono_rholes(&points, &colors, hole_size)?
    } else {
        count_convex_rholes(&points, hole_size)?
    };
    tracing::info!(size = points.len(), holes, hole_size, mono, "count");
    let mut out = serde_json::json!({
        "size": points.len(),
        "hole_size": hole_size,
        "mono": mono,
        "holes": holes,
    });
    if report {
        let found = if mono {
            report_mono_rholes(&points, &colors, hole_size)?
        } else {
            report_convex_rholes(&points, hole_size)?
        };
        let listed: Vec<Vec<[i64; 2]>> = found
            .into_iter()
            .map(|h| h.into_iter().map(<[i64; 2]>::from).collect())
            .collect();
        out["report"] = serde_json::json!(listed);
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(ExitCode::SUCCESS)
}

fn generate(kind: Kind, n: usize, bound: i64, seed: Option<u64>, out: PathBuf) -> Result<ExitCode> {
    tracing::info!(n, bound, out = %out.display(), "generate");
    let mut rng = make_rng(seed);
    let points = generate_point_set(kind.into(), n, bound, &mut rng)?;
    write_point_set(&out, &points)?;
    Ok(ExitCode::SUCCESS)
}
