use angler::catalog::{builtin::builtin_catalog, load_catalog};
use angler::cli::GameRunner;
use angler::core::constants::DECAY_INTERVAL_SECONDS;
use angler::core::{DecayPolicy, GameConfig, SystemClock};
use angler::session::{Mode, Session};
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "angler", version)]
#[command(about = "Turn-based terminal fishing game")]
struct Args {
    /// Directory with fish_data.json, lake_data.json and bait_data.json
    /// (uses the built-in lakes when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Random seed for reproducible casts
    #[arg(long)]
    seed: Option<u64>,

    /// Game mode (10fish or timed); asked at startup when omitted
    #[arg(long)]
    mode: Option<Mode>,

    /// Seconds between timed-mode coin charges
    #[arg(long, default_value_t = DECAY_INTERVAL_SECONDS)]
    decay_seconds: i64,

    /// Charge every missed interval instead of one per check
    #[arg(long, default_value_t = false)]
    catch_up_decay: bool,

    /// Log game events to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "angler=debug" } else { "angler=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = match &args.data_dir {
        Some(dir) => load_catalog(dir)
            .with_context(|| format!("could not load game data from {}", dir.display()))?,
        None => builtin_catalog(),
    };

    let mut config = GameConfig::with_decay_seconds(args.decay_seconds);
    if args.catch_up_decay {
        config.decay_policy = DecayPolicy::CatchUp;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting game");

    let session = Session::with_clock(Arc::new(catalog), config, SystemClock);
    let stdin = io::stdin();
    let mut runner = GameRunner::new(session, &mut rng, stdin.lock(), io::stdout());
    let summary = runner.run(args.mode)?;

    if summary.reason.is_some() {
        println!(
            "Final coins: {:.2} ({} unsold fish)",
            summary.balance, summary.unsold
        );
    }
    Ok(())
}
