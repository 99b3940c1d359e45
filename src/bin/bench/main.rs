// FCA Benchmark Runner — fixed channel assignment across a scenario matrix
// Partition → distribute → verify → reuse analysis → Monte Carlo call admission
//
// Usage:
//   cargo run --release --bin fca-bench                          # Reference run (30 runs each)
//   cargo run --release --bin fca-bench -- --runs 5              # Quick mode
//   cargo run --release --bin fca-bench -- 90CH                  # Filter by scenario name
//   cargo run --release --bin fca-bench -- --config run.json     # Scenario matrix from JSON
//   cargo run --release --bin fca-bench -- --trial-log           # Enable JSONL output

mod report;
mod scenarios;
mod monte_carlo;
mod trial_log;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fca_engine::adapter::from_decimal;
use fca_engine::{partition, ClusterPlan, DistributionStrategy, FcaConfig};
use report::*;
use scenarios::*;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use trial_log::TrialLog;

const RESULTS_DIR: &str = "fca-results";

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "fca-bench",
    about = "Fixed channel assignment planner and call admission benchmark"
)]
struct Args {
    /// JSON run configuration (defaults apply to missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Monte Carlo runs per (scenario, cluster size)
    #[arg(long)]
    runs: Option<usize>,

    /// Call attempts per run
    #[arg(long)]
    trials: Option<u32>,

    /// Base seed; run k uses seed + k
    #[arg(long)]
    seed: Option<u64>,

    /// Channel numbering: contiguous or interleaved
    #[arg(long)]
    strategy: Option<DistributionStrategy>,

    /// Give every cell at least one control channel
    #[arg(long)]
    control_floor: bool,

    /// Write per-trial JSONL under fca-results/trials/
    #[arg(long)]
    trial_log: bool,

    /// Print full channel matrices for every cluster
    #[arg(long)]
    matrices: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only run scenarios whose name or label contains this
    filter: Option<String>,
}

fn load_config(args: &Args) -> Result<FcaConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            FcaConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => FcaConfig::default(),
    };

    if let Some(runs) = args.runs { config.runs = runs; }
    if let Some(trials) = args.trials { config.trial_count = trials; }
    if let Some(seed) = args.seed { config.base_seed = seed; }
    if let Some(strategy) = args.strategy { config.strategy = strategy; }
    if args.control_floor { config.control_floor = true; }

    config.validate().context("invalid run configuration")?;
    Ok(config)
}

/// Smallest and largest per-cell count, e.g. `9-10`.
fn count_range(counts: &[usize]) -> String {
    let lo = counts.iter().min().copied().unwrap_or(0);
    let hi = counts.iter().max().copied().unwrap_or(0);
    format!("{lo}-{hi}")
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args)?;
    let all_scenarios = scenarios(&config);

    let to_run: Vec<&Scenario> = match &args.filter {
        Some(f) => all_scenarios.iter().filter(|s| s.matches(f)).collect(),
        None => all_scenarios.iter().collect(),
    };
    if to_run.is_empty() {
        bail!("no scenarios match filter: {:?}", args.filter);
    }

    let trial_dir = args.trial_log.then(|| Path::new(RESULTS_DIR).join("trials"));

    println!("\n  FCA Benchmark Runner v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "  PRNG: ChaCha8Rng | Runs/cluster: {} | Trials/run: {} | Base seed: {} | Strategy: {}",
        config.runs, config.trial_count, config.base_seed, config.strategy.as_str()
    );
    info!(scenarios = to_run.len(), clusters = config.cluster_sizes.len(), "starting run");

    let suite_start = Instant::now();
    let mut scenario_reports = Vec::with_capacity(to_run.len());

    for scenario in &to_run {
        let spec = &scenario.spec;
        let base_pool = partition(spec.total_channels, spec.control_percentage)?;

        println!("\n  {}", "=".repeat(88));
        println!("  {}", scenario.label);
        println!("  {}", "=".repeat(88));
        println!(
            "  Total Channels: {} | Control: {} ({}%) | Voice: {}",
            base_pool.total(), base_pool.control_count(),
            spec.control_percentage, base_pool.voice_count()
        );
        println!("\n  {:>7} {:>9} {:>9} {:>8} {:>9} {:>14} {:>8}",
            "Cluster", "Ctrl/cell", "Traf/cell", "Reuse", "SIR(dB)", "Success%", "Verify");
        println!("  {}", "-".repeat(70));

        let mut clusters = Vec::with_capacity(config.cluster_sizes.len());
        let mut failures = Vec::new();
        for &n in &config.cluster_sizes {
            let pool = if config.control_floor {
                base_pool.with_control_floor(n)?
            } else {
                base_pool.clone()
            };

            let built = ClusterPlan::build(&pool, n, config.strategy);
            let plan = match monte_carlo::classify_plan(n, built)? {
                Ok(plan) => plan,
                Err(failed) => {
                    error!(scenario = %scenario.name, cluster_size = n, "verification failed: {}", failed.detail);
                    println!("  {:>7} {:>9} {:>9} {:>8} {:>9} {:>14} {:>8}",
                        n, "-", "-", "-", "-", "-", "FAIL");
                    failures.push(failed);
                    continue;
                }
            };

            let mut log = trial_dir.as_ref().map(|_| TrialLog::new());
            let report = monte_carlo::run_monte_carlo(
                &plan, config.runs, config.trial_count, config.base_seed, log.as_mut(),
            )?;

            if let (Some(log), Some(dir)) = (&log, &trial_dir) {
                let path = dir.join(format!("{}-n{}.jsonl", scenario.name.to_lowercase(), n));
                match log.write_jsonl(&path) {
                    Ok(()) => debug!(records = log.len(), "trial log written to {}", path.display()),
                    Err(e) => error!("failed to write trial log {}: {}", path.display(), e),
                }
            }

            println!("  {:>7} {:>9} {:>9} {:>8.3} {:>9.1} {:>8.1}±{:<5.1} {:>8}",
                n,
                count_range(&report.control_counts),
                count_range(&report.traffic_counts),
                report.metrics.reuse_factor,
                report.metrics.sir_db,
                report.success_rate.mean * 100.0,
                report.success_rate.half_width() * 100.0,
                "OK",
            );
            if args.matrices {
                print_plan(&plan);
            }

            clusters.push(report);
        }

        scenario_reports.push(ScenarioReport {
            scenario_name: scenario.name.clone(),
            label: scenario.label.clone(),
            total_channels: base_pool.total(),
            control_percentage: from_decimal(base_pool.control_percentage()),
            control_count: base_pool.control_count(),
            voice_count: base_pool.voice_count(),
            clusters,
            failures,
        });
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let all_clusters: Vec<&ClusterReport> =
        scenario_reports.iter().flat_map(|s| s.clusters.iter()).collect();
    let verified = all_clusters.len();
    let failed: usize = scenario_reports.iter().map(|s| s.failures.len()).sum();
    let total = verified + failed;
    let mean_success_rate = if verified > 0 {
        all_clusters.iter().map(|c| c.success_rate.mean).sum::<f64>() / verified as f64
    } else {
        0.0
    };

    println!("\n  {}", "-".repeat(70));
    println!("  Clusters: {}  Verified: {}  Failed: {}  Suite time: {:.2}s\n",
        total, verified, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        strategy: config.strategy.as_str(),
        n_runs_per_cluster: config.runs,
        trials_per_run: config.trial_count,
        summary: Summary { clusters: total, verified, failed, mean_success_rate },
        scenarios: scenario_reports,
    };

    let dir = Path::new(RESULTS_DIR);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {RESULTS_DIR}/"))?;
    let path = dir.join(format!("fca-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, &json).with_context(|| format!("writing {}", path.display()))?;
    info!("results saved to {}", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
