// FCA Benchmark Report Types
// Structured output for the JSON report and console tables

use serde::Serialize;
use fca_engine::{ClusterPlan, ReuseMetrics};

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub seed: u64,
    pub trial_count: u32,
    pub admitted_count: u32,
    pub blocked_count: u32,
    pub success_rate: f64,
    pub admissions_per_cell: Vec<u32>,
}

// ─── Monte Carlo Report (per-cluster aggregation) ───────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub cluster_size: u32,
    pub control_counts: Vec<usize>,
    pub traffic_counts: Vec<usize>,
    pub metrics: ReuseMetrics,
    pub n_runs: usize,
    pub success_rate: Stats,
    pub blocking_probability: Stats,
    pub individual_runs: Vec<RunResult>,
}

/// A cluster size whose assignment did not partition the pool.
#[derive(Debug, Clone, Serialize)]
pub struct FailedCluster {
    pub cluster_size: u32,
    pub category: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario_name: String,
    pub label: String,
    pub total_channels: u32,
    pub control_percentage: f64,
    pub control_count: u32,
    pub voice_count: u32,
    pub clusters: Vec<ClusterReport>,
    pub failures: Vec<FailedCluster>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub strategy: &'static str,
    pub n_runs_per_cluster: usize,
    pub trials_per_run: u32,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub clusters: usize,
    pub verified: usize,
    pub failed: usize,
    pub mean_success_rate: f64,
}

// ─── Console Rendering ──────────────────────────────────────────────────────

/// Rows longer than this are shown as `[first...last]`.
const MAX_LISTED_CHANNELS: usize = 6;

pub fn format_channels(row: &[u32]) -> String {
    match (row.first(), row.last()) {
        (Some(first), Some(last)) if row.len() > MAX_LISTED_CHANNELS => {
            format!("[{first}...{last}]")
        }
        _ => format!("{row:?}"),
    }
}

pub fn print_matrix(title: &str, matrix: &[Vec<u32>]) {
    println!("\n  {title}");
    println!("  {}", "-".repeat(50));
    println!("  {:>4} | {:>5} | Channel Numbers", "Cell", "Count");
    for (cell, row) in matrix.iter().enumerate() {
        println!("  {:>4} | {:>5} | {}", cell + 1, row.len(), format_channels(row));
    }
}

pub fn print_plan(plan: &ClusterPlan) {
    let pool = &plan.pool;
    let n = plan.cluster_size();
    println!("\n  CLUSTER SIZE: {n}");
    println!(
        "  Base channels per cell - Control: {}, Voice: {}",
        pool.control_count() / n,
        pool.voice_count() / n
    );
    println!(
        "  Extra channels to distribute - Control: {}, Voice: {}",
        pool.control_count() % n,
        pool.voice_count() % n
    );
    print_matrix("CONTROL CHANNEL MATRIX", plan.assignment.control_matrix());
    print_matrix("TRAFFIC CHANNEL MATRIX", plan.assignment.traffic_matrix());

    let m = &plan.metrics;
    println!("\n  Reuse Factor: 1/{} = {:.3}", n, m.reuse_factor);
    println!("  SIR: {:.1} dB | Reuse Distance: {:.1}", m.sir_db, m.reuse_distance);
}
