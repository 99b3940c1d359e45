// Monte Carlo Infrastructure — N call-simulation runs per cluster plan
// Run k uses ChaCha8Rng seeded with base_seed + k; aggregates mean ± 95% CI

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use fca_engine::{ClusterPlan, FcaError};
use tracing::debug;

use crate::report::*;
use crate::trial_log::TrialLog;

/// Run a single call simulation with a specific seed.
pub fn run_single(
    plan: &ClusterPlan,
    trial_count: u32,
    seed: u64,
    log: Option<&mut TrialLog>,
) -> fca_engine::Result<RunResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let result = plan.simulate_calls(trial_count, &mut rng)?;

    if let Some(log) = log {
        log.record(seed, &result);
    }

    Ok(RunResult {
        seed,
        trial_count: result.trial_count,
        admitted_count: result.admitted_count,
        blocked_count: result.blocked_count(),
        success_rate: result.success_rate,
        admissions_per_cell: result.admissions_per_cell(plan.cluster_size()),
    })
}

/// Run Monte Carlo: N runs against one plan, aggregate stats.
pub fn run_monte_carlo(
    plan: &ClusterPlan,
    n_runs: usize,
    trial_count: u32,
    base_seed: u64,
    mut log: Option<&mut TrialLog>,
) -> fca_engine::Result<ClusterReport> {
    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(plan, trial_count, seed, log.as_deref_mut())?);
    }
    debug!(cluster_size = plan.cluster_size(), runs = n_runs, "monte carlo complete");

    Ok(aggregate(plan, results))
}

/// Split a build outcome into a runnable plan or a verification failure.
/// Configuration errors are still returned as `Err`.
pub fn classify_plan(
    cluster_size: u32,
    built: fca_engine::Result<ClusterPlan>,
) -> fca_engine::Result<Result<ClusterPlan, FailedCluster>> {
    match built {
        Ok(plan) => Ok(Ok(plan)),
        Err(FcaError::InvariantViolation { category, detail }) => {
            Ok(Err(FailedCluster { cluster_size, category, detail }))
        }
        Err(err) => Err(err),
    }
}

/// Aggregate individual runs into a ClusterReport.
fn aggregate(plan: &ClusterPlan, results: Vec<RunResult>) -> ClusterReport {
    let success_rate = Stats::from_samples(
        &results.iter().map(|r| r.success_rate).collect::<Vec<_>>()
    );
    let blocking_probability = Stats::from_samples(
        &results.iter().map(|r| 1.0 - r.success_rate).collect::<Vec<_>>()
    );

    ClusterReport {
        cluster_size: plan.cluster_size(),
        control_counts: plan.assignment.control_counts(),
        traffic_counts: plan.assignment.traffic_counts(),
        metrics: plan.metrics,
        n_runs: results.len(),
        success_rate,
        blocking_probability,
        individual_runs: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fca_engine::{partition, ConfigError, DistributionStrategy};

    fn plan(total: u32, pct: f64, n: u32) -> ClusterPlan {
        let pool = partition(total, pct).expect("test: valid pool");
        ClusterPlan::build(&pool, n, DistributionStrategy::Contiguous).expect("test: valid plan")
    }

    #[test]
    fn full_clusters_never_block() {
        let report = run_monte_carlo(&plan(75, 12.0, 7), 10, 15, 0, None).expect("test: valid run");
        assert_eq!(report.n_runs, 10);
        assert_eq!(report.success_rate.mean, 1.0);
        assert_eq!(report.blocking_probability.max, 0.0);
    }

    #[test]
    fn runs_are_reproducible_and_logged() {
        let p = plan(10, 30.0, 13);
        let mut log = TrialLog::new();
        let first = run_monte_carlo(&p, 5, 15, 42, Some(&mut log)).expect("test: valid run");
        let second = run_monte_carlo(&p, 5, 15, 42, None).expect("test: valid run");

        assert_eq!(log.len(), 5 * 15);
        let seeds: Vec<u64> = first.individual_runs.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![42, 43, 44, 45, 46]);
        for (a, b) in first.individual_runs.iter().zip(&second.individual_runs) {
            assert_eq!(a.admitted_count, b.admitted_count);
            assert_eq!(a.admissions_per_cell, b.admissions_per_cell);
        }
        // 7 voice channels over 13 cells: cells 7..13 always block.
        assert!(first.success_rate.mean < 1.0);
    }

    #[test]
    fn invariant_violations_become_failed_clusters() {
        let built = Err(FcaError::InvariantViolation {
            category: "traffic",
            detail: "distributed 65 of 66 channels".into(),
        });
        let failed = classify_plan(7, built)
            .expect("test: not a config error")
            .expect_err("test: classified as failure");
        assert_eq!(failed.cluster_size, 7);
        assert_eq!(failed.category, "traffic");

        let ok = classify_plan(7, Ok(plan(75, 12.0, 7))).expect("test: not a config error");
        assert!(ok.is_ok());
    }

    #[test]
    fn configuration_errors_are_not_failed_clusters() {
        let built = Err(FcaError::from(ConfigError::InvalidClusterSize(0)));
        assert!(classify_plan(0, built).is_err());
    }
}
