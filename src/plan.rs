// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Cluster Plan

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distribution::distribute_with;
use crate::error::Result;
use crate::reuse::analyze;
use crate::simulation::{simulate, TrialSource};
use crate::types::{ChannelPool, ClusterAssignment, DistributionStrategy, ReuseMetrics, SimulationResult};
use crate::verify::ensure_exact_partition;

/// Verified assignment plus reuse metrics for one (pool, cluster size) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPlan {
    pub pool: ChannelPool,
    pub assignment: ClusterAssignment,
    pub metrics: ReuseMetrics,
}

impl ClusterPlan {
    /// Distribute, verify and analyze. An assignment that fails verification
    /// is returned as [`crate::FcaError::InvariantViolation`].
    pub fn build(pool: &ChannelPool, cluster_size: u32, strategy: DistributionStrategy) -> Result<Self> {
        let assignment = distribute_with(pool, cluster_size, strategy)?;
        ensure_exact_partition(pool, &assignment)?;
        let metrics = analyze(cluster_size)?;

        debug!(
            total = pool.total(),
            cluster_size,
            sir_db = metrics.sir_db,
            "cluster plan verified"
        );

        Ok(Self { pool: pool.clone(), assignment, metrics })
    }

    pub fn cluster_size(&self) -> u32 {
        self.assignment.cluster_size()
    }

    /// Run `trial_count` call attempts against this plan's traffic matrix.
    pub fn simulate_calls<S: TrialSource + ?Sized>(
        &self,
        trial_count: u32,
        source: &mut S,
    ) -> Result<SimulationResult> {
        simulate(self.cluster_size(), self.assignment.traffic_matrix(), trial_count, source)
    }
}
