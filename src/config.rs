// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Run Configuration

//! Scenario matrix and run parameters for batch planning.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! reproduces the reference run: scenarios (75 ch, 12%) and (90 ch, 15%)
//! against cluster sizes 7, 9 and 13, 15 calls per trial run.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FcaError, Result};
use crate::partition::partition;
use crate::reuse::require_hexagonal;
use crate::types::{DistributionStrategy, DEFAULT_TRIAL_COUNT};

/// One (total channels, control percentage) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub total_channels: u32,
    pub control_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FcaConfig {
    pub scenarios: Vec<ScenarioSpec>,
    pub cluster_sizes: Vec<u32>,
    /// Call attempts per simulation run.
    pub trial_count: u32,
    /// Monte Carlo repetitions per (scenario, cluster size).
    pub runs: usize,
    /// Run `k` is seeded with `base_seed + k`.
    pub base_seed: u64,
    pub strategy: DistributionStrategy,
    /// Guarantee one control channel per cell.
    pub control_floor: bool,
    /// Only accept cluster sizes of the form i² + ij + j².
    pub require_hexagonal: bool,
}

impl Default for FcaConfig {
    fn default() -> Self {
        Self {
            scenarios: vec![
                ScenarioSpec { total_channels: 75, control_percentage: 12.0 },
                ScenarioSpec { total_channels: 90, control_percentage: 15.0 },
            ],
            cluster_sizes: vec![7, 9, 13],
            trial_count: DEFAULT_TRIAL_COUNT,
            runs: 30,
            base_seed: 0,
            strategy: DistributionStrategy::Contiguous,
            control_floor: false,
            require_hexagonal: false,
        }
    }
}

impl FcaConfig {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every scenario and cluster size up front so a batch run fails
    /// before producing partial output.
    pub fn validate(&self) -> Result<()> {
        for scenario in &self.scenarios {
            let pool = partition(scenario.total_channels, scenario.control_percentage)?;
            if self.control_floor {
                for &n in &self.cluster_sizes {
                    pool.with_control_floor(n)?;
                }
            }
        }
        for &n in &self.cluster_sizes {
            if n == 0 {
                return Err(FcaError::from(ConfigError::InvalidClusterSize(n)));
            }
            if self.require_hexagonal {
                require_hexagonal(n)?;
            }
        }
        Ok(())
    }
}
