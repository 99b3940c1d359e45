// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Type Definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of call attempts per simulation run.
pub const DEFAULT_TRIAL_COUNT: u32 = 15;

// ─── Channel Pool ───────────────────────────────────────────────────────────

/// Total channel budget split into control and voice sub-pools.
///
/// Built by [`crate::partition`], which guarantees
/// `control_count + voice_count == total`. Fields are read-only, and
/// deserialized pools are re-checked against the same partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChannelPool")]
pub struct ChannelPool {
    pub(crate) total: u32,
    pub(crate) control_percentage: Decimal,
    pub(crate) control_count: u32,
    pub(crate) voice_count: u32,
}

/// Unchecked wire form of [`ChannelPool`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawChannelPool {
    pub(crate) total: u32,
    pub(crate) control_percentage: Decimal,
    pub(crate) control_count: u32,
    pub(crate) voice_count: u32,
}

impl ChannelPool {
    pub fn total(&self) -> u32 { self.total }
    pub fn control_percentage(&self) -> Decimal { self.control_percentage }
    pub fn control_count(&self) -> u32 { self.control_count }
    pub fn voice_count(&self) -> u32 { self.voice_count }

    /// First channel number of the traffic sub-pool.
    pub fn traffic_start(&self) -> u32 {
        self.control_count + 1
    }
}

// ─── Distribution Strategy ──────────────────────────────────────────────────

/// How channel numbers are laid out inside each cell's share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStrategy {
    /// Each cell owns one contiguous block, cells in ascending order.
    #[default]
    Contiguous,
    /// Round-robin: sub-pool channel `i` belongs to cell `i % N`.
    Interleaved,
}

impl DistributionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contiguous => "contiguous",
            Self::Interleaved => "interleaved",
        }
    }
}

impl std::str::FromStr for DistributionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contiguous" => Ok(Self::Contiguous),
            "interleaved" | "round-robin" => Ok(Self::Interleaved),
            other => Err(format!("unknown distribution strategy: {other}")),
        }
    }
}

// ─── Cluster Assignment ─────────────────────────────────────────────────────

/// Per-cell control and traffic channel lists for one cluster.
///
/// Row `c` of each matrix holds the ascending channel numbers owned by cell
/// `c`. Together the two matrices cover `1..=total` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub(crate) cluster_size: u32,
    pub(crate) strategy: DistributionStrategy,
    pub(crate) control: Vec<Vec<u32>>,
    pub(crate) traffic: Vec<Vec<u32>>,
}

impl ClusterAssignment {
    pub fn cluster_size(&self) -> u32 { self.cluster_size }
    pub fn strategy(&self) -> DistributionStrategy { self.strategy }
    pub fn control_matrix(&self) -> &[Vec<u32>] { &self.control }
    pub fn traffic_matrix(&self) -> &[Vec<u32>] { &self.traffic }

    pub fn control_counts(&self) -> Vec<usize> {
        self.control.iter().map(Vec::len).collect()
    }

    pub fn traffic_counts(&self) -> Vec<usize> {
        self.traffic.iter().map(Vec::len).collect()
    }

    /// Every assigned channel number, control rows first, in cell order.
    pub fn channels(&self) -> impl Iterator<Item = u32> + '_ {
        self.control.iter().chain(self.traffic.iter()).flatten().copied()
    }
}

// ─── Reuse Metrics ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReuseMetrics {
    pub cluster_size: u32,
    /// Fraction of the channel pool available to one cell (1/N).
    pub reuse_factor: f64,
    /// Co-channel distance normalised to the cell radius, sqrt(3N).
    pub reuse_distance: f64,
    pub sir_db: f64,
}

// ─── Call Simulation ────────────────────────────────────────────────────────

/// Outcome of one call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTrial {
    pub cell: u32,
    /// Granted traffic channel; `None` when the cell had nothing to offer.
    pub channel: Option<u32>,
    pub admitted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub trials: Vec<CallTrial>,
    pub trial_count: u32,
    pub admitted_count: u32,
    pub success_rate: f64,
}

impl SimulationResult {
    pub fn blocked_count(&self) -> u32 {
        self.trial_count - self.admitted_count
    }

    pub fn blocking_probability(&self) -> f64 {
        if self.trial_count == 0 {
            0.0
        } else {
            self.blocked_count() as f64 / self.trial_count as f64
        }
    }

    /// Admitted calls tallied by cell index.
    pub fn admissions_per_cell(&self, cluster_size: u32) -> Vec<u32> {
        let mut counts = vec![0u32; cluster_size as usize];
        for trial in self.trials.iter().filter(|t| t.admitted) {
            if let Some(slot) = counts.get_mut(trial.cell as usize) {
                *slot += 1;
            }
        }
        counts
    }
}
