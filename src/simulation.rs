// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Call Simulator

//! Randomized call admission against a traffic-channel matrix.
//!
//! Each trial picks a cell uniformly, then a channel uniformly from that
//! cell's list. A cell with no traffic channels blocks the call.
//!
//! Randomness comes from a caller-owned [`TrialSource`]. Any
//! [`rand::RngCore`] (e.g. `ChaCha8Rng`) is a source; [`ScriptedDraws`]
//! replays fixed indices for exact assertions.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::error::{ConfigError, Result};
use crate::types::{CallTrial, SimulationResult};

// ---------------------------------------------------------------------------
// TrialSource
// ---------------------------------------------------------------------------

/// Uniform index draws used by [`simulate`].
pub trait TrialSource {
    /// Index in `0..upper`. `upper` is never zero.
    fn pick_index(&mut self, upper: usize) -> usize;
}

impl<R: RngCore + ?Sized> TrialSource for R {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Deterministic source that replays a fixed index sequence.
///
/// Each queued value is reduced modulo the requested bound. Once the script
/// runs out every draw returns 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: VecDeque<usize>,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self { draws: draws.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl TrialSource for ScriptedDraws {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.draws.pop_front().map_or(0, |d| d % upper)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Run `trial_count` call attempts against `traffic_matrix`.
///
/// `traffic_matrix` must have exactly `cluster_size` rows. Per trial the
/// source is asked for a cell index, then (only if the cell has channels)
/// for a position within that cell's list.
pub fn simulate<S: TrialSource + ?Sized>(
    cluster_size: u32,
    traffic_matrix: &[Vec<u32>],
    trial_count: u32,
    source: &mut S,
) -> Result<SimulationResult> {
    if cluster_size == 0 {
        return Err(ConfigError::InvalidClusterSize(cluster_size).into());
    }
    if traffic_matrix.len() != cluster_size as usize {
        return Err(ConfigError::MatrixShapeMismatch {
            rows: traffic_matrix.len(),
            cluster_size,
        }
        .into());
    }

    let mut trials = Vec::with_capacity(trial_count as usize);
    let mut admitted_count = 0u32;

    for _ in 0..trial_count {
        let cell = source.pick_index(cluster_size as usize);
        let channels = &traffic_matrix[cell];
        let channel = if channels.is_empty() {
            None
        } else {
            Some(channels[source.pick_index(channels.len())])
        };
        if channel.is_some() {
            admitted_count += 1;
        }
        trials.push(CallTrial {
            cell: cell as u32,
            channel,
            admitted: channel.is_some(),
        });
    }

    let success_rate = if trial_count == 0 {
        0.0
    } else {
        admitted_count as f64 / trial_count as f64
    };

    Ok(SimulationResult { trials, trial_count, admitted_count, success_rate })
}
