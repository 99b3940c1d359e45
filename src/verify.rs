// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Matrix Verifier

//! Checks that a [`ClusterAssignment`] accounts for its [`ChannelPool`]:
//!
//! ```text
//! Σ |control row| = control_count
//! Σ |traffic row| = voice_count
//! ∪ rows          = {1, ..., total}   (each exactly once)
//! ```
//!
//! A failure here is a distributor bug, not bad input.

use tracing::error;

use crate::error::{FcaError, Result};
use crate::types::{ChannelPool, ClusterAssignment};

/// True iff both matrices hold exactly as many channels as their sub-pools.
pub fn verify(pool: &ChannelPool, assignment: &ClusterAssignment) -> bool {
    row_total(assignment.control_matrix()) == pool.control_count() as usize
        && row_total(assignment.traffic_matrix()) == pool.voice_count() as usize
}

/// Full invariant check: row counts, sub-pool sums, and that the union of all
/// rows is `1..=total` with no gap or duplicate.
pub fn ensure_exact_partition(pool: &ChannelPool, assignment: &ClusterAssignment) -> Result<()> {
    let accounted = u64::from(pool.control_count()) + u64::from(pool.voice_count());
    if accounted != u64::from(pool.total()) {
        return Err(violation(
            "pool",
            format!("{accounted} sub-pool channels for a total of {}", pool.total()),
        ));
    }

    let cells = assignment.cluster_size() as usize;
    check_rows("control", assignment.control_matrix().len(), cells)?;
    check_rows("traffic", assignment.traffic_matrix().len(), cells)?;

    check_sum("control", row_total(assignment.control_matrix()), pool.control_count())?;
    check_sum("traffic", row_total(assignment.traffic_matrix()), pool.voice_count())?;

    let mut seen = vec![false; pool.total() as usize];
    for (category, matrix, range) in [
        ("control", assignment.control_matrix(), 1..=pool.control_count()),
        ("traffic", assignment.traffic_matrix(), pool.traffic_start()..=pool.total()),
    ] {
        for &channel in matrix.iter().flatten() {
            if !range.contains(&channel) {
                return Err(violation(
                    category,
                    format!("channel {channel} outside {}..={}", range.start(), range.end()),
                ));
            }
            let Some(slot) = seen.get_mut((channel - 1) as usize) else {
                return Err(violation(category, format!("channel {channel} beyond total {}", pool.total())));
            };
            if *slot {
                return Err(violation(category, format!("channel {channel} assigned twice")));
            }
            *slot = true;
        }
    }

    // Sums add up to `total` and every channel is in range and unique, so
    // `seen` is now full.
    Ok(())
}

fn row_total(matrix: &[Vec<u32>]) -> usize {
    matrix.iter().map(Vec::len).sum()
}

fn check_rows(category: &'static str, rows: usize, cells: usize) -> Result<()> {
    if rows != cells {
        return Err(violation(category, format!("{rows} rows for {cells} cells")));
    }
    Ok(())
}

fn check_sum(category: &'static str, distributed: usize, expected: u32) -> Result<()> {
    if distributed != expected as usize {
        return Err(violation(
            category,
            format!("distributed {distributed} of {expected} channels"),
        ));
    }
    Ok(())
}

fn violation(category: &'static str, detail: String) -> FcaError {
    error!(category, %detail, "channel assignment invariant violated");
    FcaError::InvariantViolation { category, detail }
}
