// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Cluster Distributor

//! Spreads each sub-pool across the cells of one cluster.
//!
//! Every cell gets `count / N` channels; the `count % N` leftovers go one each
//! to the lowest-indexed cells. Control channels are numbered
//! `1..=control_count`, traffic channels follow from `control_count + 1`.
//!
//! ```text
//! total = 75, control = 9, N = 7
//!
//! control: base 1, extra 2 → [2, 2, 1, 1, 1, 1, 1]
//! traffic: base 9, extra 3 → [10, 10, 10, 9, 9, 9, 9]
//! ```

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::{ChannelPool, ClusterAssignment, DistributionStrategy};

// ---------------------------------------------------------------------------
// CellShare
// ---------------------------------------------------------------------------

/// Even split of `count` channels over `cells` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellShare {
    pub base: u32,
    pub extra: u32,
}

impl CellShare {
    /// `cells` must be non-zero.
    pub fn split(count: u32, cells: u32) -> Self {
        Self { base: count / cells, extra: count % cells }
    }

    /// Channels owned by `cell`.
    pub fn count_for(&self, cell: u32) -> u32 {
        self.base + u32::from(cell < self.extra)
    }

    /// Offset of `cell`'s first channel within a contiguous layout.
    pub fn offset_of(&self, cell: u32) -> u32 {
        cell * self.base + cell.min(self.extra)
    }
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Distribute `pool` over `cluster_size` cells in contiguous blocks.
pub fn distribute(pool: &ChannelPool, cluster_size: u32) -> Result<ClusterAssignment> {
    distribute_with(pool, cluster_size, DistributionStrategy::Contiguous)
}

/// Distribute `pool` over `cluster_size` cells using `strategy` for numbering.
///
/// Per-cell counts are the same under every strategy; only which channel
/// numbers a cell owns differs.
pub fn distribute_with(
    pool: &ChannelPool,
    cluster_size: u32,
    strategy: DistributionStrategy,
) -> Result<ClusterAssignment> {
    if cluster_size == 0 {
        return Err(ConfigError::InvalidClusterSize(cluster_size).into());
    }

    let control = layout(pool.control_count(), 1, cluster_size, strategy);
    let traffic = layout(pool.voice_count(), pool.traffic_start(), cluster_size, strategy);

    debug!(
        total = pool.total(),
        cluster_size,
        strategy = strategy.as_str(),
        control_base = pool.control_count() / cluster_size,
        traffic_base = pool.voice_count() / cluster_size,
        "distributed channel pool"
    );

    Ok(ClusterAssignment { cluster_size, strategy, control, traffic })
}

/// Lay out `count` channels numbered from `start` across `cells` rows.
fn layout(count: u32, start: u32, cells: u32, strategy: DistributionStrategy) -> Vec<Vec<u32>> {
    let share = CellShare::split(count, cells);
    match strategy {
        DistributionStrategy::Contiguous => (0..cells)
            .map(|cell| {
                let first = start + share.offset_of(cell);
                (first..first + share.count_for(cell)).collect()
            })
            .collect(),
        DistributionStrategy::Interleaved => (0..cells)
            .map(|cell| {
                (0..share.count_for(cell))
                    .map(|round| start + cell + round * cells)
                    .collect()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FcaError;
    use crate::partition::partition;

    fn pool(total: u32, pct: f64) -> ChannelPool {
        partition(total, pct).expect("test: valid pool")
    }

    #[test]
    fn cell_share_matches_remainder_rule() {
        let share = CellShare::split(66, 7);
        assert_eq!(share, CellShare { base: 9, extra: 3 });
        let counts: Vec<u32> = (0..7).map(|c| share.count_for(c)).collect();
        assert_eq!(counts, vec![10, 10, 10, 9, 9, 9, 9]);
        let offsets: Vec<u32> = (0..7).map(|c| share.offset_of(c)).collect();
        assert_eq!(offsets, vec![0, 10, 20, 30, 39, 48, 57]);
    }

    #[test]
    fn reference_scenario_75_channels_cluster_7() {
        let p = pool(75, 12.0);
        let a = distribute(&p, 7).expect("test: valid cluster");

        assert_eq!(a.control_counts(), vec![2, 2, 1, 1, 1, 1, 1]);
        assert_eq!(a.traffic_counts(), vec![10, 10, 10, 9, 9, 9, 9]);

        assert_eq!(a.control_matrix()[0], vec![1, 2]);
        assert_eq!(a.control_matrix()[1], vec![3, 4]);
        assert_eq!(a.control_matrix()[6], vec![9]);
        assert_eq!(a.traffic_matrix()[0], (10..=19u32).collect::<Vec<_>>());
        assert_eq!(a.traffic_matrix()[3], (40..=48u32).collect::<Vec<_>>());
        assert_eq!(a.traffic_matrix()[6], (67..=75u32).collect::<Vec<_>>());
    }

    #[test]
    fn contiguous_rows_are_unbroken_ranges() {
        let a = distribute(&pool(90, 15.0), 13).expect("test: valid cluster");
        for row in a.control_matrix().iter().chain(a.traffic_matrix()) {
            for pair in row.windows(2) {
                assert_eq!(pair[1], pair[0] + 1, "gap inside row {row:?}");
            }
        }
    }

    #[test]
    fn interleaved_assigns_round_robin() {
        let a = distribute_with(&pool(75, 12.0), 7, DistributionStrategy::Interleaved)
            .expect("test: valid cluster");
        assert_eq!(a.control_matrix()[0], vec![1, 8]);
        assert_eq!(a.control_matrix()[1], vec![2, 9]);
        assert_eq!(a.control_matrix()[2], vec![3]);
        assert_eq!(a.traffic_matrix()[0][..3], [10, 17, 24]);
        assert_eq!(a.traffic_counts(), vec![10, 10, 10, 9, 9, 9, 9]);
        assert_eq!(a.strategy(), DistributionStrategy::Interleaved);
    }

    #[test]
    fn oversized_cluster_leaves_cells_empty() {
        let p = pool(10, 30.0); // 3 control, 7 voice
        let a = distribute(&p, 9).expect("test: valid cluster");
        assert_eq!(a.control_counts(), vec![1, 1, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(a.traffic_counts(), vec![1, 1, 1, 1, 1, 1, 1, 0, 0]);
        assert!(a.traffic_matrix()[8].is_empty());
    }

    #[test]
    fn zero_control_pool_starts_traffic_at_one() {
        let a = distribute(&pool(20, 0.0), 4).expect("test: valid cluster");
        assert!(a.control_matrix().iter().all(Vec::is_empty));
        assert_eq!(a.traffic_matrix()[0], vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn cluster_of_one_holds_everything() {
        let a = distribute(&pool(50, 10.0), 1).expect("test: valid cluster");
        assert_eq!(a.control_matrix(), &[(1..=5u32).collect::<Vec<_>>()]);
        assert_eq!(a.traffic_matrix(), &[(6..=50u32).collect::<Vec<_>>()]);
    }

    #[test]
    fn rejects_empty_cluster() {
        let err = distribute(&pool(75, 12.0), 0).expect_err("test: zero cluster");
        assert_eq!(err, FcaError::InvalidConfiguration(ConfigError::InvalidClusterSize(0)));
    }

    #[test]
    fn distribution_is_deterministic() {
        let p = pool(90, 15.0);
        for strategy in [DistributionStrategy::Contiguous, DistributionStrategy::Interleaved] {
            let first = distribute_with(&p, 9, strategy).expect("test: valid cluster");
            let second = distribute_with(&p, 9, strategy).expect("test: valid cluster");
            assert_eq!(first, second);
        }
    }
}
