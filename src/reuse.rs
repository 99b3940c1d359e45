// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Reuse Analyzer

//! Frequency-reuse geometry for hexagonal clusters.
//!
//! ```text
//! reuse factor    = 1 / N
//! reuse distance  q = D / R = sqrt(3N)
//! SIR (dB)        = 10 log10(q^γ / i0),   γ = 3, i0 = 6
//! ```
//!
//! `i0` is the number of first-tier co-channel interferers.

use crate::error::{ConfigError, Result};
use crate::types::ReuseMetrics;

/// First-tier co-channel interferers in a hexagonal layout.
pub const CO_CHANNEL_INTERFERERS: f64 = 6.0;

/// Path-loss exponent used by [`analyze`].
pub const DEFAULT_PATH_LOSS_EXPONENT: f64 = 3.0;

pub fn analyze(cluster_size: u32) -> Result<ReuseMetrics> {
    analyze_with_exponent(cluster_size, DEFAULT_PATH_LOSS_EXPONENT)
}

/// Reuse metrics with an explicit path-loss exponent `gamma`.
pub fn analyze_with_exponent(cluster_size: u32, gamma: f64) -> Result<ReuseMetrics> {
    if cluster_size == 0 {
        return Err(ConfigError::InvalidClusterSize(cluster_size).into());
    }
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(ConfigError::InvalidExponent(gamma).into());
    }

    let n = cluster_size as f64;
    let reuse_distance = (3.0 * n).sqrt();
    let sir_db = 10.0 * (reuse_distance.powf(gamma) / CO_CHANNEL_INTERFERERS).log10();

    Ok(ReuseMetrics {
        cluster_size,
        reuse_factor: 1.0 / n,
        reuse_distance,
        sir_db,
    })
}

/// Shift parameters `(i, j)`, `i >= j >= 0`, with `N = i² + ij + j²`, or
/// `None` if no hexagonal cluster has `n` cells.
pub fn hexagonal_shift(n: u32) -> Option<(u32, u32)> {
    let n = u64::from(n);
    let mut i = 1u64;
    while i * i <= n {
        for j in 0..=i {
            let size = i * i + i * j + j * j;
            if size == n {
                return Some((i as u32, j as u32));
            }
            if size > n {
                break;
            }
        }
        i += 1;
    }
    None
}

/// Reject cluster sizes that cannot tile a hexagonal grid.
pub fn require_hexagonal(cluster_size: u32) -> Result<(u32, u32)> {
    hexagonal_shift(cluster_size)
        .ok_or_else(|| ConfigError::NonHexagonalCluster(cluster_size).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FcaError;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn cluster_seven_metrics() {
        let m = analyze(7).expect("test: valid cluster");
        assert!(close(m.reuse_factor, 0.143, 1e-3), "reuse factor {}", m.reuse_factor);
        assert!(close(m.reuse_distance, 4.583, 1e-3), "reuse distance {}", m.reuse_distance);
        // 10 log10(21^1.5 / 6)
        assert!(close(m.sir_db, 12.05, 0.01), "sir {}", m.sir_db);
    }

    #[test]
    fn fourth_power_law_matches_textbook_value() {
        let m = analyze_with_exponent(7, 4.0).expect("test: valid cluster");
        // 10 log10(21² / 6) = 10 log10(73.5)
        assert!(close(m.sir_db, 18.66, 0.01), "sir {}", m.sir_db);
        assert_eq!(m.reuse_distance, analyze(7).expect("test: valid").reuse_distance);
    }

    #[test]
    fn larger_clusters_trade_capacity_for_sir() {
        let sizes = [7, 9, 13];
        let metrics: Vec<_> = sizes.iter().map(|&n| analyze(n).expect("test: valid")).collect();
        for pair in metrics.windows(2) {
            assert!(pair[1].reuse_factor < pair[0].reuse_factor);
            assert!(pair[1].sir_db > pair[0].sir_db);
        }
        assert!(close(metrics[1].sir_db, 13.689, 0.01), "N=9 sir {}", metrics[1].sir_db);
        assert!(close(metrics[2].sir_db, 16.084, 0.01), "N=13 sir {}", metrics[2].sir_db);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            analyze(0).expect_err("test: zero cluster"),
            FcaError::InvalidConfiguration(ConfigError::InvalidClusterSize(0))
        );
        assert!(analyze_with_exponent(7, 0.0).is_err());
        assert!(analyze_with_exponent(7, f64::NAN).is_err());
    }

    #[test]
    fn hexagonal_shift_known_sizes() {
        assert_eq!(hexagonal_shift(1), Some((1, 0)));
        assert_eq!(hexagonal_shift(3), Some((1, 1)));
        assert_eq!(hexagonal_shift(4), Some((2, 0)));
        assert_eq!(hexagonal_shift(7), Some((2, 1)));
        assert_eq!(hexagonal_shift(9), Some((3, 0)));
        assert_eq!(hexagonal_shift(12), Some((2, 2)));
        assert_eq!(hexagonal_shift(13), Some((3, 1)));
        assert_eq!(hexagonal_shift(21), Some((4, 1)));
    }

    #[test]
    fn non_hexagonal_sizes_rejected() {
        for n in [0, 2, 5, 6, 8, 10, 11, 14] {
            assert_eq!(hexagonal_shift(n), None, "N={n}");
        }
        assert_eq!(
            require_hexagonal(8).expect_err("test: 8 is not hexagonal"),
            FcaError::InvalidConfiguration(ConfigError::NonHexagonalCluster(8))
        );
    }
}
