// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Channel Partitioner

//! Splits a total channel budget into control and voice sub-pools.
//!
//! ```text
//! control = ceil(total * pct / 100)
//! voice   = total - control
//! ```
//!
//! The percentage is carried as a `Decimal`, so the ceiling never picks up
//! an extra channel from binary rounding.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::adapter::{ceil_to_u32, to_decimal};
use crate::error::{ConfigError, FcaError, Result};
use crate::types::{ChannelPool, RawChannelPool};

const HUNDRED: Decimal = dec!(100);

/// Partition `total` channels with `control_pct` percent reserved for control.
pub fn partition(total: u32, control_pct: f64) -> Result<ChannelPool> {
    let pct = to_decimal(control_pct)
        .ok_or_else(|| ConfigError::InvalidPercentage(control_pct.to_string()))?;
    partition_exact(total, pct)
}

/// Same as [`partition`] with the percentage already in decimal form.
pub fn partition_exact(total: u32, control_pct: Decimal) -> Result<ChannelPool> {
    if total == 0 {
        return Err(ConfigError::InvalidTotal(total).into());
    }
    if control_pct < Decimal::ZERO || control_pct > HUNDRED {
        return Err(ConfigError::InvalidPercentage(control_pct.to_string()).into());
    }

    let raw = Decimal::from(total) * control_pct / HUNDRED;
    let control_count = ceil_to_u32(raw)
        .ok_or_else(|| ConfigError::InvalidPercentage(control_pct.to_string()))?;
    if control_count > total {
        return Err(ConfigError::ControlExceedsTotal { control: control_count, total }.into());
    }

    Ok(ChannelPool {
        total,
        control_percentage: control_pct,
        control_count,
        voice_count: total - control_count,
    })
}

impl ChannelPool {
    /// Raise the control sub-pool to at least `min_control` channels, taking
    /// them from the voice sub-pool.
    ///
    /// Passing the cluster size guarantees every cell one control channel.
    pub fn with_control_floor(&self, min_control: u32) -> Result<ChannelPool> {
        if min_control > self.total {
            return Err(ConfigError::ControlExceedsTotal {
                control: min_control,
                total: self.total,
            }
            .into());
        }
        let control_count = self.control_count.max(min_control);
        Ok(ChannelPool {
            total: self.total,
            control_percentage: self.control_percentage,
            control_count,
            voice_count: self.total - control_count,
        })
    }
}

impl TryFrom<RawChannelPool> for ChannelPool {
    type Error = ConfigError;

    /// Accepts exactly the pools `partition_exact` (optionally followed by a
    /// control floor) can produce.
    fn try_from(raw: RawChannelPool) -> std::result::Result<Self, Self::Error> {
        let inconsistent = ConfigError::InconsistentPool {
            total: raw.total,
            control: raw.control_count,
            voice: raw.voice_count,
        };
        let pool = partition_exact(raw.total, raw.control_percentage)
            .and_then(|base| base.with_control_floor(raw.control_count))
            .map_err(|err| match err {
                FcaError::InvalidConfiguration(ConfigError::ControlExceedsTotal { .. }) => {
                    inconsistent.clone()
                }
                FcaError::InvalidConfiguration(config) => config,
                FcaError::InvariantViolation { .. } => inconsistent.clone(),
            })?;
        if pool.control_count != raw.control_count || pool.voice_count != raw.voice_count {
            return Err(inconsistent);
        }
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_reference_scenarios() {
        let pool = partition(75, 12.0).expect("test: valid pool");
        assert_eq!(pool.control_count(), 9);
        assert_eq!(pool.voice_count(), 66);

        let pool = partition(90, 15.0).expect("test: valid pool");
        assert_eq!(pool.control_count(), 14); // ceil(13.5)
        assert_eq!(pool.voice_count(), 76);
    }

    #[test]
    fn partition_is_total_over_grid() {
        for total in 1..=120u32 {
            for pct in [0.0, 0.5, 7.0, 10.0, 12.0, 12.5, 15.0, 33.3, 50.0, 99.9, 100.0] {
                let pool = partition(total, pct).expect("test: valid pool");
                assert_eq!(pool.control_count() + pool.voice_count(), total);
            }
        }
    }

    #[test]
    fn decimal_percentage_avoids_float_ceiling_drift() {
        // 100 * 0.07 in f64 is 7.000000000000001
        let pool = partition(100, 7.0).expect("test: valid pool");
        assert_eq!(pool.control_count(), 7);
        let pool = partition(1000, 0.7).expect("test: valid pool");
        assert_eq!(pool.control_count(), 7);
    }

    #[test]
    fn extreme_percentages() {
        let none = partition(50, 0.0).expect("test: valid pool");
        assert_eq!((none.control_count(), none.voice_count()), (0, 50));
        let all = partition(50, 100.0).expect("test: valid pool");
        assert_eq!((all.control_count(), all.voice_count()), (50, 0));
    }

    #[test]
    fn rejects_zero_total() {
        let err = partition(0, 10.0).expect_err("test: zero total");
        assert_eq!(err, FcaError::InvalidConfiguration(ConfigError::InvalidTotal(0)));
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        for pct in [-0.1, 100.01, 150.0, f64::NAN, f64::INFINITY] {
            let err = partition(75, pct).expect_err("test: bad percentage");
            assert!(
                matches!(err, FcaError::InvalidConfiguration(ConfigError::InvalidPercentage(_))),
                "expected InvalidPercentage for {pct}, got: {err}"
            );
        }
    }

    #[test]
    fn control_floor_raises_short_pools() {
        let pool = partition(75, 12.0).expect("test: valid pool");
        let floored = pool.with_control_floor(13).expect("test: floor fits");
        assert_eq!(floored.control_count(), 13);
        assert_eq!(floored.voice_count(), 62);
        assert_eq!(floored.control_percentage(), pool.control_percentage());
    }

    #[test]
    fn control_floor_keeps_larger_pools() {
        let pool = partition(90, 15.0).expect("test: valid pool");
        let floored = pool.with_control_floor(7).expect("test: floor fits");
        assert_eq!(floored, pool);
    }

    #[test]
    fn control_floor_cannot_exceed_total() {
        let pool = partition(5, 20.0).expect("test: valid pool");
        let err = pool.with_control_floor(7).expect_err("test: floor too large");
        assert_eq!(
            err,
            FcaError::InvalidConfiguration(ConfigError::ControlExceedsTotal { control: 7, total: 5 })
        );
    }

    #[test]
    fn deserialized_pool_must_match_its_partition() {
        let err = serde_json::from_str::<ChannelPool>(
            r#"{"total":5,"control_percentage":"12","control_count":10,"voice_count":0}"#,
        )
        .expect_err("test: control count above total");
        assert!(err.to_string().contains("cannot hold 10 control"), "unexpected: {err}");

        // Sum matches, but 12% of 75 is 9 control channels, not 5.
        let err = serde_json::from_str::<ChannelPool>(
            r#"{"total":75,"control_percentage":"12","control_count":5,"voice_count":70}"#,
        )
        .expect_err("test: control below ceiling");
        assert!(err.to_string().contains("cannot hold 5 control"), "unexpected: {err}");

        let err = serde_json::from_str::<ChannelPool>(
            r#"{"total":0,"control_percentage":"12","control_count":0,"voice_count":0}"#,
        )
        .expect_err("test: empty pool");
        assert!(err.to_string().contains("at least 1"), "unexpected: {err}");
    }

    #[test]
    fn deserialized_floored_pool_is_accepted() {
        let pool = partition(75, 12.0)
            .and_then(|p| p.with_control_floor(13))
            .expect("test: floored pool");
        let json = serde_json::to_string(&pool).expect("test: serializable");
        let back: ChannelPool = serde_json::from_str(&json).expect("test: consistent pool");
        assert_eq!(back, pool);
    }
}
