// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite - Error Types

//! Error types for channel planning.
//!
//! Two failure domains exist: bad input from the caller
//! ([`FcaError::InvalidConfiguration`]) and a distributor that produced a
//! matrix which does not partition the channel pool
//! ([`FcaError::InvariantViolation`]). Blocked calls in the simulator are
//! ordinary outcomes and never surface here.

use thiserror::Error;

/// Top-level error for every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FcaError {
    /// Caller supplied parameters outside the accepted domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A computed assignment broke the exact-partition invariant.
    #[error("invariant violation in {category} channels: {detail}")]
    InvariantViolation {
        category: &'static str,
        detail: String,
    },
}

/// Rejected planning parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("total channel count must be at least 1, got {0}")]
    InvalidTotal(u32),

    #[error("control percentage must be within [0, 100], got {0}")]
    InvalidPercentage(String),

    #[error("control channel count {control} exceeds total {total}")]
    ControlExceedsTotal { control: u32, total: u32 },

    #[error("pool of {total} channels cannot hold {control} control and {voice} voice channels")]
    InconsistentPool { total: u32, control: u32, voice: u32 },

    #[error("cluster size must be at least 1, got {0}")]
    InvalidClusterSize(u32),

    #[error("traffic matrix has {rows} rows but cluster size is {cluster_size}")]
    MatrixShapeMismatch { rows: usize, cluster_size: u32 },

    #[error("cluster size {0} is not of the form i² + ij + j²")]
    NonHexagonalCluster(u32),

    #[error("path loss exponent must be finite and positive, got {0}")]
    InvalidExponent(f64),
}

pub type Result<T> = std::result::Result<T, FcaError>;
