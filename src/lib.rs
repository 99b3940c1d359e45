// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fixed Channel Assignment Suite

//! Fixed Channel Assignment (FCA) planning for cellular clusters.
//!
//! ```text
//! partition ─▶ distribute ─┬─▶ verify
//!                          ├─▶ analyze
//!                          └─▶ simulate
//! ```
//!
//! Every operation is a pure transform over its inputs. The only state is the
//! random source handed to [`simulate`], which the caller owns.

pub mod types;
pub mod error;
pub mod adapter;
pub mod partition;
pub mod distribution;
pub mod verify;
pub mod reuse;
pub mod simulation;
pub mod plan;
pub mod config;

pub use types::*;
pub use error::{ConfigError, FcaError, Result};
pub use partition::{partition, partition_exact};
pub use distribution::{distribute, distribute_with, CellShare};
pub use verify::{ensure_exact_partition, verify};
pub use reuse::{analyze, analyze_with_exponent, hexagonal_shift, require_hexagonal};
pub use simulation::{simulate, ScriptedDraws, TrialSource};
pub use plan::ClusterPlan;
pub use config::{FcaConfig, ScenarioSpec};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// JavaScript handle around one channel pool.
#[wasm_bindgen]
pub struct FcaPlanner {
    pool: ChannelPool,
    strategy: DistributionStrategy,
}

#[wasm_bindgen]
impl FcaPlanner {
    #[wasm_bindgen(constructor)]
    pub fn new(total_channels: u32, control_percentage: f64) -> std::result::Result<FcaPlanner, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let pool = partition(total_channels, control_percentage).map_err(to_js_error)?;
        Ok(Self { pool, strategy: DistributionStrategy::Contiguous })
    }

    pub fn control_percentage(&self) -> f64 { adapter::from_decimal(self.pool.control_percentage()) }
    pub fn control_count(&self) -> u32 { self.pool.control_count() }
    pub fn voice_count(&self) -> u32 { self.pool.voice_count() }

    /// Switch channel numbering between contiguous blocks and round-robin.
    pub fn set_interleaved(&mut self, interleaved: bool) {
        self.strategy = if interleaved {
            DistributionStrategy::Interleaved
        } else {
            DistributionStrategy::Contiguous
        };
    }

    /// Raise the control sub-pool so each of `cluster_size` cells gets one.
    pub fn apply_control_floor(&mut self, cluster_size: u32) -> std::result::Result<(), JsValue> {
        self.pool = self.pool.with_control_floor(cluster_size).map_err(to_js_error)?;
        Ok(())
    }

    /// Verified [`ClusterPlan`] as a JS object.
    pub fn distribute(&self, cluster_size: u32) -> std::result::Result<JsValue, JsValue> {
        let plan = ClusterPlan::build(&self.pool, cluster_size, self.strategy).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&plan).map_err(JsValue::from)
    }

    pub fn analyze(&self, cluster_size: u32) -> std::result::Result<JsValue, JsValue> {
        let metrics = analyze(cluster_size).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&metrics).map_err(JsValue::from)
    }

    /// Call simulation seeded with `seed`, so a page reload replays it.
    pub fn simulate(&self, cluster_size: u32, trials: u32, seed: u64) -> std::result::Result<JsValue, JsValue> {
        let plan = ClusterPlan::build(&self.pool, cluster_size, self.strategy).map_err(to_js_error)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = plan.simulate_calls(trials, &mut rng).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&result).map_err(JsValue::from)
    }
}

fn to_js_error(err: FcaError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
