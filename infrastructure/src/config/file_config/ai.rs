//! AI client configuration from TOML (`[ai]` section)
//!
//! ```toml
//! [ai]
//! model = "boardroom-sim-1"
//! min_latency_ms = 50
//! max_latency_ms = 400
//! failure_rate = 0.05
//! cost_per_call = 0.002
//! approval_bias = 0.6
//! seed = 42
//! ```

use crate::ai::SimulatedAiSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw AI client configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAiConfig {
    pub provider: String,
    pub model: String,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub failure_rate: f64,
    pub cost_per_call: f64,
    pub approval_bias: f64,
    pub seed: Option<u64>,
}

impl Default for FileAiConfig {
    fn default() -> Self {
        let defaults = SimulatedAiSettings::default();
        Self {
            provider: defaults.provider_id,
            model: defaults.model_id,
            min_latency_ms: defaults.min_latency.as_millis() as u64,
            max_latency_ms: defaults.max_latency.as_millis() as u64,
            failure_rate: defaults.failure_rate,
            cost_per_call: defaults.cost_per_call,
            approval_bias: defaults.approval_bias,
            seed: defaults.seed,
        }
    }
}

impl FileAiConfig {
    pub fn to_settings(&self) -> SimulatedAiSettings {
        SimulatedAiSettings {
            provider_id: self.provider.clone(),
            model_id: self.model.clone(),
            min_latency: Duration::from_millis(self.min_latency_ms),
            max_latency: Duration::from_millis(self.max_latency_ms),
            failure_rate: self.failure_rate,
            cost_per_call: self.cost_per_call,
            approval_bias: self.approval_bias,
            seed: self.seed,
        }
    }
}
