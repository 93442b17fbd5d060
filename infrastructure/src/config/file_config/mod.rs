//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod ai;
mod logging;
mod output;
mod simulation;
mod voting;

pub use ai::FileAiConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use simulation::FileSimulationConfig;
pub use voting::FileVotingConfig;

use boardroom_domain::ConfigRangeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("simulation.{0}")]
    OutOfRange(ConfigRangeError),

    #[error("simulation.mode: unknown value '{0}' (expected 'auto' or 'manual')")]
    InvalidMode(String),

    #[error("voting.trigger: unknown value '{0}' (expected 'every_round' or 'probabilistic')")]
    InvalidTrigger(String),

    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("ai.min_latency_ms ({min}) exceeds ai.max_latency_ms ({max})")]
    LatencyRange { min: u64, max: u64 },

    #[error("voting.approve_threshold ({approve}) must be above voting.reject_threshold ({reject})")]
    ThresholdOrder { approve: f64, reject: f64 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Engine configuration and round mode
    pub simulation: FileSimulationConfig,
    /// Simulated AI client settings
    pub ai: FileAiConfig,
    /// Quorum rule, trigger policy and vote interpretation
    pub voting: FileVotingConfig,
    /// Audit trail and log file
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues: Vec<ConfigValidationError> = self
            .simulation
            .to_simulation_config()
            .1
            .into_iter()
            .map(ConfigValidationError::OutOfRange)
            .collect();

        if self.simulation.parse_mode().is_none() {
            issues.push(ConfigValidationError::InvalidMode(
                self.simulation.mode.clone(),
            ));
        }
        if self.voting.parse_trigger().is_none() {
            issues.push(ConfigValidationError::InvalidTrigger(
                self.voting.trigger.clone(),
            ));
        }

        let probabilities = [
            ("ai.failure_rate", self.ai.failure_rate),
            ("ai.approval_bias", self.ai.approval_bias),
            ("voting.probability", self.voting.probability),
            ("voting.approve_threshold", self.voting.approve_threshold),
            ("voting.reject_threshold", self.voting.reject_threshold),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                issues.push(ConfigValidationError::InvalidProbability { field, value });
            }
        }

        if self.ai.min_latency_ms > self.ai.max_latency_ms {
            issues.push(ConfigValidationError::LatencyRange {
                min: self.ai.min_latency_ms,
                max: self.ai.max_latency_ms,
            });
        }
        if self.voting.approve_threshold <= self.voting.reject_threshold {
            issues.push(ConfigValidationError::ThresholdOrder {
                approve: self.voting.approve_threshold,
                reject: self.voting.reject_threshold,
            });
        }

        issues
    }
}
