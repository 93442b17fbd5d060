//! Infrastructure layer for boardroom
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod ai;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use ai::{SimulatedAiClient, SimulatedAiSettings};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAiConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileSimulationConfig, FileVotingConfig,
};
pub use logging::JsonlAuditLogger;
