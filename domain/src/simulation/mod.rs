//! Simulation-wide state, configuration and reporting

pub mod config;
pub mod leaderboard;
pub mod mode;
pub mod state;
pub mod stats;

pub use config::{ConfigField, ConfigRangeError, ConfigUpdate, SimulationConfig};
pub use leaderboard::{LeaderboardEntry, compute_leaderboard};
pub use mode::{RoundPhase, SimulationMode};
pub use state::{LifecycleCommand, SimulationState};
pub use stats::{AiCallStats, CompanySummary, GameStats, SimulationStatus, SimulationSummary};
