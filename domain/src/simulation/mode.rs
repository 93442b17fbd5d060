//! Simulation mode and round phase

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How rounds advance
///
/// - **Manual** (default): rounds run only on explicit command
/// - **Auto**: a timer runs a round every round interval while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    Auto,
    #[default]
    Manual,
}

impl SimulationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationMode::Auto => "auto",
            SimulationMode::Manual => "manual",
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, SimulationMode::Auto)
    }
}

impl std::fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SimulationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SimulationMode::Auto),
            "manual" => Ok(SimulationMode::Manual),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

/// Sub-step of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    #[default]
    Idle,
    Deciding,
    Voting,
    Settling,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Deciding => "deciding",
            RoundPhase::Voting => "voting",
            RoundPhase::Settling => "settling",
        }
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
