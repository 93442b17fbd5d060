//! Simulation lifecycle state machine
//!
//! ```text
//!            start              pause
//!   Idle ────────────▶ Running ◀──────▶ Paused
//!    ▲                   │      resume    │
//!    │ reset             │ stop           │ stop
//!    │                   ▼                ▼
//!    └──────────────── Stopped ◀──────────┘
//!                        │ start
//!                        └──────▶ Running
//! ```
//!
//! Reset returns to `Idle` from any state.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

impl SimulationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationState::Idle => "idle",
            SimulationState::Running => "running",
            SimulationState::Paused => "paused",
            SimulationState::Stopped => "stopped",
        }
    }

    /// Whether a round may execute in this state
    pub fn allows_round(&self) -> bool {
        matches!(self, SimulationState::Running | SimulationState::Paused)
    }

    /// Apply a lifecycle command, returning the resulting state.
    ///
    /// `Stop` from `Stopped` is accepted and leaves the state unchanged.
    /// `ExecuteRound` never changes the state; it only checks the guard.
    pub fn apply(self, command: LifecycleCommand) -> Result<SimulationState, DomainError> {
        use LifecycleCommand as C;
        use SimulationState as S;

        let next = match (command, self) {
            (C::Start, S::Idle | S::Stopped) => S::Running,
            (C::Pause, S::Running) => S::Paused,
            (C::Resume, S::Paused) => S::Running,
            (C::Stop, S::Running | S::Paused | S::Stopped) => S::Stopped,
            (C::ExecuteRound, S::Running | S::Paused) => self,
            (C::Reset, _) => S::Idle,
            _ => {
                return Err(DomainError::InvalidTransition {
                    command: command.as_str().to_string(),
                    state: self.as_str().to_string(),
                });
            }
        };
        Ok(next)
    }
}

impl std::fmt::Display for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands accepted by the lifecycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    ExecuteRound,
}

impl LifecycleCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleCommand::Start => "start",
            LifecycleCommand::Pause => "pause",
            LifecycleCommand::Resume => "resume",
            LifecycleCommand::Stop => "stop",
            LifecycleCommand::Reset => "reset",
            LifecycleCommand::ExecuteRound => "execute round",
        }
    }
}

impl std::fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
