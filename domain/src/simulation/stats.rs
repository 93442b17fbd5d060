//! Read-only aggregates for reporting

use super::config::SimulationConfig;
use super::leaderboard::LeaderboardEntry;
use super::mode::{RoundPhase, SimulationMode};
use super::state::SimulationState;
use crate::company::entities::CompanyType;
use crate::core::ids::CompanyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative AI call statistics reported by the decision client
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AiCallStats {
    pub total_calls: u64,
    pub failed_calls: u64,
    pub total_cost: f64,
}

impl AiCallStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            (self.total_calls - self.failed_calls) as f64 / self.total_calls as f64
        }
    }
}

/// Snapshot of the engine's control state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatus {
    pub state: SimulationState,
    pub mode: SimulationMode,
    pub current_round: u64,
    pub current_phase: RoundPhase,
    pub last_round_time: Option<DateTime<Utc>>,
    pub config: SimulationConfig,
}

/// Aggregate counts across the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub current_round: u64,
    pub total_companies: usize,
    pub active_companies: usize,
    pub total_employees: usize,
    pub active_employees: usize,
    pub total_decisions: usize,
    pub approved_decisions: usize,
    pub rejected_decisions: usize,
    pub expired_decisions: usize,
    pub total_events: usize,
    pub total_funds: i64,
    pub ai: AiCallStats,
}

/// Final per-company figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub company_id: CompanyId,
    pub name: String,
    pub company_type: CompanyType,
    pub is_active: bool,
    pub funds: i64,
    /// Active employees
    pub employees: usize,
    pub decisions_made: usize,
    pub decisions_approved: usize,
    pub events_count: usize,
    /// Mean level over everyone the company ever employed (0 with no staff)
    pub avg_employee_level: f64,
    pub total_experience: f64,
}

/// Returned when a simulation is ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_rounds: u64,
    pub ended_at: DateTime<Utc>,
    pub stats: GameStats,
    pub companies: Vec<CompanySummary>,
    pub leaderboard: Vec<LeaderboardEntry>,
}
