//! Simulation events

use crate::core::ids::{CompanyId, EventId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of simulation event.
///
/// Engine-produced kinds form a closed set; events injected by an
/// administrator may carry any other tag, kept as [`EventType::Custom`].
/// Serialised as its wire string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    SimulationStarted,
    SimulationPaused,
    SimulationResumed,
    SimulationStopped,
    ModeChanged,
    RoundCompleted,
    DecisionApproved,
    DecisionRejected,
    DecisionExpired,
    Funding,
    Payroll,
    EmployeeHired,
    EmployeePromoted,
    CompanyBankrupt,
    Custom(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::SimulationStarted => "simulation_started",
            EventType::SimulationPaused => "simulation_paused",
            EventType::SimulationResumed => "simulation_resumed",
            EventType::SimulationStopped => "simulation_stopped",
            EventType::ModeChanged => "mode_changed",
            EventType::RoundCompleted => "round_completed",
            EventType::DecisionApproved => "decision_approved",
            EventType::DecisionRejected => "decision_rejected",
            EventType::DecisionExpired => "decision_expired",
            EventType::Funding => "funding",
            EventType::Payroll => "payroll",
            EventType::EmployeeHired => "employee_hired",
            EventType::EmployeePromoted => "employee_promoted",
            EventType::CompanyBankrupt => "company_bankrupt",
            EventType::Custom(tag) => tag,
        }
    }

    /// Parse a wire string; unknown tags become [`EventType::Custom`]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "simulation_started" => EventType::SimulationStarted,
            "simulation_paused" => EventType::SimulationPaused,
            "simulation_resumed" => EventType::SimulationResumed,
            "simulation_stopped" => EventType::SimulationStopped,
            "mode_changed" => EventType::ModeChanged,
            "round_completed" => EventType::RoundCompleted,
            "decision_approved" => EventType::DecisionApproved,
            "decision_rejected" => EventType::DecisionRejected,
            "decision_expired" => EventType::DecisionExpired,
            "funding" => EventType::Funding,
            "payroll" => EventType::Payroll,
            "employee_hired" => EventType::EmployeeHired,
            "employee_promoted" => EventType::EmployeePromoted,
            "company_bankrupt" => EventType::CompanyBankrupt,
            other => EventType::Custom(other.to_string()),
        }
    }

    /// Lifecycle events are produced by commands rather than rounds
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            EventType::SimulationStarted
                | EventType::SimulationPaused
                | EventType::SimulationResumed
                | EventType::SimulationStopped
                | EventType::ModeChanged
        )
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

/// An immutable, timestamped record of something that happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    pub id: EventId,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    /// Round the event belongs to (the current round for lifecycle events)
    pub round: u64,
    pub company_id: Option<CompanyId>,
    pub description: String,
    pub data: serde_json::Value,
}

impl SimulationEvent {
    pub fn new(event_type: EventType, round: u64, description: impl Into<String>) -> Self {
        Self {
            id: EventId::generate(),
            event_type,
            timestamp: Utc::now(),
            round,
            company_id: None,
            description: description.into(),
            data: serde_json::Value::Null,
        }
    }

    pub fn for_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
