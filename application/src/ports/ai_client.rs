//! AI decision client port
//!
//! Defines the interface for asking an AI provider to propose a decision on
//! behalf of an employee.

use async_trait::async_trait;
use boardroom_domain::{
    AiCallStats, CompanyId, CompanyType, DecisionType, EmployeeId, EmployeeRole,
};
use std::time::Duration;
use thiserror::Error;

/// Errors a single AI call can end with
///
/// These never fail a round: the engine records them as an abstain vote
/// with an error note.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiClientError {
    #[error("AI call timed out after {0:?}")]
    Timeout(Duration),

    #[error("AI provider unavailable: {0}")]
    Unavailable(String),

    #[error("AI request failed: {0}")]
    RequestFailed(String),
}

/// Everything the provider needs to propose a decision for one employee
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRequest {
    pub round: u64,
    pub decision_type: DecisionType,
    pub company_id: CompanyId,
    pub company_name: String,
    pub company_type: CompanyType,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub role: EmployeeRole,
    pub level: u32,
    pub ai_personality: String,
    pub decision_style: String,
    /// Persona prompt for the employee
    pub system_prompt: String,
    /// The decision question with company context
    pub prompt: String,
}

/// A proposal returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct AiProposal {
    pub content: String,
    pub provider_id: String,
    pub model_id: String,
    pub cost: f64,
    pub latency: Duration,
    /// Confidence reported by the provider, if any (0.0 to 1.0)
    pub confidence: Option<f64>,
}

/// Client for AI-assisted employee decisions
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AiDecisionClient: Send + Sync {
    /// Ask the provider for a proposal
    async fn propose(&self, request: &DecisionRequest) -> Result<AiProposal, AiClientError>;

    /// Cumulative call counters, readable at any time
    fn call_stats(&self) -> AiCallStats;

    /// Count a call the caller abandoned after its deadline
    ///
    /// A timed-out `propose` future is dropped before it can update the
    /// counters, so the caller reports it here.
    fn record_timeout(&self) {}

    /// Reset the counters (called when the simulation is reset)
    fn reset_stats(&self) {}
}
