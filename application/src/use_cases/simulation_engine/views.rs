//! Decision views enriched with display data
//!
//! Related entities are looked up explicitly; a missing company or employee
//! falls back to placeholder text instead of failing the query.

use boardroom_domain::{
    CompanyId, Decision, DecisionStatus, DecisionType, EmployeeId, EntityStore, VoteResult,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";

/// A decision together with the names of the company and lead employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionView {
    pub id: String,
    pub round: u64,
    pub company_id: CompanyId,
    pub company_name: String,
    pub employee_id: Option<EmployeeId>,
    pub employee_name: String,
    pub decision_type: DecisionType,
    pub status: DecisionStatus,
    pub content: String,
    pub votes_for: u32,
    pub votes_against: u32,
    pub abstentions: u32,
    pub vote_result: VoteResult,
    pub approval_rate: f64,
    pub impact_score: Option<f64>,
    pub ai_cost: f64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DecisionView {
    pub fn new(decision: &Decision, store: &EntityStore) -> Self {
        let company_name = store
            .company(&decision.company_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());

        let employee_name = decision
            .employee_id
            .as_ref()
            .and_then(|id| store.employee(id))
            .map(|e| e.name.clone())
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());

        let tally = decision.tally();

        Self {
            id: decision.id.to_string(),
            round: decision.round,
            company_id: decision.company_id.clone(),
            company_name,
            employee_id: decision.employee_id.clone(),
            employee_name,
            decision_type: decision.decision_type,
            status: decision.status(),
            content: decision.content.clone(),
            votes_for: tally.votes_for,
            votes_against: tally.votes_against,
            abstentions: tally.abstentions,
            vote_result: decision.vote_result(),
            approval_rate: decision.approval_rate(),
            impact_score: decision.impact_score,
            ai_cost: decision.ai_cost,
            created_at: decision.created_at,
            completed_at: decision.completed_at(),
        }
    }
}
