//! Decision entity and its lifecycle
//!
//! A decision moves through `Pending -> InVoting -> Approved | Rejected | Expired`.
//! Tallies only change through [`Decision::record_vote`], and the derived
//! metrics ([`Decision::vote_result`], [`Decision::approval_rate`]) are always
//! computed from them.

use crate::company::entities::EmployeeRole;
use crate::core::error::DomainError;
use crate::core::ids::{CompanyId, DecisionId, EmployeeId};
use crate::quorum::{QuorumRule, VoteRecord, VoteResult, VoteTally};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of business decision a company can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Strategic,
    Hiring,
    Investment,
    Product,
    Marketing,
    CostCutting,
}

impl DecisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Strategic => "strategic",
            DecisionType::Hiring => "hiring",
            DecisionType::Investment => "investment",
            DecisionType::Product => "product",
            DecisionType::Marketing => "marketing",
            DecisionType::CostCutting => "cost_cutting",
        }
    }

    /// All decision types, in rotation order
    pub fn all() -> [DecisionType; 6] {
        [
            DecisionType::Strategic,
            DecisionType::Hiring,
            DecisionType::Investment,
            DecisionType::Product,
            DecisionType::Marketing,
            DecisionType::CostCutting,
        ]
    }

    /// Roles allowed to vote on this kind of decision.
    ///
    /// `None` means every active employee votes. Every restricted set
    /// contains the CEO so that a staffed company always has a voter.
    pub fn eligible_roles(&self) -> Option<&'static [EmployeeRole]> {
        match self {
            DecisionType::Strategic => Some(&[
                EmployeeRole::Ceo,
                EmployeeRole::Cto,
                EmployeeRole::Manager,
            ]),
            DecisionType::Hiring => Some(&[EmployeeRole::Ceo, EmployeeRole::Manager]),
            DecisionType::Investment => Some(&[
                EmployeeRole::Ceo,
                EmployeeRole::Cto,
                EmployeeRole::Analyst,
            ]),
            DecisionType::Marketing => Some(&[
                EmployeeRole::Ceo,
                EmployeeRole::Manager,
                EmployeeRole::Sales,
            ]),
            DecisionType::Product | DecisionType::CostCutting => None,
        }
    }

    pub fn is_eligible(&self, role: EmployeeRole) -> bool {
        self.eligible_roles().is_none_or(|roles| roles.contains(&role))
    }

    /// Effect applied to the company when a decision of this type is approved
    pub fn effect(&self) -> DecisionEffect {
        match self {
            DecisionType::Strategic => DecisionEffect::funds(0.5),
            DecisionType::Hiring => DecisionEffect {
                funds_multiplier: -1.0,
                hires: 1,
                payroll_factor: 1.0,
            },
            DecisionType::Investment => DecisionEffect::funds(1.5),
            DecisionType::Product => DecisionEffect::funds(1.0),
            DecisionType::Marketing => DecisionEffect::funds(0.75),
            DecisionType::CostCutting => DecisionEffect {
                funds_multiplier: 0.5,
                hires: 0,
                payroll_factor: 0.5,
            },
        }
    }

    /// Importance on a 1-10 scale
    pub fn importance(&self) -> u8 {
        match self {
            DecisionType::Strategic => 9,
            DecisionType::Investment => 8,
            DecisionType::Hiring | DecisionType::Product => 6,
            DecisionType::CostCutting => 5,
            DecisionType::Marketing => 4,
        }
    }

    /// Urgency on a 1-10 scale
    pub fn urgency(&self) -> u8 {
        match self {
            DecisionType::CostCutting => 8,
            DecisionType::Hiring => 7,
            DecisionType::Product | DecisionType::Marketing => 5,
            DecisionType::Investment => 4,
            DecisionType::Strategic => 3,
        }
    }
}

impl std::fmt::Display for DecisionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect table entry for an approved decision
///
/// Fund changes are expressed as a multiple of the configured base funding
/// rate so that the table scales with configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionEffect {
    /// Funds delta as a multiple of the base funding rate
    pub funds_multiplier: f64,
    /// Employees hired
    pub hires: u32,
    /// Multiplier on the company's payroll for the round
    pub payroll_factor: f64,
}

impl DecisionEffect {
    fn funds(multiplier: f64) -> Self {
        Self {
            funds_multiplier: multiplier,
            hires: 0,
            payroll_factor: 1.0,
        }
    }

    /// Funds delta for a given base funding rate
    pub fn funds_delta(&self, base_funding_rate: i64) -> i64 {
        (self.funds_multiplier * base_funding_rate as f64).round() as i64
    }
}

/// Lifecycle status of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Pending,
    InVoting,
    Approved,
    Rejected,
    Expired,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "pending",
            DecisionStatus::InVoting => "in_voting",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DecisionStatus::Approved | DecisionStatus::Rejected | DecisionStatus::Expired
        )
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company-level decision put to an employee vote (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub company_id: CompanyId,
    /// Lead employee whose proposal became the decision content
    pub employee_id: Option<EmployeeId>,
    pub decision_type: DecisionType,
    /// Round in which the decision was taken
    pub round: u64,
    pub content: String,
    status: DecisionStatus,
    pub importance: u8,
    pub urgency: u8,
    pub impact_score: Option<f64>,
    votes_for: u32,
    votes_against: u32,
    abstentions: u32,
    voters: Vec<EmployeeId>,
    vote_details: BTreeMap<EmployeeId, VoteRecord>,
    pub created_at: DateTime<Utc>,
    voting_started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    pub outcome: Option<String>,
    pub ai_provider: Option<String>,
    pub ai_model: Option<String>,
    pub ai_cost: f64,
}

impl Decision {
    pub fn new(company_id: CompanyId, decision_type: DecisionType, round: u64) -> Self {
        Self {
            id: DecisionId::generate(),
            company_id,
            employee_id: None,
            decision_type,
            round,
            content: String::new(),
            status: DecisionStatus::Pending,
            importance: decision_type.importance(),
            urgency: decision_type.urgency(),
            impact_score: None,
            votes_for: 0,
            votes_against: 0,
            abstentions: 0,
            voters: Vec::new(),
            vote_details: BTreeMap::new(),
            created_at: Utc::now(),
            voting_started_at: None,
            completed_at: None,
            outcome: None,
            ai_provider: None,
            ai_model: None,
            ai_cost: 0.0,
        }
    }

    /// Record the lead proposal: who proposed it and which model produced it
    pub fn with_lead(
        mut self,
        employee_id: EmployeeId,
        content: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        self.employee_id = Some(employee_id);
        self.content = content.into();
        self.ai_provider = Some(provider.into());
        self.ai_model = Some(model.into());
        self
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn voters(&self) -> &[EmployeeId] {
        &self.voters
    }

    pub fn vote_details(&self) -> &BTreeMap<EmployeeId, VoteRecord> {
        &self.vote_details
    }

    pub fn voting_started_at(&self) -> Option<DateTime<Utc>> {
        self.voting_started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn tally(&self) -> VoteTally {
        VoteTally {
            votes_for: self.votes_for,
            votes_against: self.votes_against,
            abstentions: self.abstentions,
        }
    }

    pub fn vote_result(&self) -> VoteResult {
        VoteResult::from_tally(&self.tally())
    }

    pub fn approval_rate(&self) -> f64 {
        self.tally().approval_rate()
    }

    /// Whether every recorded vote came from a failed AI call
    pub fn all_calls_failed(&self) -> bool {
        !self.vote_details.is_empty() && self.vote_details.values().all(VoteRecord::is_failure)
    }

    /// Open the decision for voting
    pub fn begin_voting(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.transition(DecisionStatus::Pending, DecisionStatus::InVoting)?;
        self.voting_started_at = Some(now);
        Ok(())
    }

    /// Record one employee's vote
    pub fn record_vote(&mut self, voter: EmployeeId, record: VoteRecord) -> Result<(), DomainError> {
        if self.status != DecisionStatus::InVoting {
            return Err(self.invalid(DecisionStatus::InVoting));
        }
        if self.vote_details.contains_key(&voter) {
            return Err(DomainError::DuplicateVoter {
                decision: self.id.to_string(),
                voter: voter.to_string(),
            });
        }

        let mut tally = self.tally();
        tally.record(record.vote);
        self.votes_for = tally.votes_for;
        self.votes_against = tally.votes_against;
        self.abstentions = tally.abstentions;

        self.voters.push(voter.clone());
        self.vote_details.insert(voter, record);
        Ok(())
    }

    /// Close voting and settle the status under `rule`.
    ///
    /// No voters, or only failed calls, expires the decision. Otherwise the
    /// rule decides between approved and rejected.
    pub fn resolve(
        &mut self,
        rule: QuorumRule,
        now: DateTime<Utc>,
    ) -> Result<DecisionStatus, DomainError> {
        if self.status != DecisionStatus::InVoting {
            return Err(self.invalid(DecisionStatus::Approved));
        }

        let tally = self.tally();
        let (status, outcome) = if self.voters.is_empty() {
            (DecisionStatus::Expired, "Expired: no eligible voters".to_string())
        } else if self.all_calls_failed() {
            (DecisionStatus::Expired, "Expired: every AI call failed".to_string())
        } else if rule.approves(&tally) {
            (
                DecisionStatus::Approved,
                format!("Approved {} ({})", tally.summary(), rule),
            )
        } else {
            (
                DecisionStatus::Rejected,
                format!("Rejected {} ({})", tally.summary(), rule),
            )
        };

        self.complete(status, outcome, now);
        Ok(status)
    }

    /// Expire a decision that never reached a vote
    pub fn expire(&mut self, reason: impl Into<String>, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(self.invalid(DecisionStatus::Expired));
        }
        self.complete(DecisionStatus::Expired, reason.into(), now);
        Ok(())
    }

    pub fn set_impact(&mut self, score: f64) {
        self.impact_score = Some(score);
    }

    fn complete(&mut self, status: DecisionStatus, outcome: String, now: DateTime<Utc>) {
        self.completed_at = Some(now);
        self.outcome = Some(outcome);
        self.status = status;
    }

    fn transition(&mut self, from: DecisionStatus, to: DecisionStatus) -> Result<(), DomainError> {
        if self.status != from {
            return Err(self.invalid(to));
        }
        self.status = to;
        Ok(())
    }

    fn invalid(&self, to: DecisionStatus) -> DomainError {
        DomainError::InvalidDecisionTransition {
            decision: self.id.to_string(),
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}
