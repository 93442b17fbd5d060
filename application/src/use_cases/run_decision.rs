//! Decision & voting use case
//!
//! Runs the per-company decision pipeline in the same three steps a round
//! drives across all companies:
//!
//! 1. [`prepare`](DecisionVotingUseCase::prepare) picks the eligible voters
//!    and builds one AI request per voter.
//! 2. [`gather`](DecisionVotingUseCase::gather) fans the requests out
//!    concurrently, each bounded by the decision timeout.
//! 3. [`resolve`](DecisionVotingUseCase::resolve) turns proposals into votes
//!    and settles the decision status under the quorum rule.

use crate::ports::ai_client::{AiClientError, AiDecisionClient, AiProposal, DecisionRequest};
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use boardroom_domain::{
    Company, CompanyId, Decision, DecisionPromptTemplate, DecisionType, DomainError, Employee,
    EmployeeId, EntityStore, KeywordVoteInterpreter, QuorumRule, VoteInterpreter, VoteRecord,
    util::truncate_str,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Longest rationale kept on a vote record
const MAX_RATIONALE_BYTES: usize = 280;

/// A decision point for one company, ready to be sent out
#[derive(Debug, Clone)]
pub struct DecisionPoint {
    pub decision: Decision,
    /// Eligible voters, ordered by id
    pub voters: Vec<Employee>,
    pub requests: Vec<DecisionRequest>,
}

/// Result of one employee's AI call
pub type ProposalResult = Result<AiProposal, AiClientError>;

/// Use case for running company decisions and votes
pub struct DecisionVotingUseCase<C: AiDecisionClient + 'static> {
    client: Arc<C>,
    interpreter: Arc<dyn VoteInterpreter>,
    rule: QuorumRule,
}

impl<C: AiDecisionClient + 'static> DecisionVotingUseCase<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            interpreter: Arc::new(KeywordVoteInterpreter::default()),
            rule: QuorumRule::default(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: Arc<dyn VoteInterpreter>) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_rule(mut self, rule: QuorumRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn rule(&self) -> QuorumRule {
        self.rule
    }

    /// Select eligible voters and build their requests
    pub fn prepare(
        &self,
        store: &EntityStore,
        company: &Company,
        decision_type: DecisionType,
        round: u64,
    ) -> DecisionPoint {
        let staff: Vec<&Employee> = store.active_employees(&company.id).collect();
        let context = DecisionPromptTemplate::company_context(company, staff.len());
        let prompt = DecisionPromptTemplate::decision_prompt(decision_type, &context, round);

        let voters: Vec<Employee> = staff
            .into_iter()
            .filter(|e| decision_type.is_eligible(e.role))
            .cloned()
            .collect();

        let requests = voters
            .iter()
            .map(|employee| DecisionRequest {
                round,
                decision_type,
                company_id: company.id.clone(),
                company_name: company.name.clone(),
                company_type: company.company_type,
                employee_id: employee.id.clone(),
                employee_name: employee.name.clone(),
                role: employee.role,
                level: employee.level,
                ai_personality: employee.ai_personality.clone(),
                decision_style: employee.decision_style.clone(),
                system_prompt: DecisionPromptTemplate::system(employee),
                prompt: prompt.clone(),
            })
            .collect();

        debug!(
            "Company {} faces a {} decision with {} eligible voters",
            company.id,
            decision_type,
            voters.len()
        );

        DecisionPoint {
            decision: Decision::new(company.id.clone(), decision_type, round),
            voters,
            requests,
        }
    }

    /// Query every request in parallel, each bounded by `timeout`
    pub async fn gather(
        &self,
        points: &[DecisionPoint],
        timeout: Duration,
        progress: &dyn RoundProgressNotifier,
    ) -> HashMap<EmployeeId, ProposalResult> {
        let mut join_set = JoinSet::new();

        for request in points.iter().flat_map(|p| p.requests.iter()) {
            let client = Arc::clone(&self.client);
            let request = request.clone();

            join_set.spawn(async move {
                let result = match tokio::time::timeout(timeout, client.propose(&request)).await {
                    Ok(result) => result,
                    Err(_) => {
                        client.record_timeout();
                        Err(AiClientError::Timeout(timeout))
                    }
                };
                (request.company_id, request.employee_id, result)
            });
        }

        let mut proposals = HashMap::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((company, employee, result)) => {
                    if let Err(e) = &result {
                        warn!("AI call for {} ({}) failed: {}", employee, company, e);
                    }
                    progress.on_proposal_complete(&company, &employee, result.is_ok());
                    proposals.insert(employee, result);
                }
                Err(e) => {
                    // The voter is recorded as a failed call in `resolve`
                    warn!("Task join error: {}", e);
                }
            }
        }

        proposals
    }

    /// Turn proposals into votes and settle the decision
    pub fn resolve(
        &self,
        point: DecisionPoint,
        proposals: &mut HashMap<EmployeeId, ProposalResult>,
    ) -> Result<Decision, DomainError> {
        let DecisionPoint {
            mut decision,
            voters,
            ..
        } = point;

        decision.begin_voting(Utc::now())?;

        let mut lead: Option<(&Employee, AiProposal)> = None;

        for voter in &voters {
            let record = match proposals.remove(&voter.id) {
                Some(Ok(proposal)) => {
                    let choice = self
                        .interpreter
                        .interpret(&proposal.content, proposal.confidence);
                    decision.ai_cost += proposal.cost;

                    let record = VoteRecord::new(choice)
                        .with_rationale(truncate_str(&proposal.content, MAX_RATIONALE_BYTES));

                    if lead.as_ref().is_none_or(|(current, _)| outranks(voter, current)) {
                        lead = Some((voter, proposal));
                    }
                    record
                }
                Some(Err(e)) => VoteRecord::failed(e.to_string()),
                None => VoteRecord::failed("no response"),
            };
            decision.record_vote(voter.id.clone(), record)?;
        }

        decision = match lead {
            Some((employee, proposal)) => decision.with_lead(
                employee.id.clone(),
                proposal.content,
                proposal.provider_id,
                proposal.model_id,
            ),
            None => {
                decision.employee_id = voters.iter().reduce(senior).map(|e| e.id.clone());
                decision
            }
        };

        let status = decision.resolve(self.rule, Utc::now())?;
        debug!(
            "Decision {} for {}: {} {}",
            decision.id,
            decision.company_id,
            status,
            decision.tally().summary()
        );
        Ok(decision)
    }

    /// Run the full pipeline for a single company
    pub async fn execute(
        &self,
        store: &EntityStore,
        company_id: &CompanyId,
        decision_type: DecisionType,
        round: u64,
        timeout: Duration,
    ) -> Result<Decision, DomainError> {
        let company = store
            .company(company_id)
            .ok_or_else(|| DomainError::CompanyNotFound(company_id.to_string()))?;

        let point = self.prepare(store, company, decision_type, round);
        let mut proposals = self
            .gather(std::slice::from_ref(&point), timeout, &NoProgress)
            .await;
        self.resolve(point, &mut proposals)
    }
}

/// Higher level wins; equal levels go to the lower id
fn outranks(candidate: &Employee, current: &Employee) -> bool {
    candidate.level > current.level
        || (candidate.level == current.level && candidate.id < current.id)
}

fn senior<'a>(a: &'a Employee, b: &'a Employee) -> &'a Employee {
    if outranks(b, a) { b } else { a }
}
