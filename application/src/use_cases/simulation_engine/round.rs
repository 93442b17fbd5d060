//! Round execution and settlement
//!
//! A round works on a private copy of the entity store:
//!
//! ```text
//!  snapshot ──▶ Deciding ──▶ Voting ──▶ Settling ──▶ publish (one write lock)
//!                 │ AI fan-out   │ tally      │ effects, payroll,
//!                 │ per voter    │ per company│ promotions, bankruptcies
//! ```
//!
//! Readers therefore observe either the pre-round or the post-round world.
//! A failed round publishes nothing.

use super::EngineInner;
use super::error::EngineError;
use crate::config::EngineOptions;
use crate::ports::ai_client::AiDecisionClient;
use crate::ports::audit_logger::AuditRecord;
use crate::use_cases::run_decision::DecisionPoint;
use boardroom_domain::{
    CompanyId, Decision, DecisionStatus, DomainError, EntityStore, EventType, LifecycleCommand,
    RoundPhase, SimulationConfig, SimulationEvent, SimulationState, hire_next,
};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, error, info};

/// What started a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RoundSource {
    Manual,
    Timer,
}

impl<C: AiDecisionClient + 'static> EngineInner<C> {
    /// Run one round. The caller must hold the round gate.
    pub(super) async fn run_round(
        &self,
        source: RoundSource,
    ) -> Result<Vec<SimulationEvent>, EngineError> {
        let config = {
            let mut control = self.control.lock().await;
            control.state.apply(LifecycleCommand::ExecuteRound)?;
            if source == RoundSource::Timer && control.state != SimulationState::Running {
                return Err(EngineError::InvalidTransition {
                    command: "run a timed round".to_string(),
                    state: control.state.to_string(),
                });
            }
            control.phase = RoundPhase::Deciding;
            control.config.clone()
        };

        let (mut store, round) = {
            let world = self.world.read().await;
            (world.store.clone(), world.current_round + 1)
        };

        info!("Round {} started ({:?})", round, source);

        match self.execute_phases(&mut store, round, &config).await {
            Ok((decisions, events)) => {
                self.publish(store, decisions, &events, round).await;
                Ok(events)
            }
            Err(e) => Err(self.abort_round(round, e.to_string()).await),
        }
    }

    async fn execute_phases(
        &self,
        store: &mut EntityStore,
        round: u64,
        config: &SimulationConfig,
    ) -> Result<(Vec<Decision>, Vec<SimulationEvent>), DomainError> {
        let companies: Vec<_> = store.active_companies().cloned().collect();
        self.progress.on_round_start(round, companies.len());

        // Deciding
        let points: Vec<DecisionPoint> = companies
            .iter()
            .enumerate()
            .filter_map(|(position, company)| {
                let decision_type = self.trigger.decision_point(round, company, position)?;
                Some(self.voting.prepare(store, company, decision_type, round))
            })
            .collect();

        let total_requests: usize = points.iter().map(|p| p.requests.len()).sum();
        debug!(
            "Round {}: {} decision points, {} AI requests",
            round,
            points.len(),
            total_requests
        );
        self.progress.on_phase_start(RoundPhase::Deciding, total_requests);
        let mut proposals = self
            .voting
            .gather(&points, config.decision_timeout_duration(), self.progress.as_ref())
            .await;
        self.progress.on_phase_complete(RoundPhase::Deciding);

        // Voting
        self.set_phase(RoundPhase::Voting).await;
        self.progress.on_phase_start(RoundPhase::Voting, points.len());
        let mut decisions = Vec::with_capacity(points.len());
        for point in points {
            decisions.push(self.voting.resolve(point, &mut proposals)?);
        }
        self.progress.on_phase_complete(RoundPhase::Voting);

        // Settling
        self.set_phase(RoundPhase::Settling).await;
        self.progress.on_phase_start(RoundPhase::Settling, companies.len());
        let events = settle(store, &mut decisions, round, config, &self.options)?;
        self.progress.on_phase_complete(RoundPhase::Settling);

        Ok((decisions, events))
    }

    async fn publish(
        &self,
        store: EntityStore,
        decisions: Vec<Decision>,
        events: &[SimulationEvent],
        round: u64,
    ) {
        let approved = decisions
            .iter()
            .filter(|d| d.status() == DecisionStatus::Approved)
            .count();
        let decision_count = decisions.len();

        for decision in &decisions {
            self.audit.log(AuditRecord::new(
                "decision",
                json!({
                    "round": round,
                    "decision_id": decision.id,
                    "company_id": decision.company_id,
                    "decision_type": decision.decision_type,
                    "status": decision.status(),
                    "votes_for": decision.tally().votes_for,
                    "votes_against": decision.tally().votes_against,
                    "abstentions": decision.tally().abstentions,
                    "ai_cost": decision.ai_cost,
                }),
            ));
        }

        {
            let mut world = self.world.write().await;
            world.store = store;
            world.decisions.extend(decisions);
            world.events.extend(events.iter().cloned());
            world.current_round = round;
            world.last_round_time = Some(Utc::now());
        }

        self.set_phase(RoundPhase::Idle).await;

        info!(
            "Round {} completed: {} decisions ({} approved), {} events",
            round,
            decision_count,
            approved,
            events.len()
        );
        self.audit.log(AuditRecord::new(
            "round_completed",
            json!({
                "round": round,
                "decisions": decision_count,
                "approved": approved,
                "events": events.len(),
            }),
        ));
        self.progress.on_round_complete(round, events.len());
    }

    /// Stop the engine after a failed round and describe the failure
    pub(super) async fn abort_round(&self, round: u64, reason: String) -> EngineError {
        let mut control = self.control.lock().await;
        if let Some(timer) = control.timer.take() {
            timer.cancel();
        }
        control.state = SimulationState::Stopped;
        control.phase = RoundPhase::Idle;

        error!("Round {} failed, simulation stopped: {}", round, reason);
        self.audit.log(AuditRecord::new(
            "round_failed",
            json!({ "round": round, "reason": reason }),
        ));
        EngineError::RoundExecution(reason)
    }

    async fn set_phase(&self, phase: RoundPhase) {
        self.control.lock().await.phase = phase;
    }
}

/// Apply the outcome of a round's decisions to the store.
///
/// In order: approved decision effects, experience for voters, base funding
/// and payroll for every active company, then bankruptcies. Returns the
/// events produced, ending with a `round_completed` event.
pub(super) fn settle(
    store: &mut EntityStore,
    decisions: &mut [Decision],
    round: u64,
    config: &SimulationConfig,
    options: &EngineOptions,
) -> Result<Vec<SimulationEvent>, DomainError> {
    let base = config.base_funding_rate;
    let mut events = Vec::new();
    let mut payroll_factors: HashMap<CompanyId, f64> = HashMap::new();

    for decision in decisions.iter_mut() {
        let company_name = store
            .company(&decision.company_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| DomainError::CompanyNotFound(decision.company_id.to_string()))?;

        let status = decision.status();
        let tally = decision.tally();
        let event_type = match status {
            DecisionStatus::Approved => EventType::DecisionApproved,
            DecisionStatus::Rejected => EventType::DecisionRejected,
            _ => EventType::DecisionExpired,
        };
        events.push(
            SimulationEvent::new(
                event_type,
                round,
                format!(
                    "{} {} a {} decision {}",
                    company_name,
                    status,
                    decision.decision_type,
                    tally.summary()
                ),
            )
            .for_company(decision.company_id.clone())
            .with_data(json!({
                "decision_id": decision.id,
                "decision_type": decision.decision_type,
                "employee_id": decision.employee_id,
                "votes_for": tally.votes_for,
                "votes_against": tally.votes_against,
                "abstentions": tally.abstentions,
                "approval_rate": decision.approval_rate(),
            })),
        );

        if status != DecisionStatus::Approved {
            decision.set_impact(0.0);
            continue;
        }

        let effect = decision.decision_type.effect();
        let company = store
            .company_mut(&decision.company_id)
            .ok_or_else(|| DomainError::CompanyNotFound(decision.company_id.to_string()))?;
        let applied = company.adjust_funds(effect.funds_delta(base));
        let company_type = company.company_type;
        let size = company.size;

        let mut hired = 0;
        for _ in 0..effect.hires {
            let role = company_type.next_hire(size + hired);
            if let Some(employee_id) = hire_next(store, &decision.company_id, role) {
                hired += 1;
                let name = store
                    .employee(&employee_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_default();
                events.push(
                    SimulationEvent::new(
                        EventType::EmployeeHired,
                        round,
                        format!("{} hired {} as {}", company_name, name, role.display_name()),
                    )
                    .for_company(decision.company_id.clone())
                    .with_data(json!({ "employee_id": employee_id, "role": role })),
                );
            }
        }

        if effect.payroll_factor != 1.0 {
            payroll_factors.insert(decision.company_id.clone(), effect.payroll_factor);
        }

        decision.set_impact(applied.unsigned_abs() as f64 / base as f64 + hired as f64);
    }

    // Experience for every voter whose call went through
    for decision in decisions.iter() {
        for (voter, record) in decision.vote_details() {
            if record.is_failure() {
                continue;
            }
            let Some(employee) = store.employee_mut(voter) else {
                continue;
            };
            if employee.gain_experience(options.experience_per_vote) {
                events.push(
                    SimulationEvent::new(
                        EventType::EmployeePromoted,
                        round,
                        format!("{} was promoted to level {}", employee.name, employee.level),
                    )
                    .for_company(employee.company_id.clone())
                    .with_data(json!({ "employee_id": employee.id, "level": employee.level })),
                );
            }
        }
    }

    // Base funding and payroll
    let active: Vec<CompanyId> = store.active_companies().map(|c| c.id.clone()).collect();
    for company_id in active {
        let headcount = store.active_employees(&company_id).count() as i64;
        let factor = payroll_factors.get(&company_id).copied().unwrap_or(1.0);
        let payroll = ((base / 20 * headcount) as f64 * factor).round() as i64;

        let Some(company) = store.company_mut(&company_id) else {
            continue;
        };
        let applied = company.adjust_funds(base - payroll);
        let funds = company.funds;
        let name = company.name.clone();

        events.push(
            SimulationEvent::new(
                EventType::Funding,
                round,
                format!("{} received {} funding and paid {} payroll", name, base, payroll),
            )
            .for_company(company_id.clone())
            .with_data(json!({
                "income": base,
                "payroll": payroll,
                "applied": applied,
                "funds": funds,
            })),
        );

        if funds == 0 && store.deactivate_company(&company_id) {
            events.push(
                SimulationEvent::new(
                    EventType::CompanyBankrupt,
                    round,
                    format!("{} ran out of funds and closed", name),
                )
                .for_company(company_id.clone()),
            );
        }
    }

    let approved = decisions
        .iter()
        .filter(|d| d.status() == DecisionStatus::Approved)
        .count();
    events.push(
        SimulationEvent::new(
            EventType::RoundCompleted,
            round,
            format!("Round {} completed with {} decisions", round, decisions.len()),
        )
        .with_data(json!({ "decisions": decisions.len(), "approved": approved })),
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_domain::{
        CompanyType, DecisionType, EmployeeId, EmployeeRole, QuorumRule, VoteChoice, VoteRecord,
    };

    fn store() -> (EntityStore, CompanyId) {
        let mut store = EntityStore::new();
        let id = store.found_company("Acme", CompanyType::Startup);
        store.hire(&id, "Ann", EmployeeRole::Ceo, "visionary", "decisive");
        store.hire(&id, "Abe", EmployeeRole::Engineer, "cautious", "consensus");
        (store, id)
    }

    fn decided(company: &CompanyId, decision_type: DecisionType, votes: &[VoteChoice]) -> Decision {
        let mut decision = Decision::new(company.clone(), decision_type, 1);
        decision.begin_voting(Utc::now()).unwrap();
        for (i, vote) in votes.iter().enumerate() {
            decision
                .record_vote(EmployeeId::sequential(i + 1), VoteRecord::new(*vote))
                .unwrap();
        }
        decision.resolve(QuorumRule::Plurality, Utc::now()).unwrap();
        decision
    }

    fn types(events: &[SimulationEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event_type.as_str()).collect()
    }

    #[test]
    fn test_approved_investment_adds_funds() {
        let (mut store, id) = store();
        let before = store.company(&id).unwrap().funds;
        let mut decisions = vec![decided(&id, DecisionType::Investment, &[VoteChoice::For])];
        let config = SimulationConfig::default();

        let events = settle(&mut store, &mut decisions, 1, &config, &EngineOptions::default())
            .unwrap();

        // +1500 investment, +1000 funding, -2 * 50 payroll
        assert_eq!(store.company(&id).unwrap().funds, before + 1500 + 1000 - 100);
        assert_eq!(decisions[0].impact_score, Some(1.5));
        assert_eq!(
            types(&events),
            vec!["decision_approved", "funding", "round_completed"]
        );
    }

    #[test]
    fn test_approved_hiring_grows_company() {
        let (mut store, id) = store();
        let mut decisions = vec![decided(&id, DecisionType::Hiring, &[VoteChoice::For])];

        let events = settle(
            &mut store,
            &mut decisions,
            1,
            &SimulationConfig::default(),
            &EngineOptions::default(),
        )
        .unwrap();

        assert_eq!(store.company(&id).unwrap().size, 3);
        assert_eq!(store.active_employees(&id).count(), 3);
        assert_eq!(decisions[0].impact_score, Some(2.0));
        assert!(types(&events).contains(&"employee_hired"));
    }

    #[test]
    fn test_rejected_decision_has_no_effect() {
        let (mut store, id) = store();
        let before = store.company(&id).unwrap().funds;
        let mut decisions = vec![decided(
            &id,
            DecisionType::Investment,
            &[VoteChoice::Against],
        )];

        settle(
            &mut store,
            &mut decisions,
            1,
            &SimulationConfig::default(),
            &EngineOptions::default(),
        )
        .unwrap();

        assert_eq!(store.company(&id).unwrap().funds, before + 1000 - 100);
        assert_eq!(decisions[0].impact_score, Some(0.0));
    }

    #[test]
    fn test_cost_cutting_halves_payroll() {
        let (mut store, id) = store();
        let before = store.company(&id).unwrap().funds;
        let mut decisions = vec![decided(&id, DecisionType::CostCutting, &[VoteChoice::For])];

        settle(
            &mut store,
            &mut decisions,
            1,
            &SimulationConfig::default(),
            &EngineOptions::default(),
        )
        .unwrap();

        // +500 effect, +1000 funding, -50 payroll (halved from 100)
        assert_eq!(store.company(&id).unwrap().funds, before + 500 + 1000 - 50);
    }

    #[test]
    fn test_voters_gain_experience_and_promote() {
        let (mut store, id) = store();
        store
            .employee_mut(&EmployeeId::sequential(1))
            .unwrap()
            .experience = 9.5;
        let mut decisions = vec![decided(&id, DecisionType::Product, &[VoteChoice::For])];

        let events = settle(
            &mut store,
            &mut decisions,
            1,
            &SimulationConfig::default(),
            &EngineOptions::default(),
        )
        .unwrap();

        let ceo = store.employee(&EmployeeId::sequential(1)).unwrap();
        assert_eq!(ceo.level, 6);
        assert!(types(&events).contains(&"employee_promoted"));
        // The engineer did not vote
        assert_eq!(store.employee(&EmployeeId::sequential(2)).unwrap().experience, 0.0);
    }

    #[test]
    fn test_failed_votes_earn_no_experience() {
        let (mut store, id) = store();
        let mut decision = Decision::new(id.clone(), DecisionType::Product, 1);
        decision.begin_voting(Utc::now()).unwrap();
        decision
            .record_vote(EmployeeId::sequential(1), VoteRecord::failed("timeout"))
            .unwrap();
        decision.resolve(QuorumRule::Plurality, Utc::now()).unwrap();
        let mut decisions = vec![decision];

        settle(
            &mut store,
            &mut decisions,
            1,
            &SimulationConfig::default(),
            &EngineOptions::default(),
        )
        .unwrap();

        assert_eq!(store.employee(&EmployeeId::sequential(1)).unwrap().experience, 0.0);
        assert_eq!(decisions[0].status(), DecisionStatus::Expired);
    }

    #[test]
    fn test_company_out_of_funds_goes_bankrupt() {
        let config = SimulationConfig {
            base_funding_rate: 100,
            ..SimulationConfig::default()
        };
        let mut store = EntityStore::new();
        let broke = store.found_company("Broke", CompanyType::Startup);
        for i in 0..25 {
            store.hire(&broke, format!("E{i}"), EmployeeRole::Engineer, "", "");
        }
        store.company_mut(&broke).unwrap().funds = 0;

        // Payroll of 25 * 5 exceeds the 100 income
        let events = settle(&mut store, &mut [], 1, &config, &EngineOptions::default()).unwrap();

        assert!(!store.company(&broke).unwrap().is_active);
        assert_eq!(store.active_employees(&broke).count(), 0);
        assert_eq!(store.employee_count(), 25);
        assert_eq!(
            types(&events),
            vec!["funding", "company_bankrupt", "round_completed"]
        );
    }

    #[test]
    fn test_missing_company_is_an_error() {
        let (mut store, _) = store();
        let ghost = CompanyId::new("company-99");
        let mut decisions = vec![decided(&ghost, DecisionType::Product, &[VoteChoice::For])];

        let result = settle(
            &mut store,
            &mut decisions,
            1,
            &SimulationConfig::default(),
            &EngineOptions::default(),
        );
        assert!(matches!(result, Err(DomainError::CompanyNotFound(_))));
    }
}
