//! Read-only queries and event injection
//!
//! Every query takes the world read lock once, so a response reflects a
//! single published round.

use super::error::EngineError;
use super::views::DecisionView;
use super::{SimulationEngine, World};
use crate::ports::ai_client::AiDecisionClient;
use crate::ports::audit_logger::AuditRecord;
use boardroom_domain::{
    AiCallStats, Company, CompanyId, CompanySummary, Decision, DecisionStatus, Employee,
    EmployeeId, EventType, GameStats, LeaderboardEntry, SimulationEvent, SimulationStatus,
    SimulationSummary, compute_leaderboard, util::round2,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

impl<C: AiDecisionClient + 'static> SimulationEngine<C> {
    pub async fn status(&self) -> SimulationStatus {
        let control = self.inner.control.lock().await;
        let world = self.inner.world.read().await;
        SimulationStatus {
            state: control.state,
            mode: control.mode,
            current_round: world.current_round,
            current_phase: control.phase,
            last_round_time: world.last_round_time,
            config: control.config.clone(),
        }
    }

    pub async fn stats(&self) -> GameStats {
        let world = self.inner.world.read().await;
        game_stats(&world, self.inner.client.call_stats())
    }

    /// All companies, including bankrupt ones, ordered by id
    pub async fn companies(&self) -> Vec<Company> {
        let world = self.inner.world.read().await;
        world.store.companies().cloned().collect()
    }

    pub async fn company(&self, id: &CompanyId) -> Result<Company, EngineError> {
        let world = self.inner.world.read().await;
        world
            .store
            .company(id)
            .cloned()
            .ok_or_else(|| EngineError::unknown_company(id))
    }

    /// Employees of one company, or of every company when `company_id` is `None`
    pub async fn employees(
        &self,
        company_id: Option<&CompanyId>,
    ) -> Result<Vec<Employee>, EngineError> {
        let world = self.inner.world.read().await;
        if let Some(id) = company_id
            && !world.store.contains_company(id)
        {
            return Err(EngineError::unknown_company(id));
        }
        Ok(world.store.employees(company_id).cloned().collect())
    }

    pub async fn employee(&self, id: &EmployeeId) -> Result<Employee, EngineError> {
        let world = self.inner.world.read().await;
        world
            .store
            .employee(id)
            .cloned()
            .ok_or_else(|| EngineError::unknown_employee(id))
    }

    /// Most recent events first
    pub async fn recent_events(&self, limit: usize) -> Vec<SimulationEvent> {
        let world = self.inner.world.read().await;
        world.events.recent(limit).into_iter().cloned().collect()
    }

    /// Most recent events for one company first
    pub async fn company_events(
        &self,
        company_id: &CompanyId,
        limit: usize,
    ) -> Result<Vec<SimulationEvent>, EngineError> {
        let world = self.inner.world.read().await;
        if !world.store.contains_company(company_id) {
            return Err(EngineError::unknown_company(company_id));
        }
        Ok(world
            .events
            .for_company(company_id, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Most recent decisions first, optionally for one company
    pub async fn recent_decisions(
        &self,
        limit: usize,
        company_id: Option<&CompanyId>,
    ) -> Result<Vec<Decision>, EngineError> {
        let world = self.inner.world.read().await;
        if let Some(id) = company_id
            && !world.store.contains_company(id)
        {
            return Err(EngineError::unknown_company(id));
        }
        Ok(world
            .decisions
            .recent(limit, company_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Recent decisions with company and employee names filled in
    pub async fn recent_decision_views(
        &self,
        limit: usize,
        company_id: Option<&CompanyId>,
    ) -> Result<Vec<DecisionView>, EngineError> {
        let world = self.inner.world.read().await;
        if let Some(id) = company_id
            && !world.store.contains_company(id)
        {
            return Err(EngineError::unknown_company(id));
        }
        Ok(world
            .decisions
            .recent(limit, company_id)
            .into_iter()
            .map(|d| DecisionView::new(d, &world.store))
            .collect())
    }

    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let world = self.inner.world.read().await;
        compute_leaderboard(&world.store, &world.decisions)
    }

    /// Append an administrator event at the current round.
    ///
    /// Unknown event tags are kept as custom events. A company id, when
    /// given, must name a known company.
    pub async fn inject_event(
        &self,
        event_type: &str,
        description: &str,
        company_id: Option<CompanyId>,
        data: Option<Value>,
    ) -> Result<SimulationEvent, EngineError> {
        let mut world = self.inner.world.write().await;
        if let Some(id) = &company_id
            && !world.store.contains_company(id)
        {
            return Err(EngineError::unknown_company(id));
        }

        let mut event = SimulationEvent::new(
            EventType::parse(event_type),
            world.current_round,
            description,
        )
        .with_data(data.unwrap_or_else(|| json!({})));
        if let Some(id) = company_id {
            event = event.for_company(id);
        }

        info!("Injected {} event: {}", event.event_type, event.description);
        self.inner.audit.log(AuditRecord::new(
            "event_injected",
            json!({
                "event_id": event.id,
                "event_type": event.event_type,
                "company_id": event.company_id,
                "round": event.round,
            }),
        ));

        world.events.append(event.clone());
        Ok(event)
    }

    /// Summary of the simulation as it stands
    pub async fn summary(&self) -> SimulationSummary {
        let ai = self.inner.client.call_stats();
        let world = self.inner.world.read().await;

        let companies = world
            .store
            .companies()
            .map(|company| {
                let made = world.decisions.for_company(&company.id).count();
                let approved = world
                    .decisions
                    .for_company(&company.id)
                    .filter(|d| d.status() == DecisionStatus::Approved)
                    .count();
                let staff: Vec<&Employee> = world.store.employees(Some(&company.id)).collect();
                let avg_employee_level = if staff.is_empty() {
                    0.0
                } else {
                    staff.iter().map(|e| e.level as f64).sum::<f64>() / staff.len() as f64
                };
                CompanySummary {
                    company_id: company.id.clone(),
                    name: company.name.clone(),
                    company_type: company.company_type,
                    is_active: company.is_active,
                    funds: company.funds,
                    employees: world.store.active_employees(&company.id).count(),
                    decisions_made: made,
                    decisions_approved: approved,
                    events_count: world.events.count_for_company(&company.id),
                    avg_employee_level: round2(avg_employee_level),
                    total_experience: staff.iter().map(|e| e.experience).sum(),
                }
            })
            .collect();

        SimulationSummary {
            total_rounds: world.current_round,
            ended_at: Utc::now(),
            stats: game_stats(&world, ai),
            companies,
            leaderboard: compute_leaderboard(&world.store, &world.decisions),
        }
    }
}

fn game_stats(world: &World, ai: AiCallStats) -> GameStats {
    let store = &world.store;
    GameStats {
        current_round: world.current_round,
        total_companies: store.company_count(),
        active_companies: store.active_companies().count(),
        total_employees: store.employee_count(),
        active_employees: store.employees(None).filter(|e| e.is_active).count(),
        total_decisions: world.decisions.len(),
        approved_decisions: world.decisions.count_with_status(DecisionStatus::Approved),
        rejected_decisions: world.decisions.count_with_status(DecisionStatus::Rejected),
        expired_decisions: world.decisions.count_with_status(DecisionStatus::Expired),
        total_events: world.events.len(),
        total_funds: store.companies().map(|c| c.funds).sum(),
        ai,
    }
}
