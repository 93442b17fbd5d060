//! Append-only event log

use super::entities::SimulationEvent;
use crate::core::ids::CompanyId;
use crate::core::query::clamp_limit;

/// Time-ordered record of simulation events.
///
/// Events are never mutated or removed; duplicate descriptions are valid.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimulationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = SimulationEvent>) {
        self.events.extend(events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimulationEvent> {
        self.events.iter()
    }

    /// The last `limit` events, most recent first
    pub fn recent(&self, limit: usize) -> Vec<&SimulationEvent> {
        self.events.iter().rev().take(clamp_limit(limit)).collect()
    }

    /// The last `limit` events of one company, most recent first
    pub fn for_company(&self, company_id: &CompanyId, limit: usize) -> Vec<&SimulationEvent> {
        self.events
            .iter()
            .rev()
            .filter(|e| e.company_id.as_ref() == Some(company_id))
            .take(clamp_limit(limit))
            .collect()
    }

    /// Number of events tagged with one company, over the whole log
    pub fn count_for_company(&self, company_id: &CompanyId) -> usize {
        self.events
            .iter()
            .filter(|e| e.company_id.as_ref() == Some(company_id))
            .count()
    }
}
