//! Append-only decision log

use super::entities::{Decision, DecisionStatus};
use crate::core::ids::CompanyId;
use crate::core::query::clamp_limit;

/// Every decision taken since the last reset, in creation order
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    decisions: Vec<Decision>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, decision: Decision) {
        self.decisions.push(decision);
    }

    pub fn extend(&mut self, decisions: impl IntoIterator<Item = Decision>) {
        self.decisions.extend(decisions);
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Decisions in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter()
    }

    /// Most recent decisions first.
    ///
    /// The company filter is applied before the limit, and the limit is
    /// clamped to the query maximum.
    pub fn recent(&self, limit: usize, company_id: Option<&CompanyId>) -> Vec<&Decision> {
        self.decisions
            .iter()
            .rev()
            .filter(|d| company_id.is_none_or(|id| &d.company_id == id))
            .take(clamp_limit(limit))
            .collect()
    }

    pub fn count_with_status(&self, status: DecisionStatus) -> usize {
        self.decisions.iter().filter(|d| d.status() == status).count()
    }

    pub fn for_company<'a>(&'a self, company_id: &'a CompanyId) -> impl Iterator<Item = &'a Decision> + 'a {
        self.decisions.iter().filter(move |d| &d.company_id == company_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::MAX_QUERY_LIMIT;
    use crate::decision::entities::DecisionType;

    fn log_with(companies: &[usize]) -> DecisionLog {
        let mut log = DecisionLog::new();
        for (round, &n) in companies.iter().enumerate() {
            log.append(Decision::new(
                CompanyId::sequential(n),
                DecisionType::Product,
                round as u64 + 1,
            ));
        }
        log
    }

    #[test]
    fn test_recent_is_most_recent_first() {
        let log = log_with(&[1, 2, 3]);
        let rounds: Vec<_> = log.recent(2, None).iter().map(|d| d.round).collect();
        assert_eq!(rounds, vec![3, 2]);
    }

    #[test]
    fn test_recent_filters_before_limit() {
        let log = log_with(&[1, 2, 1, 2, 2]);
        let company = CompanyId::sequential(1);
        let recent = log.recent(5, Some(&company));
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|d| d.company_id == company));
        assert_eq!(recent[0].round, 3);
    }

    #[test]
    fn test_recent_limit_is_clamped() {
        let log = log_with(&vec![1; MAX_QUERY_LIMIT + 5]);
        assert_eq!(log.recent(usize::MAX, None).len(), MAX_QUERY_LIMIT);
    }

    #[test]
    fn test_count_with_status() {
        let log = log_with(&[1, 2]);
        assert_eq!(log.count_with_status(DecisionStatus::Pending), 2);
        assert_eq!(log.count_with_status(DecisionStatus::Approved), 0);
    }
}
