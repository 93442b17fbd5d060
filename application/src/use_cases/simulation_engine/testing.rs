//! Test double for the AI decision port

use crate::ports::ai_client::{AiClientError, AiDecisionClient, AiProposal, DecisionRequest};
use async_trait::async_trait;
use boardroom_domain::AiCallStats;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Approve,
    /// Approve or reject by employee number parity
    Mixed,
    Fail,
}

/// Scriptable AI client that also detects calls from overlapping rounds
#[derive(Clone)]
pub(super) struct MockClient {
    behaviour: Behaviour,
    delay: Duration,
    stats: Arc<Mutex<AiCallStats>>,
    active: Arc<Mutex<HashMap<u64, usize>>>,
    overlapped: Arc<AtomicBool>,
}

impl MockClient {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            delay: Duration::ZERO,
            stats: Arc::new(Mutex::new(AiCallStats::default())),
            active: Arc::new(Mutex::new(HashMap::new())),
            overlapped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(super) fn approving() -> Self {
        Self::new(Behaviour::Approve)
    }

    pub(super) fn mixed() -> Self {
        Self::new(Behaviour::Mixed)
    }

    pub(super) fn failing() -> Self {
        Self::new(Behaviour::Fail)
    }

    pub(super) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Whether calls from two different rounds were ever in flight together
    pub(super) fn overlapped(&self) -> bool {
        self.overlapped.load(Ordering::SeqCst)
    }

    fn enter(&self, round: u64) {
        let mut active = self.active.lock().unwrap();
        if active.iter().any(|(r, n)| *r != round && *n > 0) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        *active.entry(round).or_insert(0) += 1;
    }

    fn leave(&self, round: u64) {
        let mut active = self.active.lock().unwrap();
        if let Some(n) = active.get_mut(&round) {
            *n = n.saturating_sub(1);
        }
    }
}

#[async_trait]
impl AiDecisionClient for MockClient {
    async fn propose(&self, request: &DecisionRequest) -> Result<AiProposal, AiClientError> {
        self.enter(request.round);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.leave(request.round);

        let content = match self.behaviour {
            Behaviour::Approve => "APPROVE: worth doing",
            Behaviour::Mixed if request.employee_id.as_str().ends_with(['1', '3', '5', '7', '9']) => {
                "REJECT: too risky"
            }
            Behaviour::Mixed => "APPROVE: go ahead",
            Behaviour::Fail => {
                let mut stats = self.stats.lock().unwrap();
                stats.total_calls += 1;
                stats.failed_calls += 1;
                return Err(AiClientError::Unavailable("mock outage".to_string()));
            }
        };

        {
            let mut stats = self.stats.lock().unwrap();
            stats.total_calls += 1;
            stats.total_cost += 0.01;
        }

        Ok(AiProposal {
            content: content.to_string(),
            provider_id: "mock".to_string(),
            model_id: "mock-1".to_string(),
            cost: 0.01,
            latency: self.delay,
            confidence: None,
        })
    }

    fn call_stats(&self) -> AiCallStats {
        *self.stats.lock().unwrap()
    }

    fn record_timeout(&self) {
        let mut stats = self.stats.lock().unwrap();
        stats.total_calls += 1;
        stats.failed_calls += 1;
    }

    fn reset_stats(&self) {
        *self.stats.lock().unwrap() = AiCallStats::default();
    }
}
