//! Simulated AI decision client
//!
//! Produces proposals whose verdict leans on the employee's personality and
//! the decision type. Latency, cost and failures are drawn from the
//! configured ranges, so rounds exercise the same timeout and abstain paths
//! a remote provider would.

use async_trait::async_trait;
use boardroom_application::ports::ai_client::{
    AiClientError, AiDecisionClient, AiProposal, DecisionRequest,
};
use boardroom_domain::{AiCallStats, DecisionType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, trace};

/// Tunables for [`SimulatedAiClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedAiSettings {
    pub provider_id: String,
    pub model_id: String,
    pub min_latency: Duration,
    pub max_latency: Duration,
    /// Probability (0.0 to 1.0) that a call fails
    pub failure_rate: f64,
    /// Cost charged per successful call
    pub cost_per_call: f64,
    /// Base probability of an approving answer before persona adjustments
    pub approval_bias: f64,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulatedAiSettings {
    fn default() -> Self {
        Self {
            provider_id: "simulated".to_string(),
            model_id: "boardroom-sim-1".to_string(),
            min_latency: Duration::from_millis(50),
            max_latency: Duration::from_millis(400),
            failure_rate: 0.05,
            cost_per_call: 0.002,
            approval_bias: 0.6,
            seed: None,
        }
    }
}

/// What one call will do, drawn before sleeping
enum Outcome {
    Fail(&'static str),
    Answer { approve: bool, confidence: f64, phrasing: u8 },
}

/// AI decision client that answers locally
pub struct SimulatedAiClient {
    settings: SimulatedAiSettings,
    rng: Mutex<StdRng>,
    stats: Mutex<AiCallStats>,
}

impl SimulatedAiClient {
    pub fn new(settings: SimulatedAiSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            rng: Mutex::new(rng),
            stats: Mutex::new(AiCallStats::default()),
        }
    }

    pub fn settings(&self) -> &SimulatedAiSettings {
        &self.settings
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn stats(&self) -> MutexGuard<'_, AiCallStats> {
        self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn draw(&self, request: &DecisionRequest) -> (Duration, Outcome) {
        let mut rng = self.rng();

        let min = self.settings.min_latency.as_millis() as u64;
        let max = (self.settings.max_latency.as_millis() as u64).max(min);
        let latency = Duration::from_millis(rng.gen_range(min..=max));

        if rng.gen_bool(self.settings.failure_rate.clamp(0.0, 1.0)) {
            let reason = if rng.gen_bool(0.5) {
                "rate limited"
            } else {
                "upstream error"
            };
            return (latency, Outcome::Fail(reason));
        }

        let p = approval_probability(self.settings.approval_bias, request);
        let approve = rng.gen_bool(p);
        let confidence = rng.gen_range(0.65..=0.95);
        let phrasing = rng.gen_range(0..3);

        (
            latency,
            Outcome::Answer {
                approve,
                confidence,
                phrasing,
            },
        )
    }
}

/// Approval probability for a request, from the base bias and the persona
fn approval_probability(bias: f64, request: &DecisionRequest) -> f64 {
    let cautious = request.ai_personality == "cautious";
    let personality = match request.ai_personality.as_str() {
        "visionary" | "aggressive" => 0.15,
        "collaborative" => 0.05,
        "cautious" => -0.15,
        _ => 0.0,
    };
    let decision = match request.decision_type {
        DecisionType::Hiring if cautious => -0.1,
        DecisionType::CostCutting if cautious => 0.1,
        DecisionType::Investment | DecisionType::Product => 0.05,
        _ => 0.0,
    };
    // Senior staff are a little more conservative
    let seniority = -0.02 * request.level.saturating_sub(1) as f64;

    (bias + personality + decision + seniority).clamp(0.05, 0.95)
}

fn render(request: &DecisionRequest, approve: bool, confidence: f64, phrasing: u8) -> String {
    let topic = request.decision_type.as_str().replace('_', " ");
    let company = &request.company_name;
    match (phrasing, approve) {
        (0, true) => format!(
            "APPROVE. As {} I see the {} move paying off for {} this quarter.",
            request.role.display_name(),
            topic,
            company
        ),
        (0, false) => format!(
            "REJECT. As {} I think the {} move is the wrong bet for {} right now.",
            request.role.display_name(),
            topic,
            company
        ),
        (1, true) => format!(
            "I SUPPORT this {} proposal; {} can absorb it. Confidence: {:.0}%",
            topic,
            company,
            confidence * 100.0
        ),
        (1, false) => format!(
            "I OPPOSE this {} proposal; {} should wait. Confidence: {:.0}%",
            topic,
            company,
            confidence * 100.0
        ),
        // No keyword: the interpreter falls back to the confidence
        (_, true) => serde_json::json!({
            "confidence": confidence,
            "note": format!("{} fits the {} plan", topic, company),
        })
        .to_string(),
        (_, false) => serde_json::json!({
            "confidence": 1.0 - confidence,
            "note": format!("{} strains the {} plan", topic, company),
        })
        .to_string(),
    }
}

#[async_trait]
impl AiDecisionClient for SimulatedAiClient {
    async fn propose(&self, request: &DecisionRequest) -> Result<AiProposal, AiClientError> {
        let (latency, outcome) = self.draw(request);
        trace!(
            "Simulated call for {} ({}) will take {:?}",
            request.employee_name, request.company_name, latency
        );
        tokio::time::sleep(latency).await;

        match outcome {
            Outcome::Fail(reason) => {
                {
                    let mut stats = self.stats();
                    stats.total_calls += 1;
                    stats.failed_calls += 1;
                }
                debug!(
                    "Simulated call for {} failed: {}",
                    request.employee_name, reason
                );
                Err(AiClientError::Unavailable(reason.to_string()))
            }
            Outcome::Answer {
                approve,
                confidence,
                phrasing,
            } => {
                {
                    let mut stats = self.stats();
                    stats.total_calls += 1;
                    stats.total_cost += self.settings.cost_per_call;
                }
                let reported = if approve { confidence } else { 1.0 - confidence };
                Ok(AiProposal {
                    content: render(request, approve, confidence, phrasing),
                    provider_id: self.settings.provider_id.clone(),
                    model_id: self.settings.model_id.clone(),
                    cost: self.settings.cost_per_call,
                    latency,
                    confidence: Some(reported),
                })
            }
        }
    }

    fn call_stats(&self) -> AiCallStats {
        *self.stats()
    }

    fn record_timeout(&self) {
        let mut stats = self.stats();
        stats.total_calls += 1;
        stats.failed_calls += 1;
    }

    fn reset_stats(&self) {
        *self.stats() = AiCallStats::default();
    }
}
