//! Engine options: round execution policy.
//!
//! [`EngineOptions`] groups the knobs that shape how a round is resolved
//! and settled. The bounded runtime settings (interval, funding, timeout)
//! live in the domain's `SimulationConfig` instead, since callers may
//! change them while the simulation runs.

use boardroom_domain::{DecisionTrigger, EveryRoundTrigger, ProbabilisticTrigger, QuorumRule};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which decision trigger the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// One decision per active company per round
    #[default]
    EveryRound,
    /// A decision point occurs with the given probability
    Probabilistic { probability: f64, seed: Option<u64> },
}

impl TriggerPolicy {
    pub fn build(&self) -> Arc<dyn DecisionTrigger> {
        match *self {
            TriggerPolicy::EveryRound => Arc::new(EveryRoundTrigger),
            TriggerPolicy::Probabilistic { probability, seed } => {
                Arc::new(ProbabilisticTrigger::new(probability, seed))
            }
        }
    }
}

/// Round execution options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Rule turning a tally into approval
    pub quorum_rule: QuorumRule,
    /// Decision trigger policy
    pub trigger: TriggerPolicy,
    /// Experience gained per successfully cast vote
    pub experience_per_vote: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            quorum_rule: QuorumRule::default(),
            trigger: TriggerPolicy::default(),
            experience_per_vote: 1.0,
        }
    }
}

impl EngineOptions {
    pub fn with_quorum_rule(mut self, rule: QuorumRule) -> Self {
        self.quorum_rule = rule;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerPolicy) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_experience_per_vote(mut self, experience: f64) -> Self {
        self.experience_per_vote = experience.max(0.0);
        self
    }
}
