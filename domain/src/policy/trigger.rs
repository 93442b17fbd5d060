//! Decision trigger policies
//!
//! A trigger decides, per company and round, whether a decision point
//! occurs and what kind of decision it is.

use crate::company::entities::Company;
use crate::decision::entities::DecisionType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Strategy deciding whether a company takes a decision this round
pub trait DecisionTrigger: Send + Sync {
    /// `position` is the company's index among this round's active companies.
    fn decision_point(&self, round: u64, company: &Company, position: usize) -> Option<DecisionType>;

    fn name(&self) -> &'static str;
}

/// One decision per active company per round.
///
/// The decision type rotates with the round number and the company's
/// position so neighbouring companies face different choices.
#[derive(Debug, Clone, Copy, Default)]
pub struct EveryRoundTrigger;

impl DecisionTrigger for EveryRoundTrigger {
    fn decision_point(&self, round: u64, _company: &Company, position: usize) -> Option<DecisionType> {
        let types = DecisionType::all();
        let index = (round as usize).wrapping_add(position) % types.len();
        Some(types[index])
    }

    fn name(&self) -> &'static str {
        "every_round"
    }
}

/// A decision point occurs with a fixed probability; the type is random
#[derive(Debug)]
pub struct ProbabilisticTrigger {
    probability: f64,
    rng: Mutex<StdRng>,
}

impl ProbabilisticTrigger {
    /// `probability` is clamped to `[0, 1]`. A seed makes runs reproducible.
    pub fn new(probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl DecisionTrigger for ProbabilisticTrigger {
    fn decision_point(&self, _round: u64, _company: &Company, _position: usize) -> Option<DecisionType> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !rng.gen_bool(self.probability) {
            return None;
        }
        let types = DecisionType::all();
        Some(types[rng.gen_range(0..types.len())])
    }

    fn name(&self) -> &'static str {
        "probabilistic"
    }
}
