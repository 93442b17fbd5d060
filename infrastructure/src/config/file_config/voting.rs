//! Voting configuration from TOML (`[voting]` section)
//!
//! ```toml
//! [voting]
//! rule = "plurality"          # or "majority", "unanimous"
//! trigger = "probabilistic"   # or "every_round"
//! probability = 0.5
//! seed = 7
//! experience_per_vote = 1.0
//! approve_threshold = 0.6
//! reject_threshold = 0.4
//! ```

use boardroom_application::{EngineOptions, TriggerPolicy};
use boardroom_domain::{KeywordVoteInterpreter, QuorumRule};
use serde::{Deserialize, Serialize};

/// Raw voting configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    pub rule: QuorumRule,
    /// "every_round" or "probabilistic"
    pub trigger: String,
    /// Decision point probability for the probabilistic trigger
    pub probability: f64,
    pub seed: Option<u64>,
    pub experience_per_vote: f64,
    pub approve_threshold: f64,
    pub reject_threshold: f64,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        let interpreter = KeywordVoteInterpreter::default();
        Self {
            rule: QuorumRule::default(),
            trigger: "every_round".to_string(),
            probability: 0.5,
            seed: None,
            experience_per_vote: EngineOptions::default().experience_per_vote,
            approve_threshold: interpreter.approve_threshold,
            reject_threshold: interpreter.reject_threshold,
        }
    }
}

impl FileVotingConfig {
    /// Parse the trigger name into a policy
    pub fn parse_trigger(&self) -> Option<TriggerPolicy> {
        match self.trigger.to_lowercase().replace('-', "_").as_str() {
            "every_round" => Some(TriggerPolicy::EveryRound),
            "probabilistic" => Some(TriggerPolicy::Probabilistic {
                probability: self.probability,
                seed: self.seed,
            }),
            _ => None,
        }
    }

    /// Engine options; an unknown trigger falls back to the default
    pub fn to_engine_options(&self) -> EngineOptions {
        EngineOptions::default()
            .with_quorum_rule(self.rule)
            .with_trigger(self.parse_trigger().unwrap_or_default())
            .with_experience_per_vote(self.experience_per_vote)
    }

    pub fn to_interpreter(&self) -> KeywordVoteInterpreter {
        KeywordVoteInterpreter {
            approve_threshold: self.approve_threshold,
            reject_threshold: self.reject_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = FileVotingConfig::default();
        assert_eq!(config.to_engine_options(), EngineOptions::default());
        assert_eq!(config.to_interpreter(), KeywordVoteInterpreter::default());
    }

    #[test]
    fn test_deserialize_probabilistic() {
        let toml_str = r#"
[voting]
rule = "unanimous"
trigger = "probabilistic"
probability = 0.25
seed = 9
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let options = config.voting.to_engine_options();
        assert_eq!(options.quorum_rule, QuorumRule::Unanimous);
        assert_eq!(
            options.trigger,
            TriggerPolicy::Probabilistic {
                probability: 0.25,
                seed: Some(9)
            }
        );
    }

    #[test]
    fn test_unknown_trigger() {
        let config = FileVotingConfig {
            trigger: "sometimes".to_string(),
            ..FileVotingConfig::default()
        };
        assert!(config.parse_trigger().is_none());
        assert_eq!(config.to_engine_options().trigger, TriggerPolicy::EveryRound);
    }
}
