//! Quorum rules for resolving a company vote
//!
//! This module defines the rules used to decide whether a tally approves a
//! decision. Every rule requires at least one non-abstaining vote; a tally
//! without one never approves.

use super::vote::VoteTally;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Rule for turning a tally into approval or rejection
///
/// - `Plurality`: more votes for than against (default)
/// - `Majority`: votes for are more than half of the cast votes
/// - `Unanimous`: every cast vote is for
///
/// Abstentions never count as cast votes.
///
/// # Example
///
/// ```
/// use boardroom_domain::quorum::{QuorumRule, VoteTally};
///
/// let tally = VoteTally { votes_for: 2, votes_against: 1, abstentions: 3 };
/// assert!(QuorumRule::Plurality.approves(&tally));
/// assert!(!QuorumRule::Unanimous.approves(&tally));
///
/// let silent = VoteTally { votes_for: 0, votes_against: 0, abstentions: 4 };
/// assert!(!QuorumRule::Plurality.approves(&silent));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuorumRule {
    #[default]
    Plurality,
    Majority,
    Unanimous,
}

impl QuorumRule {
    /// Whether the tally reached quorum (at least one non-abstaining vote)
    pub fn has_quorum(&self, tally: &VoteTally) -> bool {
        tally.cast() > 0
    }

    /// Whether the tally approves under this rule
    pub fn approves(&self, tally: &VoteTally) -> bool {
        if !self.has_quorum(tally) {
            return false;
        }

        match self {
            QuorumRule::Plurality => tally.votes_for > tally.votes_against,
            QuorumRule::Majority => tally.votes_for > tally.cast() / 2,
            QuorumRule::Unanimous => tally.votes_against == 0,
        }
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> &'static str {
        match self {
            QuorumRule::Plurality => "plurality (more for than against)",
            QuorumRule::Majority => "majority (more than half of cast votes)",
            QuorumRule::Unanimous => "unanimous (no votes against)",
        }
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plurality" => Ok(QuorumRule::Plurality),
            "majority" => Ok(QuorumRule::Majority),
            "unanimous" => Ok(QuorumRule::Unanimous),
            other => Err(DomainError::InvalidRule(format!(
                "{}. Valid: plurality, majority, unanimous",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(votes_for: u32, votes_against: u32, abstentions: u32) -> VoteTally {
        VoteTally {
            votes_for,
            votes_against,
            abstentions,
        }
    }

    #[test]
    fn test_plurality_rule() {
        let rule = QuorumRule::Plurality;
        assert!(rule.approves(&t(1, 0, 5)));
        assert!(rule.approves(&t(3, 2, 0)));
        assert!(!rule.approves(&t(2, 2, 1)));
        assert!(!rule.approves(&t(1, 2, 0)));
    }

    #[test]
    fn test_majority_rule() {
        let rule = QuorumRule::Majority;
        // 3 cast: need 2
        assert!(rule.approves(&t(2, 1, 0)));
        assert!(!rule.approves(&t(1, 2, 0)));
        // 4 cast: need 3
        assert!(!rule.approves(&t(2, 2, 0)));
        assert!(rule.approves(&t(3, 1, 0)));
    }

    #[test]
    fn test_unanimous_rule() {
        let rule = QuorumRule::Unanimous;
        assert!(rule.approves(&t(3, 0, 2)));
        assert!(!rule.approves(&t(3, 1, 0)));
    }

    #[test]
    fn test_no_quorum_never_approves() {
        for rule in [QuorumRule::Plurality, QuorumRule::Majority, QuorumRule::Unanimous] {
            assert!(!rule.approves(&t(0, 0, 0)));
            assert!(!rule.approves(&t(0, 0, 3)));
            assert!(!rule.has_quorum(&t(0, 0, 3)));
        }
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("plurality".parse::<QuorumRule>().ok(), Some(QuorumRule::Plurality));
        assert_eq!("Majority".parse::<QuorumRule>().ok(), Some(QuorumRule::Majority));
        assert_eq!("unanimous".parse::<QuorumRule>().ok(), Some(QuorumRule::Unanimous));
        assert!("atleast:2".parse::<QuorumRule>().is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(QuorumRule::default(), QuorumRule::Plurality);
    }
}
