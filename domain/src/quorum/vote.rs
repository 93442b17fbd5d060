//! Vote types for company decisions
//!
//! This module defines the voting primitives employees use when a decision
//! is put to the company.

use serde::{Deserialize, Serialize};

/// How a single employee voted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::For => "for",
            VoteChoice::Against => "against",
            VoteChoice::Abstain => "abstain",
        }
    }

    /// Whether this vote counts toward quorum
    pub fn is_cast(&self) -> bool {
        !matches!(self, VoteChoice::Abstain)
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded vote, with its rationale or failure note
///
/// # Example
///
/// ```
/// use boardroom_domain::quorum::{VoteChoice, VoteRecord};
///
/// let vote = VoteRecord::new(VoteChoice::For).with_rationale("Runway is long enough.");
/// assert!(!vote.is_failure());
///
/// let failed = VoteRecord::failed("provider timed out");
/// assert_eq!(failed.vote, VoteChoice::Abstain);
/// assert!(failed.is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub vote: VoteChoice,
    /// Reasoning behind the vote, if the voter gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Error note when the voter's AI call failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VoteRecord {
    pub fn new(vote: VoteChoice) -> Self {
        Self {
            vote,
            rationale: None,
            error: None,
        }
    }

    /// An abstention caused by a failed or timed-out AI call
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            vote: VoteChoice::Abstain,
            rationale: None,
            error: Some(error.into()),
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Vote counts for a decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub votes_for: u32,
    pub votes_against: u32,
    pub abstentions: u32,
}

impl VoteTally {
    pub fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::For => self.votes_for += 1,
            VoteChoice::Against => self.votes_against += 1,
            VoteChoice::Abstain => self.abstentions += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.votes_for + self.votes_against + self.abstentions
    }

    /// Votes that were not abstentions
    pub fn cast(&self) -> u32 {
        self.votes_for + self.votes_against
    }

    /// Share of all voters that voted for (0.0 to 1.0)
    pub fn approval_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.votes_for as f64 / self.total() as f64
        }
    }

    /// Compact visual summary, e.g. `[●●○-]`
    pub fn summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.votes_for as usize));
        summary.extend(std::iter::repeat_n('○', self.votes_against as usize));
        summary.extend(std::iter::repeat_n('-', self.abstentions as usize));
        summary.push(']');
        summary
    }
}

/// Where a tally currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteResult {
    /// More votes for than against
    Passing,
    /// More votes against than for
    Failing,
    /// Equal non-zero for and against
    Tied,
    /// Nobody cast a non-abstaining vote
    NoQuorum,
}

impl VoteResult {
    pub fn from_tally(tally: &VoteTally) -> Self {
        if tally.cast() == 0 {
            VoteResult::NoQuorum
        } else if tally.votes_for > tally.votes_against {
            VoteResult::Passing
        } else if tally.votes_for < tally.votes_against {
            VoteResult::Failing
        } else {
            VoteResult::Tied
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteResult::Passing => "passing",
            VoteResult::Failing => "failing",
            VoteResult::Tied => "tied",
            VoteResult::NoQuorum => "no_quorum",
        }
    }
}

impl std::fmt::Display for VoteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
