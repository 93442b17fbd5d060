//! Mapping AI proposals to votes

use crate::quorum::{VoteChoice, parse_confidence, parse_vote_keyword};

/// Strategy turning a proposal into a vote
pub trait VoteInterpreter: Send + Sync {
    /// `confidence` is the client-reported confidence, when it gave one.
    fn interpret(&self, content: &str, confidence: Option<f64>) -> VoteChoice;
}

/// Keyword-first interpretation with a confidence fallback.
///
/// Explicit keywords (APPROVE / SUPPORT, REJECT / OPPOSE) decide the vote.
/// Otherwise the reported confidence, or one parsed from the text, votes
/// for at or above `approve_threshold`, against at or below
/// `reject_threshold`, and abstains in between or when none is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordVoteInterpreter {
    pub approve_threshold: f64,
    pub reject_threshold: f64,
}

impl Default for KeywordVoteInterpreter {
    fn default() -> Self {
        Self {
            approve_threshold: 0.6,
            reject_threshold: 0.4,
        }
    }
}

impl VoteInterpreter for KeywordVoteInterpreter {
    fn interpret(&self, content: &str, confidence: Option<f64>) -> VoteChoice {
        if let Some(choice) = parse_vote_keyword(content) {
            return choice;
        }

        match confidence.or_else(|| parse_confidence(content)) {
            Some(c) if c >= self.approve_threshold => VoteChoice::For,
            Some(c) if c <= self.reject_threshold => VoteChoice::Against,
            _ => VoteChoice::Abstain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_win_over_confidence() {
        let interpreter = KeywordVoteInterpreter::default();
        assert_eq!(interpreter.interpret("REJECT the plan", Some(0.9)), VoteChoice::Against);
        assert_eq!(interpreter.interpret("I approve", Some(0.1)), VoteChoice::For);
    }

    #[test]
    fn test_confidence_thresholds() {
        let interpreter = KeywordVoteInterpreter::default();
        assert_eq!(interpreter.interpret("Looks fine", Some(0.6)), VoteChoice::For);
        assert_eq!(interpreter.interpret("Looks fine", Some(0.4)), VoteChoice::Against);
        assert_eq!(interpreter.interpret("Looks fine", Some(0.5)), VoteChoice::Abstain);
    }

    #[test]
    fn test_confidence_parsed_from_text() {
        let interpreter = KeywordVoteInterpreter::default();
        assert_eq!(interpreter.interpret("Confidence: 0.8", None), VoteChoice::For);
        assert_eq!(interpreter.interpret("no opinion", None), VoteChoice::Abstain);
    }
}
