//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised when a domain method is asked to break one of its own invariants
/// (e.g. recording a vote on a decision that is not in voting).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Decision {decision} cannot move from {from} to {to}")]
    InvalidDecisionTransition {
        decision: String,
        from: String,
        to: String,
    },

    #[error("Voter {voter} has already voted on decision {decision}")]
    DuplicateVoter { decision: String, voter: String },

    #[error("Cannot {command} while simulation is {state}")]
    InvalidTransition { command: String, state: String },

    #[error("Invalid mode: {0} (expected 'auto' or 'manual')")]
    InvalidMode(String),

    #[error("Invalid quorum rule: {0}")]
    InvalidRule(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_display() {
        let error = DomainError::InvalidMode("turbo".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid mode: turbo (expected 'auto' or 'manual')"
        );
    }

    #[test]
    fn test_duplicate_voter_display() {
        let error = DomainError::DuplicateVoter {
            decision: "d-1".to_string(),
            voter: "employee-0001".to_string(),
        };
        assert!(error.to_string().contains("employee-0001"));
        assert!(error.to_string().contains("d-1"));
    }
}
