//! Engine errors

use boardroom_domain::{ConfigRangeError, DomainError};
use thiserror::Error;

/// Errors surfaced by the simulation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Cannot {command} while simulation is {state}")]
    InvalidTransition { command: String, state: String },

    #[error("Unknown {kind}: {id}")]
    UnknownEntity { kind: &'static str, id: String },

    #[error("Configuration rejected: {}", join_range_errors(.0))]
    ConfigOutOfRange(Vec<ConfigRangeError>),

    #[error("Invalid mode: {0} (expected 'auto' or 'manual')")]
    InvalidMode(String),

    #[error("Round execution failed: {0}")]
    RoundExecution(String),
}

impl EngineError {
    pub fn unknown_company(id: impl std::fmt::Display) -> Self {
        EngineError::UnknownEntity {
            kind: "company",
            id: id.to_string(),
        }
    }

    pub fn unknown_employee(id: impl std::fmt::Display) -> Self {
        EngineError::UnknownEntity {
            kind: "employee",
            id: id.to_string(),
        }
    }

    /// Whether the caller is at fault (a client error rather than a server one)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EngineError::RoundExecution(_))
    }
}

impl From<DomainError> for EngineError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidTransition { command, state } => {
                EngineError::InvalidTransition { command, state }
            }
            DomainError::InvalidMode(mode) => EngineError::InvalidMode(mode),
            DomainError::CompanyNotFound(id) => EngineError::unknown_company(id),
            other => EngineError::RoundExecution(other.to_string()),
        }
    }
}

fn join_range_errors(errors: &[ConfigRangeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_domain::ConfigField;

    #[test]
    fn test_config_error_lists_every_field() {
        let error = EngineError::ConfigOutOfRange(vec![
            ConfigField::RoundInterval.check(5).unwrap_err(),
            ConfigField::MaxCompanies.check(50).unwrap_err(),
        ]);
        assert_eq!(
            error.to_string(),
            "Configuration rejected: round_interval = 5 is out of range [10, 300]; \
             max_companies = 50 is out of range [2, 20]"
        );
        assert!(error.is_client_error());
    }

    #[test]
    fn test_domain_error_mapping() {
        let error: EngineError = DomainError::InvalidTransition {
            command: "pause".into(),
            state: "idle".into(),
        }
        .into();
        assert_eq!(error.to_string(), "Cannot pause while simulation is idle");

        let error: EngineError = DomainError::DuplicateVoter {
            decision: "d".into(),
            voter: "v".into(),
        }
        .into();
        assert!(!error.is_client_error());
    }
}
