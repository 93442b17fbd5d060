//! Application layer for boardroom
//!
//! This crate contains the simulation engine, the decision voting use case,
//! port definitions, and engine options. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EngineOptions, TriggerPolicy};
pub use ports::{
    ai_client::{AiClientError, AiDecisionClient, AiProposal, DecisionRequest},
    audit_logger::{AuditLogger, AuditRecord, NoAuditLogger},
    progress::{NoProgress, RoundProgressNotifier},
};
pub use use_cases::run_decision::{DecisionPoint, DecisionVotingUseCase, ProposalResult};
pub use use_cases::simulation_engine::{
    SimulationEngine, SimulationEngineBuilder, error::EngineError, views::DecisionView,
};
