//! Domain layer for boardroom
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure, presentation, or an async runtime.
//!
//! # Core Concepts
//!
//! ## Companies
//!
//! A population of competing [`Company`] entities, each staffed by
//! [`Employee`]s, lives in an [`EntityStore`]. Nothing is ever removed:
//! bankrupt companies are deactivated together with their staff.
//!
//! ## Decisions and voting
//!
//! Every round, a [`DecisionTrigger`] decides which companies face a
//! [`Decision`]. Eligible employees vote; a [`QuorumRule`] turns the
//! [`VoteTally`] into approval, rejection, or expiry.
//!
//! ## Simulation
//!
//! The lifecycle is a small state machine ([`SimulationState`]) driven by
//! [`LifecycleCommand`]s. Configuration is bounded ([`SimulationConfig`]),
//! and reporting is derived from the logs ([`compute_leaderboard`]).

pub mod company;
pub mod core;
pub mod decision;
pub mod event;
pub mod policy;
pub mod prompt;
pub mod quorum;
pub mod simulation;
pub mod util;

// Re-export commonly used types
pub use company::{
    Company, CompanyType, EXPERIENCE_PER_LEVEL, Employee, EmployeeRole, EntityStore,
    PopulationSeed, population::hire_next,
};
pub use core::{
    error::DomainError,
    ids::{CompanyId, DecisionId, EmployeeId, EventId},
    query::{MAX_QUERY_LIMIT, clamp_limit},
};
pub use decision::{Decision, DecisionEffect, DecisionLog, DecisionStatus, DecisionType};
pub use event::{EventLog, EventType, SimulationEvent};
pub use policy::{
    DecisionTrigger, EveryRoundTrigger, KeywordVoteInterpreter, ProbabilisticTrigger,
    VoteInterpreter,
};
pub use prompt::DecisionPromptTemplate;
pub use quorum::{
    QuorumRule, VoteChoice, VoteRecord, VoteResult, VoteTally, parse_confidence,
    parse_vote_keyword,
};
pub use simulation::{
    AiCallStats, CompanySummary, ConfigField, ConfigRangeError, ConfigUpdate, GameStats,
    LeaderboardEntry, LifecycleCommand, RoundPhase, SimulationConfig, SimulationMode,
    SimulationState, SimulationStatus, SimulationSummary, compute_leaderboard,
};
