//! Company voting domain
//!
//! Every decision a company takes is put to a vote among its eligible
//! employees. This module holds the voting vocabulary.
//!
//! # Flow
//!
//! ```text
//!  AI proposal text ──parse──▶ VoteChoice ──record──▶ VoteTally ──QuorumRule──▶ approve / reject
//!                                   │
//!                  failed AI call ──┴──▶ Abstain + error note
//! ```
//!
//! A tally with no non-abstaining votes never reaches quorum and can never
//! approve a decision.

pub mod parsing;
pub mod rule;
pub mod vote;

pub use parsing::{parse_confidence, parse_vote_keyword};
pub use rule::QuorumRule;
pub use vote::{VoteChoice, VoteRecord, VoteResult, VoteTally};
