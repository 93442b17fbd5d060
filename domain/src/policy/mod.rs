//! Injectable decision policies
//!
//! How often decisions happen and how a proposal becomes a vote are policy
//! knobs, not fixed rules. Both are traits so the engine can be configured
//! or tested with alternatives.

pub mod interpreter;
pub mod trigger;

pub use interpreter::{KeywordVoteInterpreter, VoteInterpreter};
pub use trigger::{DecisionTrigger, EveryRoundTrigger, ProbabilisticTrigger};
