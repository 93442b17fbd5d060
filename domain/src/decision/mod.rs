//! Company decisions and the decision log

pub mod entities;
pub mod log;

pub use entities::{Decision, DecisionEffect, DecisionStatus, DecisionType};
pub use log::DecisionLog;
