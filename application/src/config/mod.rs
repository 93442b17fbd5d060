//! Application-level configuration.
//!
//! - [`EngineOptions`]: how rounds are run (quorum rule, trigger, experience per vote)

pub mod engine_options;

pub use engine_options::{EngineOptions, TriggerPolicy};
