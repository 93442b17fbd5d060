//! AI decision client adapters
//!
//! [`SimulatedAiClient`] stands in for a real provider: it answers every
//! request locally with a persona-flavoured proposal after a random latency.

mod simulated;

pub use simulated::{SimulatedAiClient, SimulatedAiSettings};
