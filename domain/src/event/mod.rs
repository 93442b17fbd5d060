//! Simulation events and the event log

pub mod entities;
pub mod log;

pub use entities::{EventType, SimulationEvent};
pub use log::EventLog;
