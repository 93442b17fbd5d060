//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod ai_client;
pub mod audit_logger;
pub mod progress;
