//! Progress notification port
//!
//! Defines the interface for reporting progress while a round executes.

use boardroom_domain::{CompanyId, EmployeeId, RoundPhase};

/// Callback for progress updates during round execution
///
/// Implementations live in the presentation layer.
pub trait RoundProgressNotifier: Send + Sync {
    /// Called when a round starts
    fn on_round_start(&self, round: u64, companies: usize);

    /// Called when a phase starts with the number of tasks in it
    fn on_phase_start(&self, phase: RoundPhase, total_tasks: usize);

    /// Called when one employee's AI call finishes
    fn on_proposal_complete(&self, _company: &CompanyId, _employee: &EmployeeId, _success: bool) {}

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: RoundPhase);

    /// Called when a round has been published
    fn on_round_complete(&self, _round: u64, _events: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: u64, _companies: usize) {}
    fn on_phase_start(&self, _phase: RoundPhase, _total_tasks: usize) {}
    fn on_phase_complete(&self, _phase: RoundPhase) {}
}
