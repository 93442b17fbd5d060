//! Progress reporting for round execution

use boardroom_application::ports::progress::RoundProgressNotifier;
use boardroom_domain::{CompanyId, EmployeeId, RoundPhase};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};

/// Reports progress during a round with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.phase_bar.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn phase_display_name(phase: RoundPhase) -> &'static str {
        match phase {
            RoundPhase::Deciding => "Deciding",
            RoundPhase::Voting => "Voting",
            RoundPhase::Settling => "Settling",
            RoundPhase::Idle => "Idle",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: u64, companies: usize) {
        let _ = self.multi.println(format!(
            "{} {} ({} companies)",
            "->".cyan(),
            format!("Round {}", round).bold(),
            companies
        ));
    }

    fn on_phase_start(&self, phase: RoundPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(format!("{:<8}", Self::phase_display_name(phase)));
        pb.set_message("Starting...");

        *self.phase_bar() = Some(pb);
    }

    fn on_proposal_complete(&self, _company: &CompanyId, employee: &EmployeeId, success: bool) {
        if let Some(pb) = self.phase_bar().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), employee)
            } else {
                format!("{} {}", "x".red(), employee)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: RoundPhase) {
        if let Some(pb) = self.phase_bar().take() {
            if phase != RoundPhase::Deciding {
                pb.set_position(pb.length().unwrap_or(0));
            }
            pb.finish_with_message(format!("{} complete", Self::phase_display_name(phase).green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: u64, companies: usize) {
        println!(
            "{} {} ({} companies)",
            "->".cyan(),
            format!("Round {}", round).bold(),
            companies
        );
    }

    fn on_phase_start(&self, phase: RoundPhase, total_tasks: usize) {
        println!(
            "  {} ({} tasks)",
            ProgressReporter::phase_display_name(phase),
            total_tasks
        );
    }

    fn on_proposal_complete(&self, _company: &CompanyId, employee: &EmployeeId, success: bool) {
        if !success {
            println!("    {} {} (failed)", "x".red(), employee);
        }
    }

    fn on_phase_complete(&self, _phase: RoundPhase) {}

    fn on_round_complete(&self, round: u64, events: usize) {
        println!("  Round {} published {} events", round, events);
    }
}
