//! Console output formatter for simulation reports

use boardroom_application::DecisionView;
use boardroom_domain::{
    DecisionStatus, EventType, GameStats, LeaderboardEntry, SimulationEvent, SimulationStatus,
    SimulationSummary, util::ellipsize,
};
use colored::Colorize;
use serde::Serialize;

/// Widest description printed in an event line
const DESCRIPTION_WIDTH: usize = 72;

/// Formats simulation state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Events of one completed round
    pub fn format_round(round: u64, events: &[SimulationEvent]) -> String {
        let mut output = Self::section_header(&format!("Round {}", round));
        for event in events {
            output.push_str(&Self::event_line(event));
            output.push('\n');
        }
        output
    }

    /// Recent events, newest first
    pub fn format_events(events: &[SimulationEvent]) -> String {
        let mut output = Self::section_header("Recent Events");
        if events.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for event in events {
            output.push_str(&format!(
                "{} {}\n",
                format!("r{:<3}", event.round).dimmed(),
                Self::event_line(event)
            ));
        }
        output
    }

    /// Recent decisions with their votes
    pub fn format_decisions(decisions: &[DecisionView]) -> String {
        let mut output = Self::section_header("Decisions");
        for view in decisions {
            output.push_str(&format!(
                "  r{:<3} {:<22} {:<13} {} {} lead {}\n",
                view.round,
                ellipsize(&view.company_name, 22),
                view.decision_type.as_str(),
                Self::status_label(view.status),
                format!(
                    "({} for / {} against / {} abstain)",
                    view.votes_for, view.votes_against, view.abstentions
                )
                .dimmed(),
                view.employee_name
            ));
        }
        output
    }

    /// Leaderboard table
    pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
        let mut output = Self::section_header("Leaderboard");
        output.push_str(&format!(
            "{}\n",
            format!(
                "  {:>4}  {:<22} {:<13} {:>10} {:>5} {:>8}",
                "Rank", "Company", "Type", "Funds", "Staff", "Score"
            )
            .bold()
        ));

        for entry in entries {
            let name = ellipsize(&entry.company_name, 22);
            let line = format!(
                "  {:>4}  {:<22} {:<13} {:>10} {:>5} {:>8.2}",
                entry.rank,
                name,
                entry.company_type.as_str(),
                entry.funds,
                entry.employees,
                entry.total_score
            );
            if entry.is_active {
                output.push_str(&line);
            } else {
                output.push_str(&format!("{} {}", line.dimmed(), "(bankrupt)".red()));
            }
            output.push('\n');
        }
        output
    }

    /// Aggregate statistics
    pub fn format_stats(stats: &GameStats) -> String {
        let mut output = Self::section_header("Statistics");
        let rows = [
            ("Rounds", stats.current_round.to_string()),
            (
                "Companies",
                format!("{} active / {} total", stats.active_companies, stats.total_companies),
            ),
            (
                "Employees",
                format!("{} active / {} total", stats.active_employees, stats.total_employees),
            ),
            (
                "Decisions",
                format!(
                    "{} ({} approved, {} rejected, {} expired)",
                    stats.total_decisions,
                    stats.approved_decisions,
                    stats.rejected_decisions,
                    stats.expired_decisions
                ),
            ),
            ("Events", stats.total_events.to_string()),
            ("Total funds", stats.total_funds.to_string()),
            (
                "AI calls",
                format!(
                    "{} ({} failed, {:.0}% success, cost {:.4})",
                    stats.ai.total_calls,
                    stats.ai.failed_calls,
                    stats.ai.success_rate() * 100.0,
                    stats.ai.total_cost
                ),
            ),
        ];
        for (label, value) in rows {
            output.push_str(&format!("  {:<12} {}\n", format!("{}:", label).cyan(), value));
        }
        output
    }

    /// One-line engine status
    pub fn format_status(status: &SimulationStatus) -> String {
        format!(
            "{} {} | {} {} | {} {} | {} {}s",
            "State:".cyan().bold(),
            status.state,
            "Mode:".cyan().bold(),
            status.mode,
            "Round:".cyan().bold(),
            status.current_round,
            "Interval:".cyan().bold(),
            status.config.round_interval
        )
    }

    /// Final summary: leaderboard followed by statistics
    pub fn format_summary(summary: &SimulationSummary) -> String {
        let mut output = Self::header(&format!(
            "Simulation ended after {} rounds",
            summary.total_rounds
        ));
        output.push('\n');
        output.push_str(&Self::format_leaderboard(&summary.leaderboard));
        output.push_str(&Self::format_stats(&summary.stats));
        output.push_str(&Self::footer());
        output
    }

    /// Any report as pretty JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn event_line(event: &SimulationEvent) -> String {
        let tag = format!("{:<18}", event.event_type.as_str());
        let tag = match &event.event_type {
            EventType::DecisionApproved | EventType::EmployeeHired | EventType::EmployeePromoted => {
                tag.green()
            }
            EventType::DecisionRejected | EventType::CompanyBankrupt => tag.red(),
            EventType::DecisionExpired => tag.yellow(),
            EventType::RoundCompleted => tag.cyan().bold(),
            EventType::Custom(_) => tag.magenta(),
            _ => tag.normal(),
        };
        format!(
            "  {} {}",
            tag,
            ellipsize(&event.description, DESCRIPTION_WIDTH)
        )
    }

    fn status_label(status: DecisionStatus) -> colored::ColoredString {
        let label = format!("{:<8}", status.as_str());
        match status {
            DecisionStatus::Approved => label.green(),
            DecisionStatus::Rejected => label.red(),
            DecisionStatus::Expired => label.yellow(),
            _ => label.normal(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_domain::{CompanyId, CompanyType};

    fn plain() {
        colored::control::set_override(false);
    }

    fn entry(rank: usize, name: &str, active: bool) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            company_id: CompanyId::sequential(rank),
            company_name: name.to_string(),
            company_type: CompanyType::Startup,
            is_active: active,
            funds: 52_000,
            employees: 3,
            funds_score: 5.2,
            size_score: 30.0,
            activity_score: 5.0,
            quality_score: 0.0,
            total_score: 40.2,
        }
    }

    #[test]
    fn test_leaderboard_lists_every_entry() {
        plain();
        let output = ConsoleFormatter::format_leaderboard(&[
            entry(1, "Nimbus Labs", true),
            entry(2, "Ironclad Holdings", false),
        ]);

        assert!(output.contains("Nimbus Labs"));
        assert!(output.contains("40.20"));
        assert!(output.contains("Ironclad Holdings"));
        assert!(output.contains("(bankrupt)"));
    }

    #[test]
    fn test_round_lists_events() {
        plain();
        let events = vec![
            SimulationEvent::new(EventType::Funding, 2, "Nimbus Labs received 1000 funding"),
            SimulationEvent::new(EventType::RoundCompleted, 2, "Round 2 completed"),
        ];
        let output = ConsoleFormatter::format_round(2, &events);

        assert!(output.contains("Round 2"));
        assert!(output.contains("funding"));
        assert!(output.contains("round_completed"));
        assert_eq!(output.matches('\n').count(), 5);
    }

    #[test]
    fn test_long_descriptions_are_truncated() {
        plain();
        let long = "x".repeat(200);
        let event = SimulationEvent::new(EventType::Funding, 1, long);
        let line = ConsoleFormatter::event_line(&event);
        assert!(line.len() < 120);
        assert!(line.ends_with('~'));
    }

    #[test]
    fn test_format_json() {
        let events = vec![SimulationEvent::new(
            EventType::Custom("market_crash".to_string()),
            0,
            "Markets tumble",
        )];
        let json = ConsoleFormatter::format_json(&events);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["event_type"], "market_crash");
    }
}
