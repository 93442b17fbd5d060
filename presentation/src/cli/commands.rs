//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for round reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console tables
    #[default]
    Table,
    /// JSON output
    Json,
}

/// CLI arguments for boardroom
#[derive(Parser, Debug)]
#[command(name = "boardroom")]
#[command(author, version, about = "Simulated companies whose employees vote on AI-assisted decisions")]
#[command(long_about = r#"
Boardroom simulates a population of competing companies. Every round each
company may face a decision; its eligible employees ask an AI for a proposal,
vote, and the outcome changes the company's funds and headcount.

Rounds run manually (a fixed number, back to back) or automatically on a
timer for a given duration.

Configuration files are loaded from (in priority order):
1. BOARDROOM_* environment variables (e.g. BOARDROOM_SIMULATION__MODE=auto)
2. --config <path>      Explicit config file
3. ./boardroom.toml     Project-level config
4. ~/.config/boardroom/config.toml   Global config

Example:
  boardroom --rounds 10
  boardroom --auto --interval 10 --duration 60
  boardroom --rounds 3 --output json --audit-log audit.jsonl
"#)]
pub struct Cli {
    /// Number of manual rounds to run
    #[arg(short, long, default_value_t = 5, conflicts_with = "auto")]
    pub rounds: u32,

    /// Run rounds on the timer instead of manually
    #[arg(short, long)]
    pub auto: bool,

    /// How long an auto session runs, in seconds
    #[arg(short, long, value_name = "SECS", default_value_t = 60)]
    pub duration: u64,

    /// Seconds between auto rounds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<i64>,

    /// Companies founded at start (overrides the config file)
    #[arg(long, value_name = "N")]
    pub companies: Option<u32>,

    /// Seed for the simulated AI client
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print the most recent events after every round
    #[arg(long)]
    pub events: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file as well as stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL audit trail to this file
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,
}
