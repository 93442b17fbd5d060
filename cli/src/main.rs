//! CLI entrypoint for boardroom
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use boardroom_application::{
    AuditLogger, NoAuditLogger, NoProgress, RoundProgressNotifier, SimulationEngine,
};
use boardroom_domain::{SimulationMode, SimulationState};
use boardroom_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, JsonlAuditLogger, SimulatedAiClient,
};
use boardroom_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormat, ProgressReporter, SimpleProgress,
};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // Load configuration first so that [logging] can pick the log file
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut file_config);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| file_config.logging.log_file_path());
    let _log_guard = init_tracing(cli.verbose, log_file.as_deref())?;

    info!("Starting boardroom");

    let issues = file_config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config error: {}", issue);
        }
        bail!("invalid configuration ({} issues)", issues.len());
    }

    let (simulation_config, _) = file_config.simulation.to_simulation_config();
    let mode = if cli.auto {
        SimulationMode::Auto
    } else {
        file_config.simulation.parse_mode().unwrap_or_default()
    };

    let output = OutputConfig {
        format: cli.output.unwrap_or(match file_config.output.format {
            Some(FileOutputFormat::Json) => OutputFormat::Json,
            _ => OutputFormat::Table,
        }),
        color: file_config.output.color,
        show_progress: file_config.output.show_progress && !cli.quiet,
        show_events: cli.events,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let client = Arc::new(SimulatedAiClient::new(file_config.ai.to_settings()));

    let progress: Arc<dyn RoundProgressNotifier> = if !output.progress_enabled() {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let audit_path = cli
        .audit_log
        .clone()
        .or_else(|| file_config.logging.audit_log_path());
    let audit: Arc<dyn AuditLogger> = match audit_path {
        Some(path) => match JsonlAuditLogger::new(&path) {
            Some(logger) => {
                info!("Writing audit trail to {}", logger.path().display());
                Arc::new(logger)
            }
            None => {
                warn!("Audit trail disabled: could not open {}", path.display());
                Arc::new(NoAuditLogger)
            }
        },
        None => Arc::new(NoAuditLogger),
    };

    let engine = SimulationEngine::builder(client)
        .with_config(simulation_config)
        .with_mode(mode)
        .with_options(file_config.voting.to_engine_options())
        .with_interpreter(Arc::new(file_config.voting.to_interpreter()))
        .with_progress(progress)
        .with_audit_logger(audit)
        .build();

    if output.format == OutputFormat::Table {
        println!("{}", ConsoleFormatter::format_status(&engine.status().await));
    }

    engine.start().await?;

    if mode.is_auto() {
        run_auto(&engine, Duration::from_secs(cli.duration), &output).await?;
    } else {
        run_manual(&engine, cli.rounds, &output).await?;
    }

    let summary = engine.end().await?;
    engine.shutdown().await;

    match output.format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&summary)),
        OutputFormat::Table => {
            let decisions = engine.recent_decision_views(10, None).await?;
            println!("{}", ConsoleFormatter::format_decisions(&decisions));
            println!("{}", ConsoleFormatter::format_summary(&summary));
        }
    }

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(interval) = cli.interval {
        config.simulation.round_interval = interval;
    }
    if let Some(companies) = cli.companies {
        config.simulation.initial_companies = companies;
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }
}

fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run_manual(
    engine: &SimulationEngine<SimulatedAiClient>,
    rounds: u32,
    output: &OutputConfig,
) -> Result<()> {
    for _ in 0..rounds {
        let events = engine.execute_round().await?;
        if output.format == OutputFormat::Table {
            let round = events.first().map(|e| e.round).unwrap_or_default();
            println!("{}", ConsoleFormatter::format_round(round, &events));
        }
        if engine.status().await.state != SimulationState::Running {
            break;
        }
    }
    Ok(())
}

async fn run_auto(
    engine: &SimulationEngine<SimulatedAiClient>,
    duration: Duration,
    output: &OutputConfig,
) -> Result<()> {
    let status = engine.status().await;
    info!(
        "Auto mode: one round every {}s for {:?}",
        status.config.round_interval, duration
    );

    let deadline = tokio::time::Instant::now() + duration;
    let mut last_round = status.current_round;

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => break,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, ending simulation");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(250)) => {}
        }

        let status = engine.status().await;
        if status.current_round != last_round {
            last_round = status.current_round;
            if output.format == OutputFormat::Table && output.show_events {
                let events = engine.recent_events(20).await;
                println!("{}", ConsoleFormatter::format_events(&events));
            }
        }
        if status.state == SimulationState::Stopped {
            bail!("simulation stopped after a failed round");
        }
    }

    Ok(())
}
