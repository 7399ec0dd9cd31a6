//! Batch race report: reads a config and an event log, writes the race log
//! and the ranked result table.

use std::path::PathBuf;
use std::time::Instant;

use biathlon_core::handlers::SignalTrace;
use biathlon_core::race_log::{read_event_file, read_events};
use biathlon_core::{
    Artifact, RaceError, RaceSession, ResultTable, RunSummary, commit_artifacts, load_config,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Biathlon race log and result report")]
struct Cli {
    /// Race configuration (JSON)
    #[arg(short, long, default_value = "data/sunny_5_skiers/config.json")]
    config: PathBuf,

    /// Event log, read from stdin when omitted
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Where to write the chronological race log
    #[arg(short, long, default_value = "output.log")]
    log: PathBuf,

    /// Where to write the ranked result table
    #[arg(short, long, default_value = "result")]
    result: PathBuf,

    /// Print a JSON run summary to stdout
    #[arg(long)]
    summary: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If BIATHLON_LOG_PATH is set, append diagnostics to that file
    if let Ok(path) = std::env::var("BIATHLON_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<RunSummary, RaceError> {
    let timer = Instant::now();

    let config = load_config(&cli.config)?;

    let events = match &cli.events {
        Some(path) => read_event_file(path)?,
        None => read_events(std::io::stdin().lock())?,
    };
    tracing::info!(events = events.len(), "Read event log");

    let mut session = RaceSession::new(config.clone());
    session.add_signal_handler(Box::new(SignalTrace));
    session.process_events(&events);
    let race = session.finish();

    let table = ResultTable::build(race.cache, &config);

    commit_artifacts(&[
        Artifact::new(&cli.log, race.log_text),
        Artifact::new(&cli.result, table.render()),
    ])?;

    let summary = RunSummary::new(&table, race.event_count, race.log_lines, timer.elapsed());
    tracing::info!(
        competitors = summary.competitor_count,
        finished = summary.finished,
        elapsed_ms = summary.elapsed_ms,
        "Race report complete"
    );
    Ok(summary)
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let summary = match run(&cli) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "Race report failed");
            std::process::exit(1);
        }
    };

    if cli.summary {
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize summary");
                std::process::exit(1);
            }
        }
    }
}
