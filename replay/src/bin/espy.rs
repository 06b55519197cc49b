//! espy - battle statistics for a Pokemon Showdown replay
//!
//! Usage: espy <REPLAY> [--json | -f json|text] [-o FILE] [-v]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use espy_replay::{Replay, extract, fetch_replay, report};
use serde::Serialize;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report, one section per team
    Text,
    /// Pretty JSON with metadata and summary
    Json,
}

/// Battle statistics for a Pokemon Showdown replay
#[derive(Debug, Parser)]
#[command(name = "espy", version)]
struct Args {
    /// Replay URL (http/https) or path to a saved replay or raw log
    #[arg(value_name = "REPLAY")]
    replay: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long)]
    json: bool,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log progress and attribution decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a espy_replay::ReplayMetadata,
    summary: &'a espy_battle::BattleSummary,
}

async fn load(source: &str) -> Result<Replay> {
    let replay = if source.starts_with("http://") || source.starts_with("https://") {
        tracing::info!(url = %source, "fetching replay");
        fetch_replay(source).await?
    } else {
        tracing::info!(path = %source, "reading replay file");
        extract::from_file(source)?
    };
    Ok(replay)
}

fn render(args: &Args, replay: &Replay) -> Result<String> {
    let lines = replay.lines();
    tracing::debug!(lines = lines.len(), "processing battle log");

    let summary = replay.analyze();
    match args.output_format() {
        OutputFormat::Text => Ok(report::render_text(&replay.metadata, &summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonReport {
            metadata: &replay.metadata,
            summary: &summary,
        })?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let replay = match load(&args.replay).await {
        Ok(replay) => replay,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = render(&args, &replay).and_then(|output| match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "results written");
            Ok(())
        }
        None => {
            println!("{}", output);
            Ok(())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
