//! groupvibe — build a session playlist from a session file.
//!
//! Reads listener preferences and a candidate pool (YAML or JSON), aggregates
//! the vibe, and prints the ranked playlist with its score breakdown.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use groupvibe::{EngineConfig, PlaylistSettings, SessionInput};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct CliArgs {
    /// Session file with preferences, candidates and optional settings.
    session: PathBuf,

    /// Engine config file. Defaults to ~/.groupvibe/engine.yaml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of tracks, overriding the session file.
    #[arg(long)]
    max_length: Option<i64>,

    /// Maximum tracks per artist, overriding the session file.
    #[arg(long)]
    max_per_artist: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("Error loading config {}", path.display()))?,
        None => EngineConfig::load().unwrap_or_default(),
    };

    let mut session = SessionInput::load(&args.session).context("Error loading session")?;
    let overrides = PlaylistSettings {
        max_length: args.max_length,
        max_per_artist: args.max_per_artist,
    };
    session.settings = Some(session.settings.unwrap_or_default().overridden_by(overrides));

    let report = session.plan(&config.aggregator(), &config.engine());
    let out = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Yaml => serde_yaml::to_string(&report)?,
    };
    println!("{out}");
    Ok(())
}
