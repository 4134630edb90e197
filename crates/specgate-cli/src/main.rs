//! Specgate CLI - Command-line interface for the specification quality gate.

use clap::Parser;
use specgate_cli::commands;
use specgate_cli::{Cli, CliError, Command, Config, Formatter};
use specgate_gatekeeper::{EngineConfig, QualityGate};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit status when the command succeeded but its verdict blocks
const EXIT_BLOCKED: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(false) => {}
        Ok(true) => std::process::exit(EXIT_BLOCKED),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so command output stays parseable.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("SPECGATE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> specgate_cli::Result<bool> {
    let mut config = Config::load(cli.config.as_deref())?;

    // A preset replaces the engine section wholesale
    if let Some(preset) = cli.preset {
        config.engine = EngineConfig::preset(preset.name())
            .ok_or_else(|| CliError::Config(format!("Unknown preset '{}'", preset.name())))?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let gate = QualityGate::new(config.engine.clone())?;
    match cli.command {
        Command::Coverage(args) => commands::execute_coverage(args, &gate, &formatter),
        Command::Bias(args) => commands::execute_bias(args, &gate, &formatter),
        Command::Conflicts(args) => commands::execute_conflicts(args, &gate, &formatter),
        Command::Paths(args) => commands::execute_paths(args, &gate, &formatter),
        Command::Verify(args) => commands::execute_verify(args, &gate, &formatter),
        Command::Batch(args) => commands::execute_batch(args, Arc::new(gate), &formatter).await,
        Command::Config(args) => commands::execute_config(args, &config, &formatter),
    }
}
