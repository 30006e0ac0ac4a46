use std::io::Write;

use anyhow::Context;
use clap::Parser;
use scoop_config::ScoopConfig;

mod cli;
mod generate;

fn main() {
    if let Err(error) = run() {
        eprintln!("storyscoop error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = ScoopConfig::load().context("failed to load storyscoop configuration")?;
    let settings = cli.settings(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = generate::generate(&cli.file, &settings, &mut out)?;
    if let Some(summary) = generate::summary(&outcome, settings.mode) {
        writeln!(out, "{summary}")?;
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("STORYSCOOP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
