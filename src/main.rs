use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedpane::app::AppContext;
use feedpane::cli::Cli;
use feedpane::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let ctx = AppContext::new(config)?;
    let summary = feedpane::tui::run(&ctx).await?;

    eprintln!("{}", summary);
    Ok(())
}

/// Logs only go to the `--log` file. The terminal UI owns stdout and
/// stderr, so without one no subscriber is installed.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}
