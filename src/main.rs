use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod cli;
mod client;
mod config;
mod session;

#[cfg(test)]
mod test_utils;

use cli::Cli;

/// Main entry point for the Vikalp scenario simulator.
fn main() -> Result<()> {
    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,vikalp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Vikalp starting up");

    let cli = Cli::parse();
    cli.run()
}
