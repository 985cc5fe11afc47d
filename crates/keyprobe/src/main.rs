//! # keyprobe
//!
//! Keyboard input verification for Android UI automation drivers.
//!
//! ## Overview
//!
//! Runs the keyboard suite:
//! - Text round trips through direct value assignment and simulated keystrokes
//! - Unicode text through the unicode keyboard
//! - Key event probes (plain and with meta state)
//!
//! ## Architecture
//!
//! This is Layer 3 - the binary that ties together:
//! - keyprobe-core: Core types and configuration
//! - keyprobe-driver: Driver contract and simulated device
//! - keyprobe-verify: Verification helpers and the suite

use clap::Parser;
use keyprobe::{config_schema, load_config, run_suite, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();
    if args.schema {
        println!("{}", config_schema()?);
        return Ok(());
    }

    let config = load_config(&args)?;

    // Initialize logging; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::info!(
        "keyprobe v{} starting: groups={:?}",
        env!("CARGO_PKG_VERSION"),
        config.suite.groups
    );

    let report = run_suite(config).await;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_summary());
    }

    tracing::info!(
        "keyprobe finished: {} passed, {} failed",
        report.passed(),
        report.failed()
    );

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
