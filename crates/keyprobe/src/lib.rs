//! keyprobe command line library.
//!
//! Argument parsing, configuration loading and the suite entry point used by
//! the binary in main.rs.

pub mod cli;

use keyprobe_core::{Result, SuiteConfig};
use keyprobe_driver::SimulatedDevice;
use keyprobe_verify::{KeyboardSuite, SuiteReport};

pub use cli::CliArgs;

/// Load configuration from `--config` (or defaults) and apply `--group`.
pub fn load_config(args: &CliArgs) -> Result<SuiteConfig> {
    let mut config = match &args.config {
        Some(path) => SuiteConfig::from_file(path)?,
        None => SuiteConfig::default(),
    };

    if !args.groups.is_empty() {
        config.suite.groups = args.groups.clone();
        config.validate()?;
    }

    Ok(config)
}

/// Run the keyboard suite against simulated devices built from the config.
pub async fn run_suite(config: SuiteConfig) -> SuiteReport {
    let settings = config.simulator.clone();
    let suite = KeyboardSuite::new(config);
    suite
        .run(|| SimulatedDevice::with_settings(settings.clone()))
        .await
}

/// JSON schema of the configuration file.
pub fn config_schema() -> Result<String> {
    let schema = schemars::schema_for!(SuiteConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
