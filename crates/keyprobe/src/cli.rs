//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Keyboard input verification for Android UI automation drivers
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "keyprobe", version)]
#[command(about = "Keyboard input verification for Android UI automation drivers", long_about = None)]
pub struct CliArgs {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run only this group (ascii, unicode); repeatable
    #[arg(short, long = "group", value_name = "NAME")]
    pub groups: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    pub schema: bool,
}
