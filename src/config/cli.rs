use crate::core::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-car")]
#[command(about = "Drive, sell and describe cars from a scripted scenario")]
pub struct CliConfig {
    /// Path to a TOML scenario file; the built-in showroom runs when omitted
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    pub log_json: bool,

    /// Validate the scenario and list its steps without running them
    #[arg(long)]
    pub dry_run: bool,
}
