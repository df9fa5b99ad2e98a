pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{MemoryReporter, StdoutReporter};
pub use config::ScenarioConfig;
pub use core::{OutputFormat, RunSummary, ScenarioRunner};
pub use domain::model::{Car, Position};
pub use utils::error::{CarError, Result};
