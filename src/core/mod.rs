pub mod runner;

pub use crate::domain::model::{Car, Position};
pub use crate::domain::ports::Reporter;
pub use crate::utils::error::Result;
pub use runner::{OutputFormat, RunSummary, ScenarioRunner};
