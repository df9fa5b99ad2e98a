// Adapters layer: concrete implementations of the domain ports.

pub mod reporter;

pub use reporter::{MemoryReporter, StdoutReporter};
