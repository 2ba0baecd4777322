//! Pipeline execution

pub mod runner;

pub use runner::{RunError, Runner, SaveOutcome};
