//! Core domain models
//!
//! This module defines the stage definitions, the pipeline state machine,
//! the static knowledge map, and the runtime settings.

pub mod config;
pub mod knowledge;
pub mod stage;
pub mod state;

pub use config::*;
pub use stage::*;
pub use state::*;
