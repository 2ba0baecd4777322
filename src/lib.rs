//! newsroom - four-stage LLM pipeline for hard sci-fi video scripts

pub mod cli;
pub mod core;
pub mod execution;
pub mod llm;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, PipelineError, PipelineState, Settings, StageId, StageResult,
};
pub use execution::{RunError, Runner, SaveOutcome};
pub use llm::{create_client, ChatRequest, ChatResponse, LlmClient, LlmError, Provider};
pub use persistence::save_results;
