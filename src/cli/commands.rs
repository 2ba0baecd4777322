//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Run the pipeline on a topic
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// The topic to develop into a script
    pub topic: String,

    /// Step mode: pause after every stage for review and optional edits
    #[arg(long)]
    pub step: bool,

    /// Don't write result files on completion
    #[arg(long)]
    pub no_save: bool,

    /// Output directory root (overrides NEWSROOM_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Max output tokens per stage (overrides NEWSROOM_MAX_TOKENS)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (overrides NEWSROOM_TEMPERATURE)
    #[arg(long)]
    pub temperature: Option<f32>,
}

/// Print the sci-fi philosophy map
#[derive(Debug, Args, Clone)]
pub struct SchoolsCommand {
    /// Include the one-line notes for every listed work
    #[arg(long)]
    pub full: bool,
}
