//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{RunCommand, SchoolsCommand};

/// AI-driven hard sci-fi video script generator
#[derive(Debug, Parser, Clone)]
#[command(name = "newsroom")]
#[command(version = "0.1.0")]
#[command(about = "Four-stage LLM pipeline that turns a topic into a hard sci-fi video script", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the pipeline on a topic
    Run(RunCommand),

    /// List the four stage definitions
    Stages,

    /// Print the sci-fi philosophy map
    Schools(SchoolsCommand),
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }
}
