//! CLI output formatting

use crate::core::{PipelineState, StageId, StageResult};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static PENCIL: Emoji<'_, '_> = Emoji("✏️  ", "e ");
pub static FLOPPY: Emoji<'_, '_> = Emoji("💾 ", "s ");

/// Spinner shown while a stage's backend call is in flight
pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// One-line banner for a stage about to run
pub fn format_stage_banner(stage: StageId, step: usize) -> String {
    format!(
        "{} {} {} ({}/{})",
        stage.icon(),
        style(stage.label()).bold(),
        style("working...").dim(),
        step + 1,
        StageId::ALL.len()
    )
}

/// Token/latency stats line for a completed stage
pub fn format_stage_stats(result: &StageResult) -> String {
    style(format!(
        "{} tokens in, {} tokens out, {}s",
        result.input_tokens, result.output_tokens, result.elapsed_seconds
    ))
    .dim()
    .to_string()
}

/// Format stage output with truncation
pub fn format_output(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    if lines.len() <= max_lines {
        output.to_string()
    } else {
        let truncated = lines[..max_lines].join("\n");
        format!(
            "{}\n{} ({} more lines)",
            truncated,
            style("[truncated]").dim(),
            lines.len() - max_lines
        )
    }
}

/// Final per-stage stats table for a finished (or halted) run
pub fn format_run_stats(state: &PipelineState) -> String {
    let mut lines = vec![format!(
        "{:<28} {:>10} {:>10} {:>10}",
        style("Stage").bold(),
        style("In").bold(),
        style("Out").bold(),
        style("Elapsed").bold()
    )];

    let mut total_in: u64 = 0;
    let mut total_out: u64 = 0;
    let mut total_elapsed: f64 = 0.0;

    for result in &state.results {
        total_in += u64::from(result.input_tokens);
        total_out += u64::from(result.output_tokens);
        total_elapsed += result.elapsed_seconds;
        let edited = if result.edited {
            format!(" {}", PENCIL)
        } else {
            String::new()
        };
        lines.push(format!(
            "{} {:<25} {:>10} {:>10} {:>9.2}s{}",
            result.stage.icon(),
            result.label,
            result.input_tokens,
            result.output_tokens,
            result.elapsed_seconds,
            edited
        ));
    }

    lines.push(format!(
        "{:<28} {:>10} {:>10} {:>9.2}s",
        style("Total").bold(),
        total_in,
        total_out,
        total_elapsed
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_output_truncates_long_output() {
        let output = (1..=10)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let formatted = format_output(&output, 3);
        assert!(formatted.contains("line 3"));
        assert!(!formatted.contains("line 4\n"));
        assert!(formatted.contains("(7 more lines)"));
    }

    #[test]
    fn test_format_output_passes_short_output_through() {
        assert_eq!(format_output("one\ntwo", 5), "one\ntwo");
    }
}
