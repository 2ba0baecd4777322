//! Persistence for completed runs
//!
//! A completed pipeline is written as two documents in a fresh
//! timestamp-plus-topic directory: `result.json` (machine-readable) and
//! `result.md` (human-readable report). Returns the directory written.

use crate::core::{PipelineState, StageResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

const MAX_DIRNAME_LEN: usize = 20;

/// Compiled once, shared across saves.
fn hazard_pattern() -> &'static Regex {
    static HAZARDS: OnceLock<Regex> = OnceLock::new();
    HAZARDS.get_or_init(|| Regex::new(r#"[\\/:*?"<>|\s]+"#).expect("static pattern"))
}

/// Create a filesystem-safe directory fragment from topic text.
///
/// Path hazards and whitespace collapse to single underscores; the
/// fragment is trimmed and length-capped.
pub fn sanitize_dirname(text: &str) -> String {
    let cleaned = hazard_pattern().replace_all(text, "_");
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        return "untitled".to_string();
    }
    cleaned.chars().take(MAX_DIRNAME_LEN).collect()
}

/// Save pipeline results as JSON and Markdown. Returns the output directory.
pub fn save_results(state: &PipelineState, output_root: &Path) -> Result<PathBuf> {
    let now = Local::now();
    let dir_name = format!(
        "{}_{}",
        now.format("%Y%m%d_%H%M%S"),
        sanitize_dirname(&state.topic)
    );
    let output_dir = output_root.join(dir_name);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let json_path = output_dir.join("result.json");
    fs::write(&json_path, render_json(state, &now)?)
        .with_context(|| format!("write {}", json_path.display()))?;

    let md_path = output_dir.join("result.md");
    fs::write(&md_path, render_markdown(state, &now))
        .with_context(|| format!("write {}", md_path.display()))?;

    info!(dir = %output_dir.display(), "run results saved");
    Ok(output_dir)
}

struct RunTotals {
    input_tokens: u64,
    output_tokens: u64,
    elapsed_seconds: f64,
}

fn totals(results: &[StageResult]) -> RunTotals {
    let mut totals = RunTotals {
        input_tokens: 0,
        output_tokens: 0,
        elapsed_seconds: 0.0,
    };
    for result in results {
        totals.input_tokens += u64::from(result.input_tokens);
        totals.output_tokens += u64::from(result.output_tokens);
        totals.elapsed_seconds += result.elapsed_seconds;
    }
    totals.elapsed_seconds = (totals.elapsed_seconds * 100.0).round() / 100.0;
    totals
}

fn render_json(state: &PipelineState, now: &DateTime<Local>) -> Result<String> {
    let totals = totals(&state.results);
    let payload = serde_json::json!({
        "topic": state.topic,
        "timestamp": now.to_rfc3339(),
        "stages": state.results,
        "stats": {
            "total_input_tokens": totals.input_tokens,
            "total_output_tokens": totals.output_tokens,
            "total_elapsed_seconds": totals.elapsed_seconds,
        },
    });
    serde_json::to_string_pretty(&payload).context("serialize result.json")
}

fn render_markdown(state: &PipelineState, now: &DateTime<Local>) -> String {
    let totals = totals(&state.results);
    let mut lines: Vec<String> = vec![
        "# Newsroom — Run Report".to_string(),
        String::new(),
        format!("**Topic**: {}", state.topic),
        format!("**Time**: {}", now.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    for result in &state.results {
        lines.push(format!("## {} {}", result.stage.icon(), result.label));
        lines.push(String::new());
        if result.edited {
            lines.push("> ✏️ This stage's output was edited by hand".to_string());
            lines.push(String::new());
        }
        lines.push(result.effective_output().to_string());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.push("## Run stats".to_string());
    lines.push(String::new());
    lines.push("| Stage | Input tokens | Output tokens | Elapsed (s) | Edited |".to_string());
    lines.push("|-------|--------------|---------------|-------------|--------|".to_string());
    for result in &state.results {
        let edited_mark = if result.edited { "✏️" } else { "" };
        lines.push(format!(
            "| {} {} | {} | {} | {} | {} |",
            result.stage.icon(),
            result.label,
            result.input_tokens,
            result.output_tokens,
            result.elapsed_seconds,
            edited_mark
        ));
    }
    lines.push(format!(
        "| **Total** | **{}** | **{}** | **{}** | |",
        totals.input_tokens, totals.output_tokens, totals.elapsed_seconds
    ));
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StageId;

    fn make_result(stage: StageId, output: &str) -> StageResult {
        StageResult {
            stage,
            label: stage.label().to_string(),
            input_text: "in".to_string(),
            output_text: output.to_string(),
            model: "test-model".to_string(),
            input_tokens: 100,
            output_tokens: 200,
            elapsed_seconds: 1.25,
            edited: false,
            edited_text: String::new(),
        }
    }

    fn completed_state() -> PipelineState {
        let mut state = PipelineState::new("Will AI cause mass unemployment?");
        for (i, stage) in StageId::ALL.into_iter().enumerate() {
            state.record_result(make_result(stage, &format!("O{}", i + 1)));
        }
        state
    }

    #[test]
    fn test_sanitize_collapses_hazards() {
        assert_eq!(sanitize_dirname("a/b\\c: d?"), "a_b_c_d");
        assert_eq!(sanitize_dirname("  spaced   out  "), "spaced_out");
        assert_eq!(sanitize_dirname("///"), "untitled");
        assert_eq!(sanitize_dirname(""), "untitled");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(50);
        assert_eq!(sanitize_dirname(&long).chars().count(), MAX_DIRNAME_LEN);
        // Multi-byte text truncates on char boundaries
        let cjk = "奇点编辑部".repeat(10);
        assert_eq!(sanitize_dirname(&cjk).chars().count(), MAX_DIRNAME_LEN);
    }

    #[test]
    fn test_json_payload_shape_and_totals() {
        let state = completed_state();
        let raw = render_json(&state, &Local::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["topic"], "Will AI cause mass unemployment?");
        let stages = value["stages"].as_array().unwrap();
        assert_eq!(stages.len(), 4);
        assert_eq!(stages[0]["stage"], "sentinel");
        assert_eq!(stages[3]["stage"], "growth_hacker");
        assert_eq!(value["stats"]["total_input_tokens"], 400);
        assert_eq!(value["stats"]["total_output_tokens"], 800);
        assert_eq!(value["stats"]["total_elapsed_seconds"], 5.0);
    }

    #[test]
    fn test_markdown_renders_effective_output_and_edit_marker() {
        let mut state = PipelineState::new("T");
        state.record_result(make_result(StageId::Sentinel, "raw sentinel output"));
        state
            .apply_edit(StageId::Sentinel, "edited sentinel output")
            .unwrap();

        let md = render_markdown(&state, &Local::now());
        assert!(md.contains("## 🛰️ Intel Editor"));
        assert!(md.contains("edited by hand"));
        assert!(md.contains("edited sentinel output"));
        assert!(!md.contains("raw sentinel output"));
    }

    #[test]
    fn test_markdown_totals_row() {
        let md = render_markdown(&completed_state(), &Local::now());
        assert!(md.contains("| **Total** | **400** | **800** | **5** | |"));
    }
}
