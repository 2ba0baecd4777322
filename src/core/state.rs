//! Pipeline state machine
//!
//! [`PipelineState`] is the single mutable aggregate of a run: the topic,
//! how far execution has advanced, and one [`StageResult`] per completed
//! stage in execution order. It owns no I/O; the run controller in
//! [`crate::execution`] drives it.

use crate::core::stage::StageId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from state-machine operations. These are usage errors at the
/// call site, never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("step {step} requires output from {required}, which has not run yet")]
    SequenceViolation { step: usize, required: StageId },

    #[error("step {step} is out of range; the pipeline has {total} stages")]
    StepOutOfRange { step: usize, total: usize },

    #[error("{stage} has no recorded result to edit")]
    MissingResult { stage: StageId },

    #[error("{stage} output was already handed to the next stage and is locked against edits")]
    StageLocked { stage: StageId },
}

/// Output of one stage execution. Created once when the stage finishes;
/// mutated afterward only to set or clear the edited override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: StageId,
    pub label: String,
    pub input_text: String,
    pub output_text: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// Wall-clock seconds, rounded to 2 decimals.
    pub elapsed_seconds: f64,
    #[serde(default)]
    pub edited: bool,
    /// Meaningful only when `edited` is true.
    #[serde(default)]
    pub edited_text: String,
}

impl StageResult {
    /// The text downstream consumers should see: the edited override when
    /// set and non-empty, otherwise the raw model output.
    pub fn effective_output(&self) -> &str {
        if self.edited && !self.edited_text.is_empty() {
            &self.edited_text
        } else {
            &self.output_text
        }
    }
}

/// Cumulative progress of a single run.
///
/// `current_step` ranges over 0..=4, where 4 means complete. It never
/// decreases; a reset is a replacement, not a rollback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineState {
    pub topic: String,
    pub current_step: usize,
    /// One entry per completed stage, in execution order.
    pub results: Vec<StageResult>,
}

impl PipelineState {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            current_step: 0,
            results: Vec::with_capacity(StageId::ALL.len()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_step >= StageId::ALL.len()
    }

    /// Result of a stage, if that stage has completed.
    pub fn result(&self, stage: StageId) -> Option<&StageResult> {
        self.results.iter().find(|r| r.stage == stage)
    }

    /// Resolve the input text for `step`.
    ///
    /// Step 0 is the topic verbatim; later steps take the previous stage's
    /// effective output. Pure: no side effects, no mutation.
    pub fn resolve_input(&self, step: usize) -> Result<&str, PipelineError> {
        let total = StageId::ALL.len();
        if step >= total {
            return Err(PipelineError::StepOutOfRange { step, total });
        }
        if step == 0 {
            return Ok(&self.topic);
        }
        let required = StageId::ALL[step - 1];
        let prev = self
            .result(required)
            .ok_or(PipelineError::SequenceViolation { step, required })?;
        Ok(prev.effective_output())
    }

    /// Record a finished stage and advance by exactly one step.
    ///
    /// Must only be called right after a successful execution of the
    /// current step; the caller is responsible for not skipping or
    /// repeating steps.
    pub fn record_result(&mut self, result: StageResult) {
        debug_assert!(!self.is_complete(), "recording into a complete pipeline");
        debug_assert_eq!(
            result.stage,
            StageId::ALL[self.current_step],
            "result recorded out of stage order"
        );
        self.results.push(result);
        self.current_step += 1;
    }

    /// Apply (or clear) an edited override on a completed stage.
    ///
    /// Text equal to the original output clears the override, so the call
    /// is idempotent. Only the most recently completed stage of an
    /// incomplete pipeline is editable: once a stage's output has been
    /// consumed by its successor (or the run has finished), editing it
    /// could silently diverge from what was actually fed downstream, so
    /// it is rejected with [`PipelineError::StageLocked`].
    pub fn apply_edit(&mut self, stage: StageId, text: &str) -> Result<(), PipelineError> {
        if self.result(stage).is_none() {
            return Err(PipelineError::MissingResult { stage });
        }
        if self.is_complete() || stage.index() + 1 != self.current_step {
            return Err(PipelineError::StageLocked { stage });
        }
        // Guaranteed present by the checks above.
        let result = self
            .results
            .iter_mut()
            .find(|r| r.stage == stage)
            .expect("result presence checked");
        if text == result.output_text {
            result.edited = false;
            result.edited_text.clear();
        } else {
            result.edited = true;
            result.edited_text = text.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(stage: StageId, output: &str) -> StageResult {
        StageResult {
            stage,
            label: stage.label().to_string(),
            input_text: "in".to_string(),
            output_text: output.to_string(),
            model: "test-model".to_string(),
            input_tokens: 10,
            output_tokens: 20,
            elapsed_seconds: 0.5,
            edited: false,
            edited_text: String::new(),
        }
    }

    #[test]
    fn test_step_zero_resolves_to_topic_verbatim() {
        let state = PipelineState::new("T");
        assert_eq!(state.resolve_input(0).unwrap(), "T");
    }

    #[test]
    fn test_resolve_before_predecessor_is_sequence_violation() {
        let state = PipelineState::new("T");
        for step in 1..StageId::ALL.len() {
            let err = state.resolve_input(step).unwrap_err();
            assert_eq!(
                err,
                PipelineError::SequenceViolation {
                    step,
                    required: StageId::ALL[step - 1],
                }
            );
        }
    }

    #[test]
    fn test_resolve_out_of_range_step() {
        let state = PipelineState::new("T");
        assert!(matches!(
            state.resolve_input(4),
            Err(PipelineError::StepOutOfRange { step: 4, total: 4 })
        ));
    }

    #[test]
    fn test_unedited_resolution_returns_raw_output() {
        let mut state = PipelineState::new("T");
        state.record_result(make_result(StageId::Sentinel, "O1"));
        assert_eq!(state.resolve_input(1).unwrap(), "O1");
        assert_eq!(state.current_step, 1);
    }

    #[test]
    fn test_edit_feeds_next_stage_and_equal_edit_clears() {
        let mut state = PipelineState::new("T");
        state.record_result(make_result(StageId::Sentinel, "O1"));

        state.apply_edit(StageId::Sentinel, "E1").unwrap();
        assert_eq!(state.resolve_input(1).unwrap(), "E1");

        // Editing back to the original clears the override entirely
        state.apply_edit(StageId::Sentinel, "O1").unwrap();
        let result = state.result(StageId::Sentinel).unwrap();
        assert!(!result.edited);
        assert!(result.edited_text.is_empty());
        assert_eq!(state.resolve_input(1).unwrap(), "O1");
    }

    #[test]
    fn test_edit_is_idempotent() {
        let mut state = PipelineState::new("T");
        state.record_result(make_result(StageId::Sentinel, "O1"));
        state.apply_edit(StageId::Sentinel, "E1").unwrap();
        state.apply_edit(StageId::Sentinel, "E1").unwrap();
        assert_eq!(state.resolve_input(1).unwrap(), "E1");
    }

    #[test]
    fn test_edit_without_result_is_rejected() {
        let mut state = PipelineState::new("T");
        assert_eq!(
            state.apply_edit(StageId::Adversary, "E"),
            Err(PipelineError::MissingResult {
                stage: StageId::Adversary
            })
        );
    }

    #[test]
    fn test_consumed_stage_is_locked_against_edits() {
        let mut state = PipelineState::new("T");
        state.record_result(make_result(StageId::Sentinel, "O1"));
        state.record_result(make_result(StageId::Adversary, "O2"));

        // Sentinel's output already fed the adversary stage
        assert_eq!(
            state.apply_edit(StageId::Sentinel, "E1"),
            Err(PipelineError::StageLocked {
                stage: StageId::Sentinel
            })
        );
        // The latest stage is still editable
        state.apply_edit(StageId::Adversary, "E2").unwrap();
        assert_eq!(state.resolve_input(2).unwrap(), "E2");
    }

    #[test]
    fn test_complete_pipeline_rejects_all_edits() {
        let mut state = PipelineState::new("T");
        for (i, stage) in StageId::ALL.into_iter().enumerate() {
            state.record_result(make_result(stage, &format!("O{}", i + 1)));
        }
        assert!(state.is_complete());
        assert_eq!(
            state.apply_edit(StageId::GrowthHacker, "E4"),
            Err(PipelineError::StageLocked {
                stage: StageId::GrowthHacker
            })
        );
    }

    #[test]
    fn test_full_run_results_in_stage_order() {
        let mut state = PipelineState::new("T");
        for (i, stage) in StageId::ALL.into_iter().enumerate() {
            assert!(!state.is_complete());
            state.record_result(make_result(stage, &format!("O{}", i + 1)));
        }
        assert_eq!(state.current_step, 4);
        assert!(state.is_complete());
        let order: Vec<StageId> = state.results.iter().map(|r| r.stage).collect();
        assert_eq!(order, StageId::ALL.to_vec());
        assert_eq!(state.result(StageId::GrowthHacker).unwrap().output_text, "O4");
    }

    #[test]
    fn test_effective_output_ignores_stale_edited_text() {
        let mut result = make_result(StageId::Sentinel, "raw");
        result.edited_text = "stale".to_string();
        // edited flag is false, so the override must be ignored
        assert_eq!(result.effective_output(), "raw");
        result.edited = true;
        assert_eq!(result.effective_output(), "stale");
    }
}
