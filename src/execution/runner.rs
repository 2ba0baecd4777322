//! Run controller - drives the state machine against the backend
//!
//! The controller owns the backend client and nothing else: pipeline
//! state is passed in explicitly and returned to the caller, never held
//! in shared session context.

use crate::core::{PipelineError, PipelineState, Settings, StageId, StageResult};
use crate::llm::{ChatRequest, LlmClient, LlmError};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors surfaced by the run controller.
#[derive(Debug, Error)]
pub enum RunError {
    /// A step was requested out of order. Usage error, never retried.
    #[error(transparent)]
    Sequence(#[from] PipelineError),

    /// The backend call for a stage failed. The pipeline stays at the
    /// last good step; the same step may be re-invoked.
    #[error("{label} failed: {source}")]
    Stage {
        label: &'static str,
        #[source]
        source: LlmError,
    },
}

/// How a completed run's results were written.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// Only the write failed; the completed state remains valid and the
    /// save may be retried.
    Failed(anyhow::Error),
}

/// Drives a [`PipelineState`] one stage at a time, or to completion.
pub struct Runner {
    client: Box<dyn LlmClient>,
    max_tokens: u32,
    temperature: f32,
    /// Single current-error slot: most recent failure only, cleared on
    /// reset or the next successful stage.
    last_error: Option<String>,
}

impl Runner {
    pub fn new(client: Box<dyn LlmClient>, settings: &Settings) -> Self {
        Self {
            client,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            last_error: None,
        }
    }

    /// Most recent failure, if the last action failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Discard any previous run and start fresh with the given topic.
    pub fn reset(&mut self, topic: impl Into<String>) -> PipelineState {
        self.last_error = None;
        PipelineState::new(topic)
    }

    /// Execute a single step and record its result.
    ///
    /// On any failure the state is left untouched: the step index does
    /// not advance and no partial result is recorded.
    pub async fn execute_step<'a>(
        &mut self,
        state: &'a mut PipelineState,
        step: usize,
    ) -> Result<&'a StageResult, RunError> {
        let stage = match StageId::ALL.get(step) {
            Some(stage) => *stage,
            None => {
                return Err(self.fail(RunError::Sequence(PipelineError::StepOutOfRange {
                    step,
                    total: StageId::ALL.len(),
                })))
            }
        };

        let input = match state.resolve_input(step) {
            Ok(input) => input.to_string(),
            Err(e) => return Err(self.fail(RunError::Sequence(e))),
        };

        info!(stage = %stage, step, "executing stage");
        let request = ChatRequest {
            system_prompt: stage.system_prompt(),
            user_message: stage.build_user_message(&input),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let start = Instant::now();
        let response = match self.client.chat(request).await {
            Ok(response) => response,
            Err(source) => {
                error!(stage = %stage, %source, "stage execution failed");
                return Err(self.fail(RunError::Stage {
                    label: stage.label(),
                    source,
                }));
            }
        };
        let elapsed_seconds = round2(start.elapsed().as_secs_f64());

        info!(
            stage = %stage,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            elapsed_seconds,
            "stage completed"
        );

        state.record_result(StageResult {
            stage,
            label: stage.label().to_string(),
            input_text: input,
            output_text: response.content,
            model: response.model,
            input_tokens: response.input_tokens,
            output_tokens: response.output_tokens,
            elapsed_seconds,
            edited: false,
            edited_text: String::new(),
        });
        self.last_error = None;

        Ok(state
            .results
            .last()
            .expect("result recorded by this call"))
    }

    /// Execute all remaining steps in strict order.
    ///
    /// Stops at the first failure, leaving the pipeline at the last
    /// successfully completed step; completed stages are never re-run or
    /// rolled back. `on_stage` is invoked once per completed stage for
    /// display. Already-complete pipelines are a no-op.
    pub async fn run_to_completion<F>(
        &mut self,
        state: &mut PipelineState,
        mut on_stage: F,
    ) -> Result<(), RunError>
    where
        F: FnMut(&StageResult),
    {
        while !state.is_complete() {
            let step = state.current_step;
            let result = self.execute_step(state, step).await?;
            on_stage(result);
        }
        Ok(())
    }

    /// Execute all remaining steps, then persist the completed run
    /// through `save` exactly once.
    ///
    /// A step failure aborts before any save is attempted. A save
    /// failure never unwinds the run: the completed state stays intact
    /// and [`SaveOutcome::Failed`] carries the error for reporting.
    pub async fn run_to_completion_saving<F, S>(
        &mut self,
        state: &mut PipelineState,
        on_stage: F,
        save: S,
    ) -> Result<SaveOutcome, RunError>
    where
        F: FnMut(&StageResult),
        S: FnOnce(&PipelineState) -> anyhow::Result<PathBuf>,
    {
        self.run_to_completion(state, on_stage).await?;
        Ok(self.save_completed(state, save))
    }

    /// Persist a completed run. Failures land in the error slot and do
    /// not invalidate the state; the caller may retry with another
    /// target.
    pub fn save_completed<S>(&mut self, state: &PipelineState, save: S) -> SaveOutcome
    where
        S: FnOnce(&PipelineState) -> anyhow::Result<PathBuf>,
    {
        debug_assert!(state.is_complete(), "saving an incomplete run");
        match save(state) {
            Ok(path) => {
                self.last_error = None;
                SaveOutcome::Saved(path)
            }
            Err(error) => {
                warn!(error = %error, "saving run results failed");
                self.last_error = Some(format!("save failed: {error:#}"));
                SaveOutcome::Failed(error)
            }
        }
    }

    fn fail(&mut self, error: RunError) -> RunError {
        self.last_error = Some(error.to_string());
        error
    }
}

/// Round to 2 decimal places, as recorded in stage results.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
