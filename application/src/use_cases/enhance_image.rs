//! Enhance use case
//!
//! Runs the analyze→route→fix loop: route, run the selected experts in
//! priority order against the current image, re-detect, and decide whether
//! to stop. Every run ends in a well-formed [`RunResult`].

use crate::config::{EditPollParams, EnhancementParams};
use crate::ports::analysis::{SceneClassifier, SignalDetector};
use crate::ports::image_editor::{EditRequest, ImageEditor};
use crate::ports::progress::{EnhancementProgress, NoProgress};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunEventLogger};
use crate::use_cases::analyze_image::{AnalyzeImageUseCase, detect_expression_or_neutral};
use crate::use_cases::edit_image::{EditExecutor, EditOutcome};
use crate::use_cases::route::Router;
use crate::use_cases::shared::check_cancelled;
use realism_domain::core::scene::is_portrait_like;
use realism_domain::{
    AgentRegistry, AgentResult, AiConfidenceLevel, EnhancementContext, ExpressionState,
    ImageAnalysis, ImageData, IterationRecord, RoutingDecision, RunResult, SceneClassification,
    Signal, StoppedReason, build_summary, compose, default_instruction, expression_issue_signals,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Reasons a run ends early
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnhanceError {
    #[error("Image is empty")]
    EmptyImage,

    #[error("Editing failed: {0}")]
    EditFailed(String),

    #[error("Editing timed out after {attempts} poll attempts")]
    EditTimedOut { attempts: u32 },

    #[error("Operation cancelled")]
    Cancelled,
}

impl EnhanceError {
    pub fn stopped_reason(&self) -> StoppedReason {
        match self {
            EnhanceError::Cancelled => StoppedReason::Cancelled,
            _ => StoppedReason::Error,
        }
    }
}

/// Input for the enhance loop: an already analyzed image.
#[derive(Debug, Clone)]
pub struct EnhanceImageInput {
    pub image: ImageData,
    pub classification: SceneClassification,
    pub signals: Vec<Signal>,
    /// Analyzed on demand for portrait-like scenes when absent
    pub expression: Option<ExpressionState>,
}

impl EnhanceImageInput {
    pub fn new(image: ImageData, classification: SceneClassification, signals: Vec<Signal>) -> Self {
        Self {
            image,
            classification,
            signals,
            expression: None,
        }
    }

    pub fn with_expression(mut self, expression: ExpressionState) -> Self {
        self.expression = Some(expression);
        self
    }

    pub fn from_analysis(image: ImageData, analysis: ImageAnalysis) -> Self {
        Self {
            image,
            classification: analysis.classification,
            signals: analysis.signals,
            expression: Some(analysis.expression),
        }
    }
}

/// Mutable state of one run, owned by the loop.
struct RunState {
    scene: String,
    image: ImageData,
    likelihood: f64,
    signals: Vec<Signal>,
    expression: ExpressionState,
    iterations: Vec<IterationRecord>,
    history: Vec<AgentResult>,
}

/// What running one decision's agents produced.
struct AgentRun {
    image: ImageData,
    results: Vec<AgentResult>,
    aborted: Option<EnhanceError>,
}

/// Use case for enhancing one image
pub struct EnhanceImageUseCase {
    router: Arc<Router>,
    registry: AgentRegistry,
    classifier: Arc<dyn SceneClassifier>,
    detector: Arc<dyn SignalDetector>,
    editor: Arc<dyn ImageEditor>,
    params: EnhancementParams,
    poll_params: EditPollParams,
    logger: Arc<dyn RunEventLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl EnhanceImageUseCase {
    pub fn new(
        router: Arc<Router>,
        registry: AgentRegistry,
        classifier: Arc<dyn SceneClassifier>,
        detector: Arc<dyn SignalDetector>,
        editor: Arc<dyn ImageEditor>,
    ) -> Self {
        Self {
            router,
            registry,
            classifier,
            detector,
            editor,
            params: EnhancementParams::default(),
            poll_params: EditPollParams::default(),
            logger: Arc::new(NoRunLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: EnhancementParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_poll_params(mut self, poll_params: EditPollParams) -> Self {
        self.poll_params = poll_params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn RunEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Analyze and enhance a raw image with default (no-op) progress
    pub async fn process(&self, image: ImageData) -> RunResult {
        self.process_with_progress(image, &NoProgress).await
    }

    /// Analyze and enhance a raw image
    pub async fn process_with_progress(
        &self,
        image: ImageData,
        progress: &dyn EnhancementProgress,
    ) -> RunResult {
        let analyzer = AnalyzeImageUseCase::new(self.classifier.clone(), self.detector.clone());
        match analyzer.execute(&image).await {
            Ok(analysis) => {
                self.execute_with_progress(EnhanceImageInput::from_analysis(image, analysis), progress)
                    .await
            }
            Err(e) => {
                warn!("Cannot enhance: {}", e);
                let result = self.setup_failure(image, EnhanceError::EmptyImage);
                progress.on_run_complete(&result);
                result
            }
        }
    }

    /// Execute the loop with default (no-op) progress
    pub async fn execute(&self, input: EnhanceImageInput) -> RunResult {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the loop with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: EnhanceImageInput,
        progress: &dyn EnhancementProgress,
    ) -> RunResult {
        let original = input.image.clone();
        if original.is_empty() {
            let result = self.setup_failure(original, EnhanceError::EmptyImage);
            progress.on_run_complete(&result);
            return result;
        }

        let scene = input.classification.primary_scene.clone();
        let expression = match input.expression {
            Some(expression) => expression,
            None if is_portrait_like(&scene) => {
                detect_expression_or_neutral(self.detector.as_ref(), &original).await
            }
            None => ExpressionState::neutral(),
        };
        let initial_expression = expression.clone();
        let initial_likelihood = input.classification.ai_likelihood;

        let mut state = RunState {
            scene,
            image: original.clone(),
            likelihood: initial_likelihood,
            signals: input.signals,
            expression,
            iterations: Vec::new(),
            history: Vec::new(),
        };

        let (stopped_reason, error_message) =
            if initial_likelihood < self.params.likelihood_threshold {
                info!(
                    "Likelihood {:.2} already below {:.2}, nothing to do",
                    initial_likelihood, self.params.likelihood_threshold
                );
                (StoppedReason::ThresholdReached, None)
            } else {
                self.run_loop(&mut state, progress).await
            };

        let summary = build_summary(
            &state.iterations,
            initial_likelihood,
            state.likelihood,
            &initial_expression,
            stopped_reason,
        );
        let result = RunResult {
            original_image: original,
            enhanced_image: state.image,
            scene_type: state.scene,
            iterations: state.iterations,
            initial_likelihood,
            final_likelihood: state.likelihood,
            initial_confidence: AiConfidenceLevel::from_likelihood(initial_likelihood),
            final_confidence: AiConfidenceLevel::from_likelihood(state.likelihood),
            final_signals: state.signals,
            expression: initial_expression,
            summary,
            stopped_reason,
            error_message,
        };

        info!(
            "Run finished: {} after {} iteration(s), likelihood {:.2} -> {:.2}",
            result.stopped_reason,
            result.iteration_count(),
            result.initial_likelihood,
            result.final_likelihood
        );
        self.logger.log(RunEvent::new(
            "run_complete",
            json!({
                "stopped_reason": result.stopped_reason,
                "iterations": result.iteration_count(),
                "initial_likelihood": result.initial_likelihood,
                "final_likelihood": result.final_likelihood,
                "initial_confidence": result.initial_confidence,
                "final_confidence": result.final_confidence,
                "summary": result.summary,
                "error": result.error_message,
            }),
        ));
        progress.on_run_complete(&result);
        result
    }

    /// Iterate until a stop condition; returns the reason and any error text.
    async fn run_loop(
        &self,
        state: &mut RunState,
        progress: &dyn EnhancementProgress,
    ) -> (StoppedReason, Option<String>) {
        let token = self.cancellation_token.clone().unwrap_or_default();

        for index in 1..=self.params.max_iterations {
            if let Err(e) = check_cancelled(&self.cancellation_token) {
                info!("Run cancelled before iteration {}", index);
                return (StoppedReason::Cancelled, Some(e.to_string()));
            }

            info!(
                "Iteration {}: likelihood {:.2}, {} signal(s)",
                index,
                state.likelihood,
                state.signals.len()
            );
            progress.on_iteration_start(index, state.likelihood);

            let mut ctx = EnhancementContext::new(state.image.clone(), &state.scene, state.likelihood)
                .with_signals(state.signals.clone())
                .with_expression(state.expression.clone())
                .with_iteration(index);
            ctx.previous_results = state.history.clone();

            let decision = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return (StoppedReason::Cancelled, Some(EnhanceError::Cancelled.to_string()));
                }
                decision = self.router.route(&ctx) => decision,
            };
            self.log_decision(index, &decision);
            progress.on_routing_complete(&decision);

            if decision.is_empty() {
                info!("No agents selected: {}", decision.reasoning);
                return (StoppedReason::NoAgentsNeeded, None);
            }

            let run = self.run_agents(&ctx, &decision, progress, &token).await;
            state.history.extend(run.results.iter().cloned());
            state.image = run.image;

            if let Some(error) = run.aborted {
                warn!("Iteration {} aborted: {}", index, error);
                let record = IterationRecord {
                    index,
                    likelihood_before: state.likelihood,
                    likelihood_after: state.likelihood,
                    agents_invoked: run.results.iter().map(|r| r.agent_kind).collect(),
                    agent_results: run.results,
                    signals_before: state.signals.clone(),
                    signals_after: state.signals.clone(),
                    decision,
                };
                self.record_iteration(state, record, progress);
                return (error.stopped_reason(), Some(error.to_string()));
            }

            let likelihood_before = state.likelihood;
            let signals_before = std::mem::take(&mut state.signals);
            let (likelihood_after, signals_after) = match self.redetect(&state.image).await {
                Some((likelihood, mut fresh)) => {
                    if is_portrait_like(&state.scene) {
                        state.expression =
                            detect_expression_or_neutral(self.detector.as_ref(), &state.image)
                                .await;
                    }
                    fresh.extend(expression_issue_signals(&state.expression));
                    (likelihood, fresh)
                }
                // Previous signals already carry the expression issues
                None => (likelihood_before, signals_before.clone()),
            };

            let record = IterationRecord {
                index,
                likelihood_before,
                likelihood_after,
                agents_invoked: run.results.iter().map(|r| r.agent_kind).collect(),
                agent_results: run.results,
                signals_before,
                signals_after: signals_after.clone(),
                decision,
            };
            let improvement = record.improvement();
            self.record_iteration(state, record, progress);
            state.likelihood = likelihood_after;
            state.signals = signals_after;

            if likelihood_after < self.params.likelihood_threshold {
                return (StoppedReason::ThresholdReached, None);
            }
            if improvement < self.params.improvement_threshold {
                info!(
                    "Improvement {:.3} below {:.3}, stopping",
                    improvement, self.params.improvement_threshold
                );
                return (StoppedReason::NoImprovement, None);
            }
        }

        (StoppedReason::MaxIterations, None)
    }

    /// Run the decision's agents in priority order, each on the previous
    /// agent's output. An agent fault is recorded and skipped; an editing
    /// failure aborts the remaining agents.
    async fn run_agents(
        &self,
        ctx: &EnhancementContext,
        decision: &RoutingDecision,
        progress: &dyn EnhancementProgress,
        token: &CancellationToken,
    ) -> AgentRun {
        let executor = EditExecutor::new(self.editor.clone(), self.poll_params.clone());
        let mut image = ctx.image.clone();
        let mut results: Vec<AgentResult> = Vec::new();
        let mut aborted = None;

        for &kind in decision.priority_order() {
            if token.is_cancelled() {
                aborted = Some(EnhanceError::Cancelled);
                break;
            }
            progress.on_agent_start(kind);

            let instruction = decision
                .instruction_for(kind)
                .cloned()
                .unwrap_or_else(|| default_instruction(kind, &ctx.expression));
            let mut prior = ctx.previous_results.clone();
            prior.extend(results.iter().cloned());
            let agent_ctx = ctx.for_agent(image.clone(), instruction, prior);

            let result = match self.registry.get(kind).apply(&agent_ctx) {
                Err(e) => {
                    warn!("{} agent fault: {}", kind, e);
                    AgentResult::failure(kind, image.clone(), e.to_string())
                }
                Ok(application) => {
                    let directive = compose(&application.instruction);
                    debug!(
                        "{} directive: +[{}] -[{}] denoise={:.2}",
                        kind, directive.positive, directive.negative, directive.denoising_strength
                    );
                    let request = EditRequest::new(
                        image.clone(),
                        directive,
                        application.instruction.expression_mode,
                    );
                    match executor.execute(&request, token).await {
                        EditOutcome::Completed(edited) => {
                            image = edited.clone();
                            AgentResult::success(
                                kind,
                                edited,
                                application.description,
                                application.changes_applied,
                                application.instruction,
                            )
                        }
                        outcome => {
                            aborted = Some(match &outcome {
                                EditOutcome::Cancelled => EnhanceError::Cancelled,
                                EditOutcome::TimedOut { attempts } => EnhanceError::EditTimedOut {
                                    attempts: *attempts,
                                },
                                EditOutcome::Failed(reason) => {
                                    EnhanceError::EditFailed(reason.clone())
                                }
                                EditOutcome::Completed(_) => EnhanceError::EditFailed(
                                    "unexpected completion".to_string(),
                                ),
                            });
                            AgentResult::failure(kind, image.clone(), outcome.describe())
                                .with_instruction(application.instruction)
                        }
                    }
                }
            };

            self.log_agent_result(ctx.iteration, &result);
            progress.on_agent_complete(&result);
            results.push(result);
            if aborted.is_some() {
                break;
            }
        }

        AgentRun {
            image,
            results,
            aborted,
        }
    }

    /// Fresh likelihood and signals, or the previous ones if either
    /// collaborator fails.
    /// Fresh likelihood and signals, or `None` when either call fails and
    /// the previous values must carry forward.
    async fn redetect(&self, image: &ImageData) -> Option<(f64, Vec<Signal>)> {
        let classification = match self.classifier.classify(image).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!("Re-classification failed, keeping previous values: {}", e);
                return None;
            }
        };
        match self.detector.detect(image).await {
            Ok(signals) => Some((classification.ai_likelihood, signals)),
            Err(e) => {
                warn!("Re-detection failed, keeping previous values: {}", e);
                None
            }
        }
    }

    fn record_iteration(
        &self,
        state: &mut RunState,
        record: IterationRecord,
        progress: &dyn EnhancementProgress,
    ) {
        info!(
            "Iteration {} done: {:.2} -> {:.2} ({} agent(s))",
            record.index,
            record.likelihood_before,
            record.likelihood_after,
            record.agents_invoked.len()
        );
        self.logger.log(RunEvent::new(
            "iteration",
            json!({
                "index": record.index,
                "likelihood_before": record.likelihood_before,
                "likelihood_after": record.likelihood_after,
                "agents_invoked": record.agents_invoked,
                "signals_after": record.signals_after.len(),
            }),
        ));
        progress.on_iteration_complete(&record);
        state.iterations.push(record);
    }

    fn log_decision(&self, iteration: u32, decision: &RoutingDecision) {
        self.logger.log(RunEvent::new(
            "routing_decision",
            json!({
                "iteration": iteration,
                "priority_order": decision.priority_order(),
                "reasoning": decision.reasoning,
            }),
        ));
    }

    fn log_agent_result(&self, iteration: u32, result: &AgentResult) {
        self.logger.log(RunEvent::new(
            "agent_result",
            json!({
                "iteration": iteration,
                "agent": result.agent_kind,
                "success": result.success,
                "description": result.description,
                "changes_applied": result.changes_applied,
                "error": result.error_message,
            }),
        ));
    }

    /// Result for a run that could not start.
    fn setup_failure(&self, image: ImageData, error: EnhanceError) -> RunResult {
        let expression = ExpressionState::neutral();
        let stopped_reason = error.stopped_reason();
        RunResult {
            original_image: image.clone(),
            enhanced_image: image,
            scene_type: realism_domain::core::scene::UNKNOWN_SCENE.to_string(),
            iterations: Vec::new(),
            initial_likelihood: 0.0,
            final_likelihood: 0.0,
            initial_confidence: AiConfidenceLevel::from_likelihood(0.0),
            final_confidence: AiConfidenceLevel::from_likelihood(0.0),
            final_signals: Vec::new(),
            summary: build_summary(&[], 0.0, 0.0, &expression, stopped_reason),
            expression,
            stopped_reason,
            error_message: Some(error.to_string()),
        }
    }
}
