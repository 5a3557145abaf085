//! Scripted collaborator mocks shared by the use case tests.

use crate::ports::analysis::{DetectionError, SceneClassifier, SignalDetector};
use crate::ports::image_editor::{EditError, EditRequest, EditStatus, ImageEditor, TaskHandle};
use crate::ports::llm_gateway::{GatewayError, ReasoningGateway};
use crate::ports::progress::EnhancementProgress;
use crate::ports::run_logger::{RunEvent, RunEventLogger};
use async_trait::async_trait;
use realism_domain::{
    AgentKind, AgentResult, EnhancementContext, ExpressionState, ImageData, IterationRecord,
    RoutingDecision, RunResult, SceneClassification, Severity, Signal,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Distinct one-byte image.
pub(crate) fn image(tag: u8) -> ImageData {
    ImageData::jpeg(vec![tag])
}

pub(crate) fn signals(descriptions: &[&str]) -> Vec<Signal> {
    descriptions
        .iter()
        .map(|d| Signal::new(*d, Severity::High))
        .collect()
}

pub(crate) fn context(scene: &str, descriptions: &[&str]) -> EnhancementContext {
    EnhancementContext::new(image(1), scene, 0.8).with_signals(signals(descriptions))
}

// ==================== Reasoning ====================

pub(crate) struct MockReasoning {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockReasoning {
    pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReasoningGateway for MockReasoning {
    async fn complete(&self, _system_prompt: &str, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
    }
}

// ==================== Analysis ====================

/// Classifier replaying scripted results; fails once the script runs out.
pub(crate) struct MockClassifier {
    results: Mutex<VecDeque<Result<SceneClassification, DetectionError>>>,
    calls: AtomicU32,
}

impl MockClassifier {
    pub(crate) fn new(results: Vec<Result<SceneClassification, DetectionError>>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            calls: AtomicU32::new(0),
        }
    }

    /// Successive likelihoods for a fixed scene.
    pub(crate) fn likelihoods(scene: &str, values: &[f64]) -> Self {
        Self::new(
            values
                .iter()
                .map(|v| Ok(SceneClassification::new(scene, *v)))
                .collect(),
        )
    }

    pub(crate) fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SceneClassifier for MockClassifier {
    async fn classify(&self, _image: &ImageData) -> Result<SceneClassification, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(DetectionError::Gateway(GatewayError::Other(
                "classifier script exhausted".to_string(),
            )))
        })
    }
}

/// Detector replaying scripted results; an exhausted script yields no
/// signals and a neutral expression.
pub(crate) struct MockDetector {
    signals: Mutex<VecDeque<Result<Vec<Signal>, DetectionError>>>,
    expressions: Mutex<VecDeque<Result<ExpressionState, DetectionError>>>,
    expression_calls: AtomicU32,
}

impl MockDetector {
    pub(crate) fn new() -> Self {
        Self {
            signals: Mutex::new(VecDeque::new()),
            expressions: Mutex::new(VecDeque::new()),
            expression_calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn with_signals(self, results: Vec<Result<Vec<Signal>, DetectionError>>) -> Self {
        *self.signals.lock().unwrap() = VecDeque::from(results);
        self
    }

    pub(crate) fn with_expressions(
        self,
        results: Vec<Result<ExpressionState, DetectionError>>,
    ) -> Self {
        *self.expressions.lock().unwrap() = VecDeque::from(results);
        self
    }

    pub(crate) fn expression_call_count(&self) -> u32 {
        self.expression_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignalDetector for MockDetector {
    async fn detect(&self, _image: &ImageData) -> Result<Vec<Signal>, DetectionError> {
        self.signals
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn detect_expression(
        &self,
        _image: &ImageData,
    ) -> Result<ExpressionState, DetectionError> {
        self.expression_calls.fetch_add(1, Ordering::SeqCst);
        self.expressions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ExpressionState::neutral()))
    }
}

// ==================== Editor ====================

/// What the mock editor does with one submitted task.
#[derive(Debug, Clone)]
pub(crate) enum EditScript {
    /// First poll succeeds with a fresh image
    Complete,
    /// Never leaves pending
    Hang,
    /// First poll reports failure
    Fail(String),
}

pub(crate) struct MockEditor {
    submit_error: Option<String>,
    default_script: EditScript,
    scripts: Mutex<VecDeque<EditScript>>,
    scripted_polls: Mutex<VecDeque<Result<EditStatus, EditError>>>,
    current: Mutex<Option<EditScript>>,
    requests: Mutex<Vec<EditRequest>>,
    polls: AtomicU32,
    produced: Mutex<Vec<ImageData>>,
}

impl MockEditor {
    /// Tasks stay pending unless polls are scripted.
    pub(crate) fn new() -> Self {
        Self::with_default(EditScript::Hang)
    }

    /// Every task completes on its first poll.
    pub(crate) fn completing() -> Self {
        Self::with_default(EditScript::Complete)
    }

    pub(crate) fn failing_submit(reason: &str) -> Self {
        Self {
            submit_error: Some(reason.to_string()),
            ..Self::new()
        }
    }

    fn with_default(default_script: EditScript) -> Self {
        Self {
            submit_error: None,
            default_script,
            scripts: Mutex::new(VecDeque::new()),
            scripted_polls: Mutex::new(VecDeque::new()),
            current: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            polls: AtomicU32::new(0),
            produced: Mutex::new(Vec::new()),
        }
    }

    /// Per-submission scripts, consumed in order before the default applies.
    pub(crate) fn then_submit(self, scripts: Vec<EditScript>) -> Self {
        *self.scripts.lock().unwrap() = VecDeque::from(scripts);
        self
    }

    /// Raw poll replies, consumed before any script.
    pub(crate) fn then_poll(self, polls: Vec<Result<EditStatus, EditError>>) -> Self {
        *self.scripted_polls.lock().unwrap() = VecDeque::from(polls);
        self
    }

    pub(crate) fn poll_count(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub(crate) fn submit_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<EditRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Images returned by completed tasks, in order.
    pub(crate) fn produced(&self) -> Vec<ImageData> {
        self.produced.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEditor for MockEditor {
    async fn submit(&self, request: &EditRequest) -> Result<TaskHandle, EditError> {
        if let Some(reason) = &self.submit_error {
            return Err(EditError::SubmitFailed(reason.clone()));
        }
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_script.clone());
        *self.current.lock().unwrap() = Some(script);
        Ok(TaskHandle::new(format!("task-{}", requests.len())))
    }

    async fn poll(&self, _handle: &TaskHandle) -> Result<EditStatus, EditError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(scripted) = self.scripted_polls.lock().unwrap().pop_front() {
            return scripted;
        }
        let script = self.current.lock().unwrap().clone();
        match script {
            Some(EditScript::Complete) => {
                let mut produced = self.produced.lock().unwrap();
                let edited = image(100 + produced.len() as u8);
                produced.push(edited.clone());
                Ok(EditStatus::Succeeded(edited))
            }
            Some(EditScript::Fail(reason)) => Ok(EditStatus::Failed(reason)),
            Some(EditScript::Hang) | None => Ok(EditStatus::Pending),
        }
    }
}

// ==================== Progress / logging ====================

#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl EnhancementProgress for RecordingProgress {
    fn on_iteration_start(&self, index: u32, _likelihood: f64) {
        self.push(format!("iteration_start:{}", index));
    }

    fn on_routing_complete(&self, decision: &RoutingDecision) {
        self.push(format!("routing:{}", decision.priority_order().len()));
    }

    fn on_agent_start(&self, kind: AgentKind) {
        self.push(format!("agent_start:{}", kind));
    }

    fn on_agent_complete(&self, result: &AgentResult) {
        self.push(format!("agent_complete:{}:{}", result.agent_kind, result.success));
    }

    fn on_iteration_complete(&self, record: &IterationRecord) {
        self.push(format!("iteration_complete:{}", record.index));
    }

    fn on_run_complete(&self, result: &RunResult) {
        self.push(format!("run_complete:{}", result.stopped_reason));
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl RunEventLogger for RecordingLogger {
    fn log(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
