//! Image editing port
//!
//! The editing collaborator is fire-and-poll: [`ImageEditor::submit`] once,
//! then [`ImageEditor::poll`] until it leaves [`EditStatus::Pending`]. The
//! bounded loop around it lives in
//! [`EditExecutor`](crate::use_cases::edit_image::EditExecutor).

use async_trait::async_trait;
use realism_domain::{ComposedDirective, ExpressionMode, ImageData};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from the editing collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Submit failed: {0}")]
    SubmitFailed(String),

    #[error("Poll failed: {0}")]
    PollFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Sampler settings sent with every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    pub steps: u32,
    pub cfg_scale: f64,
    pub sampler: String,
    /// -1 asks the service for a random seed
    pub seed: i64,
}

impl StyleParams {
    /// Expression corrections get a few more sampling steps.
    pub fn for_mode(mode: ExpressionMode) -> Self {
        Self {
            steps: if mode.is_correct() { 25 } else { 20 },
            ..Self::default()
        }
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            steps: 20,
            cfg_scale: 7.0,
            sampler: "DPM++ 2M Karras".to_string(),
            seed: -1,
        }
    }
}

/// One edit to submit.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub image: ImageData,
    pub positive: String,
    pub negative: String,
    pub denoising_strength: f64,
    pub style: StyleParams,
}

impl EditRequest {
    pub fn new(image: ImageData, directive: ComposedDirective, mode: ExpressionMode) -> Self {
        Self {
            image,
            positive: directive.positive,
            negative: directive.negative,
            denoising_strength: directive.denoising_strength,
            style: StyleParams::for_mode(mode),
        }
    }
}

/// Identifier of a submitted edit task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status reported by one poll.
#[derive(Debug, Clone)]
pub enum EditStatus {
    Pending,
    Succeeded(ImageData),
    Failed(String),
}

/// Image editing collaborator
#[async_trait]
pub trait ImageEditor: Send + Sync {
    async fn submit(&self, request: &EditRequest) -> Result<TaskHandle, EditError>;

    async fn poll(&self, handle: &TaskHandle) -> Result<EditStatus, EditError>;
}
