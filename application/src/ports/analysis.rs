//! Image analysis ports
//!
//! The scene classifier and signal detector are external collaborators.
//! Every caller in this crate treats their failures as degraded input and
//! substitutes a default, so the error type only needs to be descriptive.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use realism_domain::{DomainError, ExpressionState, ImageData, SceneClassification, Signal};
use thiserror::Error;

/// Errors from the classifier or detector
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Unusable reply: {0}")]
    Reply(#[from] DomainError),
}

/// Scene and likelihood classifier
#[async_trait]
pub trait SceneClassifier: Send + Sync {
    async fn classify(&self, image: &ImageData) -> Result<SceneClassification, DetectionError>;
}

/// Artifact and expression detector
#[async_trait]
pub trait SignalDetector: Send + Sync {
    async fn detect(&self, image: &ImageData) -> Result<Vec<Signal>, DetectionError>;

    async fn detect_expression(&self, image: &ImageData)
    -> Result<ExpressionState, DetectionError>;
}
