//! Reasoning and vision gateway ports
//!
//! Define how the application layer talks to the text-reasoning model that
//! routes experts and to the vision model that analyzes images.

use async_trait::async_trait;
use realism_domain::ImageData;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the text-reasoning collaborator
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Send one prompt and return the raw reply text
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, GatewayError>;
}

/// Gateway to the vision collaborator
#[async_trait]
pub trait VisionGateway: Send + Sync {
    /// Ask a question about an image and return the raw reply text
    async fn describe(
        &self,
        system_prompt: &str,
        prompt: &str,
        image: &ImageData,
    ) -> Result<String, GatewayError>;
}
