//! Scene classifier backed by the vision gateway.

use async_trait::async_trait;
use realism_application::ports::analysis::{DetectionError, SceneClassifier};
use realism_application::ports::llm_gateway::VisionGateway;
use realism_domain::{ImageData, SceneClassification, VisionPromptTemplate, parse_classification};
use std::sync::Arc;
use tracing::debug;

pub struct VisionSceneClassifier {
    gateway: Arc<dyn VisionGateway>,
}

impl VisionSceneClassifier {
    pub fn new(gateway: Arc<dyn VisionGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl SceneClassifier for VisionSceneClassifier {
    async fn classify(&self, image: &ImageData) -> Result<SceneClassification, DetectionError> {
        let reply = self
            .gateway
            .describe(
                VisionPromptTemplate::classification_system(),
                VisionPromptTemplate::classification_prompt(),
                image,
            )
            .await?;
        let classification = parse_classification(&reply)?;
        debug!(
            "Classified as {} (likelihood {:.2})",
            classification.primary_scene, classification.ai_likelihood
        );
        Ok(classification)
    }
}
