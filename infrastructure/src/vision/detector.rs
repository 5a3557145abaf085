//! Artifact and expression detector backed by the vision gateway.

use async_trait::async_trait;
use realism_application::ports::analysis::{DetectionError, SignalDetector};
use realism_application::ports::llm_gateway::VisionGateway;
use realism_domain::{
    ExpressionState, ImageData, Signal, VisionPromptTemplate, parse_expression, parse_signals,
};
use std::sync::Arc;
use tracing::debug;

pub struct VisionSignalDetector {
    gateway: Arc<dyn VisionGateway>,
}

impl VisionSignalDetector {
    pub fn new(gateway: Arc<dyn VisionGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl SignalDetector for VisionSignalDetector {
    async fn detect(&self, image: &ImageData) -> Result<Vec<Signal>, DetectionError> {
        let reply = self
            .gateway
            .describe(
                VisionPromptTemplate::detection_system(),
                VisionPromptTemplate::detection_prompt(),
                image,
            )
            .await?;
        let signals = parse_signals(&reply)?;
        debug!("Detected {} signal(s)", signals.len());
        Ok(signals)
    }

    async fn detect_expression(
        &self,
        image: &ImageData,
    ) -> Result<ExpressionState, DetectionError> {
        let reply = self
            .gateway
            .describe(
                VisionPromptTemplate::detection_system(),
                VisionPromptTemplate::expression_prompt(),
                image,
            )
            .await?;
        let expression = parse_expression(&reply)?;
        debug!(
            "Expression {} ({})",
            expression.expression_type.as_str(),
            expression.mode().as_str()
        );
        Ok(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::test_gateway::ScriptedVision;
    use realism_domain::{ExpressionMode, ExpressionType};

    fn image() -> ImageData {
        ImageData::jpeg(vec![7u8])
    }

    #[tokio::test]
    async fn test_detect_parses_signals() {
        let gateway = Arc::new(ScriptedVision::new(vec![Ok(r#"Here you go:
{"fake_signals": [
  {"signal": "plastic skin on cheeks", "severity": "high", "dimension": "skin"},
  {"signal": "", "severity": "low"}
]}"#
        .to_string())]));
        let detector = VisionSignalDetector::new(gateway);

        let signals = detector.detect(&image()).await.unwrap();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].description, "plastic skin on cheeks");
    }

    #[tokio::test]
    async fn test_detect_expression_derives_mode() {
        let gateway = Arc::new(ScriptedVision::new(vec![Ok(r#"{
  "has_face": true,
  "expression_type": "big_laugh",
  "expression_natural": false,
  "expression_issues": ["cheeks not raised"],
  "correction_needed": false
}"#
        .to_string())]));
        let detector = VisionSignalDetector::new(gateway.clone());

        let expression = detector.detect_expression(&image()).await.unwrap();
        assert_eq!(expression.expression_type, ExpressionType::BigLaugh);
        assert_eq!(expression.mode(), ExpressionMode::Correct);
        assert_eq!(gateway.prompts()[0], VisionPromptTemplate::expression_prompt());
    }
}
