//! Analyze use case
//!
//! Classifies an image, detects artifact signals and, for portrait-like
//! scenes, analyzes the facial expression. Every collaborator failure
//! degrades to a default; only an empty image is rejected.

use crate::ports::analysis::{SceneClassifier, SignalDetector};
use realism_domain::{
    DomainError, ExpressionState, ImageAnalysis, ImageData, SceneClassification,
    expression_issue_signals,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for analyzing one image
pub struct AnalyzeImageUseCase {
    classifier: Arc<dyn SceneClassifier>,
    detector: Arc<dyn SignalDetector>,
}

impl AnalyzeImageUseCase {
    pub fn new(classifier: Arc<dyn SceneClassifier>, detector: Arc<dyn SignalDetector>) -> Self {
        Self {
            classifier,
            detector,
        }
    }

    pub async fn execute(&self, image: &ImageData) -> Result<ImageAnalysis, DomainError> {
        if image.is_empty() {
            return Err(DomainError::EmptyImage);
        }

        let classification = match self.classifier.classify(image).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!("Scene classification failed, assuming unknown scene: {}", e);
                SceneClassification::unknown()
            }
        };

        let mut signals = match self.detector.detect(image).await {
            Ok(signals) => signals,
            Err(e) => {
                warn!("Signal detection failed, continuing without signals: {}", e);
                Vec::new()
            }
        };

        let expression = if classification.is_portrait_like() {
            detect_expression_or_neutral(self.detector.as_ref(), image).await
        } else {
            ExpressionState::neutral()
        };
        signals.extend(expression_issue_signals(&expression));

        info!(
            "Analyzed image: scene={}, likelihood={:.2}, {} signal(s), expression={} ({})",
            classification.primary_scene,
            classification.ai_likelihood,
            signals.len(),
            expression.expression_type,
            expression.mode()
        );

        Ok(ImageAnalysis {
            classification,
            signals,
            expression,
        })
    }
}

/// Expression analysis with the neutral default on failure.
pub(crate) async fn detect_expression_or_neutral(
    detector: &dyn SignalDetector,
    image: &ImageData,
) -> ExpressionState {
    match detector.detect_expression(image).await {
        Ok(expression) => expression,
        Err(e) => {
            warn!("Expression analysis failed, assuming neutral: {}", e);
            ExpressionState::neutral()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::analysis::DetectionError;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{MockClassifier, MockDetector, image, signals};
    use realism_domain::{ExpressionMode, ExpressionType, Severity};

    fn laughing() -> ExpressionState {
        ExpressionState::new(
            ExpressionType::BigLaugh,
            false,
            vec!["missing crow's feet".to_string()],
        )
    }

    #[tokio::test]
    async fn test_empty_image_is_rejected() {
        let use_case = AnalyzeImageUseCase::new(
            Arc::new(MockClassifier::new(vec![])),
            Arc::new(MockDetector::new()),
        );
        let err = use_case.execute(&ImageData::jpeg(Vec::new())).await.unwrap_err();
        assert_eq!(err, DomainError::EmptyImage);
    }

    #[tokio::test]
    async fn test_portrait_with_expression_issues() {
        let detector = Arc::new(
            MockDetector::new()
                .with_signals(vec![Ok(signals(&["plastic skin"]))])
                .with_expressions(vec![Ok(laughing())]),
        );
        let use_case = AnalyzeImageUseCase::new(
            Arc::new(MockClassifier::likelihoods("portrait", &[0.85])),
            detector.clone(),
        );
        let analysis = use_case.execute(&image(1)).await.unwrap();
        assert_eq!(analysis.classification.primary_scene, "portrait");
        assert_eq!(analysis.expression.mode(), ExpressionMode::Correct);
        assert_eq!(analysis.signals.len(), 2);
        assert_eq!(
            analysis.signals[1].description,
            "[expression] missing crow's feet"
        );
        assert_eq!(analysis.signals[1].severity, Severity::Medium);
        assert_eq!(detector.expression_call_count(), 1);
    }

    #[tokio::test]
    async fn test_expression_skipped_for_landscape() {
        let detector = Arc::new(MockDetector::new().with_expressions(vec![Ok(laughing())]));
        let use_case = AnalyzeImageUseCase::new(
            Arc::new(MockClassifier::likelihoods("landscape", &[0.7])),
            detector.clone(),
        );
        let analysis = use_case.execute(&image(1)).await.unwrap();
        assert_eq!(analysis.expression, ExpressionState::neutral());
        assert_eq!(detector.expression_call_count(), 0);
    }

    #[tokio::test]
    async fn test_collaborator_failures_degrade_to_defaults() {
        let failure = || DetectionError::Gateway(GatewayError::Timeout);
        let detector = Arc::new(
            MockDetector::new()
                .with_signals(vec![Err(failure())])
                .with_expressions(vec![Err(failure())]),
        );
        let use_case =
            AnalyzeImageUseCase::new(Arc::new(MockClassifier::new(vec![Err(failure())])), detector);
        let analysis = use_case.execute(&image(1)).await.unwrap();
        assert_eq!(analysis.classification, SceneClassification::unknown());
        assert!(analysis.signals.is_empty());
        assert_eq!(analysis.expression, ExpressionState::neutral());
    }
}
