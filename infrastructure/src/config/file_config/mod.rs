//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on demand.

mod enhancement;
mod services;

pub use enhancement::FileEnhancementConfig;
pub use services::{FileEditorConfig, FileReasoningConfig, FileVisionConfig};

use realism_application::EditPollParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("no API key: set reasoning.api_key or the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("editor.endpoint is not configured")]
    MissingEditorEndpoint,

    #[error("{field} cannot be 0")]
    Zero { field: &'static str },

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub reasoning: FileReasoningConfig,
    pub vision: FileVisionConfig,
    pub editor: FileEditorConfig,
    pub enhancement: FileEnhancementConfig,
}

impl FileConfig {
    /// Model used for image analysis.
    pub fn vision_model(&self) -> &str {
        self.vision
            .model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.reasoning.model)
    }

    pub fn poll_params(&self) -> EditPollParams {
        EditPollParams::default()
            .with_poll_interval(self.editor.poll_interval())
            .with_max_attempts(self.editor.max_poll_attempts)
    }

    /// Checks everything a full enhancement run needs.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_analysis()?;

        if self
            .editor
            .endpoint
            .as_deref()
            .is_none_or(|e| e.trim().is_empty())
        {
            return Err(ConfigValidationError::MissingEditorEndpoint);
        }
        if self.editor.poll_interval_ms == 0 {
            return Err(ConfigValidationError::Zero {
                field: "editor.poll_interval_ms",
            });
        }
        if self.editor.max_poll_attempts == 0 {
            return Err(ConfigValidationError::Zero {
                field: "editor.max_poll_attempts",
            });
        }

        let enhancement = &self.enhancement;
        if enhancement.max_iterations == 0 {
            return Err(ConfigValidationError::Zero {
                field: "enhancement.max_iterations",
            });
        }
        for (field, value) in [
            (
                "enhancement.likelihood_threshold",
                enhancement.likelihood_threshold,
            ),
            (
                "enhancement.improvement_threshold",
                enhancement.improvement_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Checks only what analysis needs (the reasoning/vision endpoint).
    pub fn validate_analysis(&self) -> Result<(), ConfigValidationError> {
        if self.reasoning.base_url.trim().is_empty() {
            return Err(ConfigValidationError::Empty {
                field: "reasoning.base_url",
            });
        }
        if self.reasoning.model.trim().is_empty() {
            return Err(ConfigValidationError::Empty {
                field: "reasoning.model",
            });
        }
        if self.reasoning.resolve_api_key().is_none() {
            return Err(ConfigValidationError::MissingApiKey {
                env: self.reasoning.api_key_env.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn valid() -> FileConfig {
        let mut config = FileConfig::default();
        config.reasoning.api_key = Some("sk-test".to_string());
        config.editor.endpoint = Some("http://localhost:7860".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[reasoning]
base_url = "http://localhost:11434/v1"
api_key = "sk-local"
model = "qwen2.5"
max_tokens = 1024

[vision]
model = "llava"

[editor]
endpoint = "http://localhost:7860"
token = "secret"
poll_interval_ms = 500
max_poll_attempts = 10

[enhancement]
max_iterations = 2
likelihood_threshold = 0.3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.model, "qwen2.5");
        assert_eq!(config.reasoning.max_tokens, 1024);
        assert_eq!(config.vision_model(), "llava");
        assert_eq!(config.editor.token.as_deref(), Some("secret"));
        assert_eq!(config.poll_params().poll_interval, Duration::from_millis(500));
        assert_eq!(config.poll_params().max_attempts, 10);

        let params = config.enhancement.to_params();
        assert_eq!(params.max_iterations, 2);
        assert_eq!(params.likelihood_threshold, 0.3);
        // Unset keys keep their defaults
        assert_eq!(params.improvement_threshold, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.enhancement.max_iterations, 3);
        assert_eq!(config.editor.poll_interval_ms, 2000);
        assert_eq!(config.editor.max_poll_attempts, 30);
        assert_eq!(config.vision_model(), config.reasoning.model);
    }

    #[test]
    fn test_missing_editor_endpoint_fails_full_validation_only() {
        let mut config = valid();
        config.editor.endpoint = None;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MissingEditorEndpoint)
        );
        assert!(config.validate_analysis().is_ok());
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = valid();
        config.reasoning.api_key = None;
        config.reasoning.api_key_env = "REALISM_TEST_UNSET_KEY_VAR".to_string();
        assert!(matches!(
            config.validate_analysis(),
            Err(ConfigValidationError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_and_out_of_range_values() {
        let mut config = valid();
        config.editor.max_poll_attempts = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::Zero {
                field: "editor.max_poll_attempts"
            })
        );

        let mut config = valid();
        config.enhancement.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = valid();
        config.enhancement.likelihood_threshold = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::OutOfRange {
                field: "enhancement.likelihood_threshold",
                value: 1.5
            })
        );
    }
}
