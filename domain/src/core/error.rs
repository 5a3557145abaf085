//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No JSON object found in reply: {0}")]
    NoJsonObject(String),

    #[error("Malformed JSON in reply: {0}")]
    MalformedJson(String),

    #[error("Routing reply selected no usable agents")]
    EmptyRouting,

    #[error("Instruction for {expected} was handed to the {actual} agent")]
    InstructionMismatch { expected: String, actual: String },

    #[error("Denoising strength {0} is outside [0, 1]")]
    InvalidDenoising(f64),

    #[error("Image is empty")]
    EmptyImage,

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Whether the error came from an unusable reasoning/vision reply.
    pub fn is_reply_error(&self) -> bool {
        matches!(
            self,
            DomainError::NoJsonObject(_) | DomainError::MalformedJson(_) | DomainError::EmptyRouting
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        assert_eq!(DomainError::Cancelled.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_reply_error_classification() {
        assert!(DomainError::EmptyRouting.is_reply_error());
        assert!(DomainError::NoJsonObject("x".into()).is_reply_error());
        assert!(!DomainError::EmptyImage.is_reply_error());
        assert!(!DomainError::InvalidDenoising(1.5).is_cancelled());
    }

    #[test]
    fn test_mismatch_display() {
        let err = DomainError::InstructionMismatch {
            expected: "skin".into(),
            actual: "color".into(),
        };
        assert_eq!(
            err.to_string(),
            "Instruction for skin was handed to the color agent"
        );
    }
}
