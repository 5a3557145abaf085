//! Enhancement parameters - loop and edit-poll control.
//!
//! [`EnhancementParams`] bounds the analyze→route→fix loop in
//! [`EnhanceImageUseCase`](crate::use_cases::enhance_image::EnhanceImageUseCase);
//! [`EditPollParams`] bounds the fire-and-poll wait in
//! [`EditExecutor`](crate::use_cases::edit_image::EditExecutor).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementParams {
    /// Hard cap on iterations.
    pub max_iterations: u32,
    /// Stop once the likelihood falls below this.
    pub likelihood_threshold: f64,
    /// Stop when one iteration improves less than this.
    pub improvement_threshold: f64,
}

impl Default for EnhancementParams {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            likelihood_threshold: 0.4,
            improvement_threshold: 0.05,
        }
    }
}

impl EnhancementParams {
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_likelihood_threshold(mut self, threshold: f64) -> Self {
        self.likelihood_threshold = threshold;
        self
    }

    pub fn with_improvement_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = threshold;
        self
    }
}

/// Fire-and-poll bounds for the editing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPollParams {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for EditPollParams {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

impl EditPollParams {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}
