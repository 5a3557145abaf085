//! Loop settings from TOML (`[enhancement]` section)

use realism_application::EnhancementParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEnhancementConfig {
    pub max_iterations: u32,
    pub likelihood_threshold: f64,
    pub improvement_threshold: f64,
}

impl Default for FileEnhancementConfig {
    fn default() -> Self {
        let params = EnhancementParams::default();
        Self {
            max_iterations: params.max_iterations,
            likelihood_threshold: params.likelihood_threshold,
            improvement_threshold: params.improvement_threshold,
        }
    }
}

impl FileEnhancementConfig {
    pub fn to_params(&self) -> EnhancementParams {
        EnhancementParams::default()
            .with_max_iterations(self.max_iterations)
            .with_likelihood_threshold(self.likelihood_threshold)
            .with_improvement_threshold(self.improvement_threshold)
    }
}
