//! Collaborator endpoints from TOML (`[reasoning]`, `[vision]`, `[editor]`)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat endpoint used for routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    /// Base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Direct API key (prefer the env var named by `api_key_env`).
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,
    pub model: String,
    /// Max tokens per reply
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 2048,
            timeout_seconds: 60,
        }
    }
}

impl FileReasoningConfig {
    /// The configured key, or the one found in `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Vision model; shares the reasoning endpoint and credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVisionConfig {
    /// Falls back to `reasoning.model` when unset.
    pub model: Option<String>,
}

/// Fire-and-poll image editing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEditorConfig {
    /// Base URL; tasks are submitted to `{endpoint}/tasks`.
    pub endpoint: Option<String>,
    /// Bearer token, if the service wants one.
    pub token: Option<String>,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub timeout_seconds: u64,
}

impl Default for FileEditorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            poll_interval_ms: 2000,
            max_poll_attempts: 30,
            timeout_seconds: 60,
        }
    }
}

impl FileEditorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
