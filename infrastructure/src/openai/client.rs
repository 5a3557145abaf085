//! OpenAI-compatible chat client
//!
//! One client per model. It implements both the reasoning port (text only)
//! and the vision port (text plus one inline image).

use crate::codec::to_data_url;
use crate::config::{ConfigError, ConfigValidationError, FileReasoningConfig};
use crate::openai::protocol::{ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use realism_application::ports::llm_gateway::{GatewayError, ReasoningGateway, VisionGateway};
use realism_domain::ImageData;
use realism_domain::core::text::preview;
use reqwest::Client;
use tracing::{debug, info};

/// Low temperature keeps the JSON replies stable.
const TEMPERATURE: f32 = 0.2;

pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = FileReasoningConfig::default();
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: config.max_tokens,
        })
    }

    /// Client for `model` using the endpoint and credentials in `config`.
    ///
    /// Fails immediately when no API key can be resolved.
    pub fn from_config(config: &FileReasoningConfig, model: &str) -> Result<Self, ConfigError> {
        let api_key =
            config
                .resolve_api_key()
                .ok_or_else(|| ConfigValidationError::MissingApiKey {
                    env: config.api_key_env.clone(),
                })?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        info!("Chat client for {} at {}", model, config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            model: model.to_string(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status,
                preview(&body, 200)
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let text = body
            .first_text()
            .ok_or_else(|| GatewayError::InvalidResponse("empty completion".to_string()))?
            .to_string();
        debug!("{} replied: {}", self.model, preview(&text, 300));
        Ok(text)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl ReasoningGateway for OpenAiChatClient {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, GatewayError> {
        self.chat(vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)])
            .await
    }
}

#[async_trait]
impl VisionGateway for OpenAiChatClient {
    async fn describe(
        &self,
        system_prompt: &str,
        prompt: &str,
        image: &ImageData,
    ) -> Result<String, GatewayError> {
        self.chat(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user_with_image(prompt, to_data_url(image)),
        ])
        .await
    }
}
