//! HTTP client for the fire-and-poll editing service

use crate::codec::{from_base64, sniff_mime, to_data_url};
use crate::config::{ConfigError, ConfigValidationError, FileEditorConfig};
use crate::editor::protocol::{ImageSource, SubmitBody, TaskState, parse_task_id, parse_task_state};
use async_trait::async_trait;
use realism_application::ports::image_editor::{
    EditError, EditRequest, EditStatus, ImageEditor, TaskHandle,
};
use realism_domain::ImageData;
use realism_domain::core::text::preview;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};

pub struct HttpImageEditor {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpImageEditor {
    /// Editor for the `[editor]` section; fails fast without an endpoint.
    pub fn from_config(config: &FileEditorConfig) -> Result<Self, ConfigError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigValidationError::MissingEditorEndpoint)?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        info!("Image editor at {}", endpoint);
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.endpoint)
    }

    fn task_url(&self, handle: &TaskHandle) -> String {
        format!("{}/tasks/{}", self.endpoint, handle)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn download(&self, url: &str) -> Result<ImageData, EditError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EditError::PollFailed(format!("download failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(EditError::PollFailed(format!(
                "download returned HTTP {}",
                response.status()
            )));
        }
        let declared = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| EditError::PollFailed(format!("download failed: {}", e)))?;
        let mime = declared.unwrap_or_else(|| sniff_mime(&bytes).to_string());
        Ok(ImageData::new(bytes.to_vec(), mime))
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("HTTP {}: {}", status, preview(&body, 200)));
    }
    response.json().await.map_err(|e| e.to_string())
}

#[async_trait]
impl ImageEditor for HttpImageEditor {
    async fn submit(&self, request: &EditRequest) -> Result<TaskHandle, EditError> {
        let body = SubmitBody::new(request, to_data_url(&request.image));
        let response = self
            .authorized(self.client.post(self.tasks_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| EditError::SubmitFailed(e.to_string()))?;
        let reply = read_json(response).await.map_err(EditError::SubmitFailed)?;

        let id = parse_task_id(&reply).ok_or_else(|| {
            EditError::InvalidResponse(format!(
                "no task id in {}",
                preview(&reply.to_string(), 200)
            ))
        })?;
        debug!("Edit task {} submitted", id);
        Ok(TaskHandle::new(id))
    }

    async fn poll(&self, handle: &TaskHandle) -> Result<EditStatus, EditError> {
        let response = self
            .authorized(self.client.get(self.task_url(handle)))
            .send()
            .await
            .map_err(|e| EditError::PollFailed(e.to_string()))?;
        let reply = read_json(response).await.map_err(EditError::PollFailed)?;

        match parse_task_state(&reply) {
            TaskState::Pending => Ok(EditStatus::Pending),
            TaskState::Failed(reason) => Ok(EditStatus::Failed(reason)),
            TaskState::Succeeded(ImageSource::Inline(encoded)) => from_base64(&encoded)
                .map(EditStatus::Succeeded)
                .map_err(|e| EditError::InvalidResponse(format!("bad image payload: {}", e))),
            TaskState::Succeeded(ImageSource::Url(url)) => {
                self.download(&url).await.map(EditStatus::Succeeded)
            }
        }
    }
}
