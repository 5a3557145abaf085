//! Wire format of the fire-and-poll editing service.
//!
//! Submissions go to `POST {endpoint}/tasks`; status comes from
//! `GET {endpoint}/tasks/{id}`. Replies may wrap their payload in `data`
//! and/or `result`, and report status as either a word or a numeric code.

use realism_application::ports::image_editor::EditRequest;
use serde::Serialize;
use serde_json::Value;

/// Numeric codes meaning the task finished successfully.
const SUCCESS_CODES: [i64; 3] = [2, 10, 20];
/// Numeric codes meaning the task is still queued or running.
const PENDING_CODES: [i64; 3] = [0, 1, 9];

/// Keys that may hold an inline base64 result.
const INLINE_IMAGE_KEYS: [&str; 4] = ["image_base64", "base64", "image", "result_image"];

#[derive(Debug, Clone, Serialize)]
pub struct SubmitBody {
    /// Data URL of the input image
    pub image: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub denoising_strength: f64,
    pub steps: u32,
    pub cfg_scale: f64,
    pub sampler_name: String,
    pub seed: i64,
}

impl SubmitBody {
    pub fn new(request: &EditRequest, image_data_url: String) -> Self {
        Self {
            image: image_data_url,
            prompt: request.positive.clone(),
            negative_prompt: request.negative.clone(),
            denoising_strength: request.denoising_strength,
            steps: request.style.steps,
            cfg_scale: request.style.cfg_scale,
            sampler_name: request.style.sampler.clone(),
            seed: request.style.seed,
        }
    }
}

/// Where a finished task's image can be found.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Inline(String),
    Url(String),
}

/// Task state decoded from one status reply.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskState {
    Pending,
    Succeeded(ImageSource),
    Failed(String),
}

/// Task identifier from a submit reply.
pub fn parse_task_id(reply: &Value) -> Option<String> {
    let candidates = [
        reply.pointer("/data/result/id"),
        reply.pointer("/data/id"),
        reply.pointer("/data/task_id"),
        reply.get("task_id"),
        reply.get("id"),
        reply.get("msg_id"),
    ];
    candidates.into_iter().flatten().find_map(id_string)
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode a status reply.
///
/// Unknown status values count as pending; the poll bound handles services
/// that never settle.
pub fn parse_task_state(reply: &Value) -> TaskState {
    let reply = reply
        .get("result")
        .filter(|r| r.get("data").is_some() || r.get("status").is_some())
        .unwrap_or(reply);
    let data = reply.get("data").filter(|d| d.is_object()).unwrap_or(reply);

    match classify_status(data.get("status")) {
        Status::Pending => TaskState::Pending,
        Status::Failed => TaskState::Failed(error_message(data)),
        Status::Succeeded => {
            let output = data
                .get("output")
                .or_else(|| data.get("result"))
                .unwrap_or(data);
            match image_source(output) {
                Some(source) => TaskState::Succeeded(source),
                None => TaskState::Failed("task succeeded without an image".to_string()),
            }
        }
    }
}

enum Status {
    Pending,
    Succeeded,
    Failed,
}

fn classify_status(status: Option<&Value>) -> Status {
    match status {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(code) if SUCCESS_CODES.contains(&code) => Status::Succeeded,
            Some(code) if PENDING_CODES.contains(&code) => Status::Pending,
            _ => Status::Failed,
        },
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "success" | "succeeded" | "completed" | "done" | "finished" => Status::Succeeded,
            "failed" | "failure" | "error" | "cancelled" | "canceled" => Status::Failed,
            _ => Status::Pending,
        },
        _ => Status::Pending,
    }
}

fn error_message(data: &Value) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|key| data.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Object(o) => o
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| "unknown error".to_string())
}

fn image_source(output: &Value) -> Option<ImageSource> {
    match output {
        Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => {
            Some(ImageSource::Url(s.clone()))
        }
        Value::String(s) if !s.trim().is_empty() => Some(ImageSource::Inline(s.clone())),
        Value::Array(items) => items.iter().find_map(image_source),
        Value::Object(map) => INLINE_IMAGE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
            .map(|s| ImageSource::Inline(s.to_string()))
            .or_else(|| {
                map.get("url")
                    .and_then(Value::as_str)
                    .map(|u| ImageSource::Url(u.to_string()))
            }),
        _ => None,
    }
}
