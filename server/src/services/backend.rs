//! Research backend client: chat, file upload, generation and papers.
//!
//! Thin HTTP wrapper around `{BACKEND_URL}`. Response parsing lives in pure
//! functions so it can be tested without a live backend.

use std::time::Duration;

use async_trait::async_trait;
use client::net::types::{GenerateRequest, GenerateResponse};
use serde::Deserialize;

use crate::config::BackendConfig;

/// One uploaded file to forward to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub user_id: String,
    pub project_id: Option<String>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected backend response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ResearchBackend: Send + Sync {
    /// Open a chat for a project and return the assistant's greeting.
    async fn start_chat(&self, user_id: &str, project_id: &str) -> Result<String, BackendError>;

    async fn send_message(&self, user_id: &str, project_id: &str, message: &str) -> Result<String, BackendError>;

    /// Store a file and return its backend file id.
    async fn upload(&self, upload: FileUpload) -> Result<String, BackendError>;

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, BackendError>;

    /// Paper text for one hypothesis selection of a project.
    async fn research(&self, project_id: &str, selection_id: u32) -> Result<String, BackendError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.url.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn read(response: reqwest::Response) -> Result<String, BackendError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(BackendError::Status { status, body: text });
        }
        Ok(text)
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String, BackendError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        Self::read(response).await
    }
}

#[async_trait]
impl ResearchBackend for HttpBackend {
    async fn start_chat(&self, user_id: &str, project_id: &str) -> Result<String, BackendError> {
        let body = serde_json::json!({ "user_id": user_id, "project_id": project_id });
        parse_chat_start(&self.post_json("chat/start", &body).await?)
    }

    async fn send_message(&self, user_id: &str, project_id: &str, message: &str) -> Result<String, BackendError> {
        let body = serde_json::json!({ "user_id": user_id, "project_id": project_id, "message": message });
        parse_chat_message(&self.post_json("chat/message", &body).await?)
    }

    async fn upload(&self, upload: FileUpload) -> Result<String, BackendError> {
        let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| BackendError::Request(format!("invalid content type: {e}")))?;
        }
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("user_id", upload.user_id);
        if let Some(project_id) = upload.project_id {
            form = form.text("project_id", project_id);
        }

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        parse_upload(&Self::read(response).await?)
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, BackendError> {
        let response = self
            .http
            .post(self.endpoint("generate"))
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        parse_generate(&Self::read(response).await?)
    }

    async fn research(&self, project_id: &str, selection_id: u32) -> Result<String, BackendError> {
        let selection = selection_id.to_string();
        let response = self
            .http
            .get(self.endpoint("research"))
            .query(&[("projectId", project_id), ("selectionId", selection.as_str())])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        parse_research(&Self::read(response).await?)
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct ChatBody {
    response: Option<String>,
    reply: Option<String>,
}

#[derive(Deserialize)]
struct UploadBody {
    #[serde(alias = "fileId")]
    file_id: String,
}

#[derive(Deserialize)]
struct ResearchBody {
    paper: String,
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))
}

pub(crate) fn parse_chat_start(body: &str) -> Result<String, BackendError> {
    let chat: ChatBody = decode(body)?;
    chat.reply
        .or(chat.response)
        .ok_or_else(|| BackendError::Decode("missing reply".into()))
}

/// `response` is preferred; older backends only send `reply`.
pub(crate) fn parse_chat_message(body: &str) -> Result<String, BackendError> {
    let chat: ChatBody = decode(body)?;
    chat.response
        .or(chat.reply)
        .ok_or_else(|| BackendError::Decode("missing response".into()))
}

pub(crate) fn parse_upload(body: &str) -> Result<String, BackendError> {
    decode::<UploadBody>(body).map(|u| u.file_id)
}

pub(crate) fn parse_generate(body: &str) -> Result<GenerateResponse, BackendError> {
    decode(body)
}

pub(crate) fn parse_research(body: &str) -> Result<String, BackendError> {
    decode::<ResearchBody>(body).map(|r| r.paper)
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
