//! Research routes: chat, upload, generation and papers.
//!
//! Each handler checks the session, checks that any `user_id` in the body
//! is the session user, then forwards to the research backend.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use client::net::types::{
    ChatMessageRequest, ChatMessageResponse, ChatStartRequest, ChatStartResponse, GenerateRequest, GenerateResponse,
    ResearchQuery, ResearchResponse, UploadResponse,
};
use client::state::upload::{DATA_FILES, DOCUMENT_FILES, MAX_FILE_BYTES};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::services::backend::FileUpload;
use crate::state::AppState;

/// Request body limit for `/api/upload`: one maximal file plus form overhead.
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024 + 64 * 1024;

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

async fn field_text(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(multipart_error)
}

/// Size and extension gate, mirroring the browser-side pickers.
pub(crate) fn check_upload(file_name: &str, size: usize) -> Result<(), ApiError> {
    if u64::try_from(size).map_or(true, |size| size > MAX_FILE_BYTES) {
        return Err(ApiError::PayloadTooLarge);
    }
    DATA_FILES
        .check(file_name, 0)
        .or_else(|_| DOCUMENT_FILES.check(file_name, 0))
        .map_err(|_| ApiError::BadRequest(format!("unsupported file type: {file_name}")))
}

/// `POST /api/chat/start`
pub async fn chat_start(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatStartRequest>,
) -> Result<Json<ChatStartResponse>, ApiError> {
    auth.ensure(&req.user_id)?;
    let reply = state.backend()?.start_chat(&req.user_id, &req.project_id).await?;
    Ok(Json(ChatStartResponse { reply }))
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    auth.ensure(&req.user_id)?;
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message is empty".into()));
    }
    let response = state
        .backend()?
        .send_message(&req.user_id, &req.project_id, &req.message)
        .await?;
    Ok(Json(ChatMessageResponse { response }))
}

/// `POST /api/upload`: multipart `file`, `user_id`, optional `project_id`.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let backend = state.backend()?;

    let mut user_id = None;
    let mut project_id = None;
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("user_id") => user_id = Some(field_text(field).await?),
            Some("project_id") => {
                let value = field_text(field).await?;
                project_id = (!value.is_empty()).then_some(value);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, content_type, bytes));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| ApiError::BadRequest("missing user_id".into()))?;
    auth.ensure(&user_id)?;
    let (file_name, content_type, bytes) = file.ok_or_else(|| ApiError::BadRequest("missing file".into()))?;
    check_upload(&file_name, bytes.len())?;

    tracing::info!(%user_id, %file_name, size = bytes.len(), "forwarding upload");
    let file_id = backend
        .upload(FileUpload { user_id, project_id, file_name, content_type, bytes: bytes.to_vec() })
        .await?;
    Ok(Json(UploadResponse { file_id }))
}

/// `POST /api/generate`
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    auth.ensure(&req.user_id)?;
    if req.file_ids.is_empty() {
        return Err(ApiError::BadRequest("at least one uploaded file is required".into()));
    }
    let backend = state.backend()?;
    tracing::info!(project_id = %req.project_id, files = req.file_ids.len(), "generating");
    Ok(Json(backend.generate(&req).await?))
}

/// `GET /api/research?projectId=..&selectionId=..`
pub async fn research(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ResearchQuery>,
) -> Result<Json<ResearchResponse>, ApiError> {
    if query.project_id.trim().is_empty() {
        return Err(ApiError::BadRequest("projectId is required".into()));
    }
    let paper = state
        .backend()?
        .research(&query.project_id, query.selection_id)
        .await?;
    Ok(Json(ResearchResponse { paper }))
}

#[cfg(test)]
#[path = "research_test.rs"]
mod tests;
