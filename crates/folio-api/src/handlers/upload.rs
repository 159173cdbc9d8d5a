//! Image upload handler.
//!
//! Accepts a multipart file, runs it through the normalization pipeline, and
//! returns the storage key and retrieval URL. Writing the URL into a content
//! section is a separate, explicit save through the content handlers.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use folio_core::AppError;
use folio_processing::upload_image;

use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default = "default_destination")]
    destination: String,
}

fn default_destination() -> String {
    "uploads".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

#[tracing::instrument(skip(state, multipart), fields(destination = %query.destination))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") && field.file_name().is_none() {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file field: {}", e)))?;

        file = Some((file_name, content_type, data));
        break;
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::InvalidInput("Missing 'file' field".to_string()))?;

    if data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()).into());
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{} bytes exceeds max {} bytes",
            data.len(),
            state.config.max_upload_bytes
        ))
        .into());
    }

    let result = upload_image(
        state.normalizer.clone(),
        state.policy,
        state.storage.clone(),
        &query.destination,
        file_name,
        content_type,
        data.to_vec(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            key: result.storage_key,
            url: result.storage_url,
            file_name: result.file_name,
            content_type: result.content_type,
            size: result.size,
        }),
    ))
}
