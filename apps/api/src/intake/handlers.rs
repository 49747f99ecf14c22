//! Axum route handler for CV uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::intake::{extract_text, validate_upload};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: String,
    pub char_count: usize,
    pub cv_text: String,
}

/// POST /api/v1/uploads
///
/// Multipart CV intake. Validation (extension allow-list, size cap) happens
/// before extraction; no model call is involved at this stage.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Validation("file field must carry a filename".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        validate_upload(&file_name, bytes.len())?;

        let cv_text = extract_text(&file_name, &bytes)?;

        info!(
            "Accepted CV upload {file_name} ({} bytes, {} chars extracted)",
            bytes.len(),
            cv_text.chars().count()
        );

        return Ok(Json(UploadResponse {
            char_count: cv_text.chars().count(),
            file_name,
            cv_text,
        }));
    }

    Err(AppError::Validation(
        "multipart body must contain a 'file' field".to_string(),
    ))
}
