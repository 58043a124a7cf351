//! Download route: raw files as attachments.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use quill_site::{SiteError, is_content_path};

use crate::error::{self, ServerError};
use crate::handlers::{is_image_path, sanitize_path};
use crate::state::AppState;

/// Handle `GET /download/{*path}`.
pub(crate) async fn get_download(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match download_impl(&path, &state).await {
        Ok(response) => response,
        Err(err) => error::error_response(&state, &err),
    }
}

async fn download_impl(raw: &str, state: &Arc<AppState>) -> Result<Response, ServerError> {
    let rel = sanitize_path(raw).ok_or_else(|| ServerError::NotFound(raw.to_owned()))?;

    if !is_content_path(&rel) && !is_image_path(&rel) {
        return Err(ServerError::UnsupportedExtension(raw.to_owned()));
    }

    let full = state.config.data_dir.join(&rel);
    let bytes = tokio::fs::read(&full)
        .await
        .map_err(|e| SiteError::io(e, &full))?;

    let filename = rel
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_owned());
    let mime = mime_guess::from_path(&full).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
