//! Profile picture route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::{self, ServerError};
use crate::state::AppState;

/// Handle `GET /profile-pic`.
///
/// 404 when no picture is configured, when it cannot be read, or when
/// its detected type is not an image.
pub(crate) async fn get_profile_pic(State(state): State<Arc<AppState>>) -> Response {
    match profile_impl(&state).await {
        Ok(response) => response,
        Err(err) => error::error_response(&state, &err),
    }
}

async fn profile_impl(state: &Arc<AppState>) -> Result<Response, ServerError> {
    let path = state
        .config
        .profile_image
        .as_ref()
        .ok_or_else(|| ServerError::NotFound("profile picture".to_owned()))?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ServerError::NotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|_| ServerError::NotFound(path.display().to_string()))?;

    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}
