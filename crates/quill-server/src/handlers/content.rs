//! Content route: rendered documents and raw image passthrough.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};
use quill_site::{FrontMatter, SiteError, build_tree, front_matter, is_content_path, render_tree_html};

use crate::chrome;
use crate::error::{self, ServerError};
use crate::handlers::{is_ajax, is_image_path, sanitize_path};
use crate::state::AppState;

/// Handle `GET /content/{*path}`.
pub(crate) async fn get_content(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    match content_impl(&path, &state, &headers).await {
        Ok(response) => response,
        Err(err) => error::error_response(&state, &err),
    }
}

async fn content_impl(
    raw: &str,
    state: &Arc<AppState>,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let rel = sanitize_path(raw).ok_or_else(|| ServerError::NotFound(raw.to_owned()))?;

    if is_image_path(&rel) {
        let full = state.config.data_dir.join(&rel);
        let bytes = tokio::fs::read(&full)
            .await
            .map_err(|e| SiteError::io(e, &full))?;
        let mime = mime_guess::from_path(&full).first_or_octet_stream();
        return Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response());
    }

    if !is_content_path(&rel) {
        return Err(ServerError::UnsupportedExtension(raw.to_owned()));
    }

    document_response(state, &rel, headers).await
}

/// Render a content document, as a bare fragment for AJAX requests or
/// wrapped in the full page shell otherwise. Shared with the index route.
pub(crate) async fn document_response(
    state: &Arc<AppState>,
    rel: &std::path::Path,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let full = state.config.data_dir.join(rel);
    let text = tokio::fs::read_to_string(&full)
        .await
        .map_err(|e| SiteError::io(e, &full))?;

    let (matter, body) = front_matter::split(&text);
    let date = front_matter::resolve_date(matter.date.as_deref(), &full)?;
    let matter = FrontMatter {
        date: Some(date),
        ..matter
    };

    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let article = state.renderer.render_document(body, &stem, &state.ignore);
    let fragment = format!("{}{article}", chrome::metadata_block(&matter).into_string());

    if is_ajax(headers) {
        return Ok(Html(fragment).into_response());
    }

    let nodes = build_tree(&state.config.data_dir, &state.ignore)?;
    let tree_html = render_tree_html(&nodes);
    let page = chrome::page(state, &tree_html, &fragment);
    Ok(Html(page.into_string()).into_response())
}
