//! Index route: the landing document.
//!
//! `index.md` at the content root wins; without one, the
//! lexicographically first eligible root file is rendered instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use quill_site::{IgnoreList, SiteError, is_content_path};

use crate::error::{self, ServerError};
use crate::handlers::content::document_response;
use crate::state::AppState;

/// Handle `GET /`.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    match index_impl(&state, &headers).await {
        Ok(response) => response,
        Err(err) => error::error_response(&state, &err),
    }
}

async fn index_impl(state: &Arc<AppState>, headers: &HeaderMap) -> Result<Response, ServerError> {
    let rel = resolve_index(&state.config.data_dir, &state.ignore)?;
    document_response(state, &rel, headers).await
}

/// Pick the landing document for the content root.
fn resolve_index(root: &Path, ignore: &IgnoreList) -> Result<PathBuf, ServerError> {
    if root.join("index.md").is_file() {
        return Ok(PathBuf::from("index.md"));
    }

    let entries = fs::read_dir(root).map_err(|e| SiteError::io(e, root))?;
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .filter(|name| {
            let path = Path::new(name);
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            is_content_path(path) && !ignore.contains(&stem)
        })
        .collect();
    names.sort();

    names
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| ServerError::NotFound("/".to_owned()))
}
