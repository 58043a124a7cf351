//! Error types and the error-to-page pipeline.
//!
//! Every handler failure funnels through [`error_response`]: logged
//! server-side, then rendered as a Markdown message page wearing the
//! shared chrome. The process never exits on a per-request error.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use quill_site::{SiteError, build_tree, render_tree_html};

use crate::chrome;
use crate::state::AppState;

/// Handler error, mapped to a status code and a user-facing page.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Missing file or unmatched route.
    #[error("not found: {0}")]
    NotFound(String),

    /// Extension outside the supported set on an explicit content or
    /// download route.
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// Failure from the content pipeline.
    #[error(transparent)]
    Site(#[from] SiteError),

    /// I/O error outside the content pipeline.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Site(SiteError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::UnsupportedExtension(_) => StatusCode::BAD_REQUEST,
            Self::Site(SiteError::Io { .. }) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing Markdown message rendered inside the page chrome.
    pub(crate) fn user_message(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => {
                "**Not Found**\n\nThe page you are looking for does not exist."
            }
            StatusCode::BAD_REQUEST => "**Unsupported**\n\nThis file type cannot be served here.",
            _ => "**Oops!**\n\nWe encountered an issue. Please try again later.",
        }
    }
}

/// Convert a handler error into the shared error page.
///
/// The page keeps the navigation chrome; when the tree walk itself is
/// what failed, it degrades to a tree-less shell instead of failing the
/// error path too.
pub(crate) fn error_response(state: &AppState, err: &ServerError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::warn!(error = %err, "Request rejected");
    }

    let fragment = state.renderer.render(err.user_message());
    let tree_html = build_tree(&state.config.data_dir, &state.ignore)
        .map(|nodes| render_tree_html(&nodes))
        .unwrap_or_default();
    let page = chrome::page(state, &tree_html, &fragment);

    (status, Html(page.into_string())).into_response()
}
