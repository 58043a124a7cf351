//! RSS feed route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use quill_site::{build_channel, collect_items};

use crate::error::{self, ServerError};
use crate::state::AppState;

/// Handle `GET /rss.xml`.
pub(crate) async fn get_feed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    match feed_impl(&state, &headers) {
        Ok(response) => response,
        Err(err) => error::error_response(&state, &err),
    }
}

fn feed_impl(state: &Arc<AppState>, headers: &HeaderMap) -> Result<Response, ServerError> {
    let base_url = request_base_url(state, headers);
    let items = collect_items(&state.config.data_dir, &state.ignore, &base_url)?;
    let channel = build_channel(&state.config.site_name, &base_url, &items);

    let xml = format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>{channel}");
    Ok((
        [(
            header::CONTENT_TYPE,
            "application/rss+xml; charset=utf-8".to_owned(),
        )],
        xml,
    )
        .into_response())
}

/// Absolute base URL for feed links: the request Host when present,
/// otherwise the configured bind address.
fn request_base_url(state: &AppState, headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| state.fallback_base_url(), |host| format!("http://{host}"))
}
