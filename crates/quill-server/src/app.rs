//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::{self, ServerError};
use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index::get_index))
        .route("/content/{*path}", get(handlers::content::get_content))
        .route("/download/{*path}", get(handlers::download::get_download))
        .route("/profile-pic", get(handlers::profile::get_profile_pic))
        .route("/rss.xml", get(handlers::feed::get_feed))
        .route("/assets/style.css", get(stylesheet))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(content_type_options_layer())
                .layer(frame_options_layer()),
        )
        .with_state(state)
}

/// Embedded stylesheet - the one static asset the chrome needs.
async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("assets/style.css"),
    )
}

/// Unmatched routes go through the shared error pipeline.
async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    error::error_response(&state, &ServerError::NotFound(uri.path().to_owned()))
}

/// Create layer that adds the X-Content-Type-Options header.
fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    )
}

/// Create layer that adds the X-Frame-Options header.
fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"))
}
