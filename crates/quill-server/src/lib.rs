//! HTTP server for the quill blog engine.
//!
//! Serves a directory tree of Markdown and plain-text documents as a
//! small personal blog:
//!
//! - `GET /` - the landing document (`index.md`, or the first eligible file)
//! - `GET /content/{path}` - rendered document, or raw image passthrough;
//!   AJAX requests receive only the content fragment
//! - `GET /download/{path}` - raw file as an attachment
//! - `GET /profile-pic` - the configured profile picture
//! - `GET /rss.xml` - RSS 2.0 feed over the whole content tree
//! - `GET /assets/style.css` - the embedded stylesheet
//! - anything else - a 404 page through the shared error pipeline
//!
//! There is no caching layer: the navigation tree is rebuilt from the
//! filesystem on every request that needs it. Configuration is parsed
//! once at startup into [`ServerConfig`] and is immutable afterwards;
//! handlers share it through the application state behind an `Arc`.

mod app;
mod chrome;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;

use state::AppState;

/// A sidebar social link: icon class plus target URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocialLink {
    /// Icon class rendered inside the link (e.g. `fa-github`).
    pub icon: String,
    /// Link target URL.
    pub url: String,
}

/// Server configuration, immutable once the listener starts.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content root directory.
    pub data_dir: PathBuf,
    /// Display name shown in the sidebar, page title, and feed.
    pub site_name: String,
    /// Profile picture path (`None` disables `/profile-pic`).
    pub profile_image: Option<PathBuf>,
    /// Ordered sidebar social links.
    pub social_links: Vec<SocialLink>,
    /// Source repository URL linked from the sidebar footer.
    pub source_repo: Option<String>,
    /// File stems excluded from listings and auto-titling
    /// (case-insensitive, matched without extension).
    pub ignored_files: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            data_dir: PathBuf::from("contents"),
            site_name: "quill".to_owned(),
            profile_image: None,
            social_links: Vec::new(),
            source_repo: None,
            ignored_files: Vec::new(),
        }
    }
}

/// Build the application router for a configuration.
///
/// Exposed so the server can be embedded or driven in tests without
/// binding a socket.
#[must_use]
pub fn build_router(config: ServerConfig) -> Router {
    app::create_router(Arc::new(AppState::new(config)))
}

/// Run the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the bind address is invalid or the listener
/// fails to start. Per-request failures never end up here; they are
/// turned into error pages by the handlers.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let app = build_router(config);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
