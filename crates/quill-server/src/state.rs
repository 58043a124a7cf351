//! Application state.
//!
//! Shared, read-only state for all request handlers.

use quill_site::{IgnoreList, Renderer};

use crate::ServerConfig;

/// Application state shared across all handlers. Immutable after startup;
/// handlers hold it behind an `Arc`.
pub(crate) struct AppState {
    /// Server configuration.
    pub(crate) config: ServerConfig,
    /// Markdown renderer.
    pub(crate) renderer: Renderer,
    /// Ignore list derived from the configuration.
    pub(crate) ignore: IgnoreList,
}

impl AppState {
    pub(crate) fn new(config: ServerConfig) -> Self {
        let ignore = IgnoreList::new(&config.ignored_files);
        Self {
            config,
            renderer: Renderer::new(),
            ignore,
        }
    }

    /// Base URL for absolute links when a request carries no Host header.
    pub(crate) fn fallback_base_url(&self) -> String {
        format!("http://{}:{}", self.config.host, self.config.port)
    }
}
