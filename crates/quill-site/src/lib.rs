//! Core content pipeline for the quill blog engine.
//!
//! Turns a directory tree of Markdown and plain-text files into the pieces
//! the HTTP layer serves:
//!
//! - [`front_matter`] - delimited YAML header parsing and date resolution
//! - [`render`] - Markdown to HTML with syntax highlighting and title injection
//! - [`tree`] - the navigation tree (walk, prune, sort, render)
//! - [`feed`] - flat syndication items for the RSS feed
//!
//! The crate has no web-framework dependency; everything operates on paths
//! and strings so the pipeline stays testable in isolation. The navigation
//! tree and feed are rebuilt from the filesystem on every call - there is no
//! cache, by design: for the small content trees this engine targets, a
//! fresh walk per request is the correctness baseline.

mod error;
pub mod feed;
pub mod front_matter;
pub mod render;
pub mod tree;
mod util;

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

pub use error::SiteError;
pub use feed::{FeedItem, build_channel, collect_items};
pub use front_matter::FrontMatter;
pub use render::Renderer;
pub use tree::{NodeKind, TreeNode, build_tree, render_tree_html};
pub use util::display_title;

/// File extensions recognized as renderable content.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "txt"];

/// Check whether a path carries a recognized content extension
/// (case-insensitive).
#[must_use]
pub fn is_content_path(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            CONTENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Case-insensitive set of file stems excluded from listings and from
/// automatic title injection.
#[derive(Clone, Debug, Default)]
pub struct IgnoreList(HashSet<String>);

impl IgnoreList {
    /// Build an ignore list from file stems. Stems are matched without
    /// their extension, case-insensitively.
    pub fn new<I, S>(stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            stems
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Check whether a file stem is ignored.
    #[must_use]
    pub fn contains(&self, stem: &str) -> bool {
        self.0.contains(&stem.to_lowercase())
    }
}
