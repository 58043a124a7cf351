//! HTTP request handlers.

pub(crate) mod content;
pub(crate) mod download;
pub(crate) mod feed;
pub(crate) mod index;
pub(crate) mod profile;

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use axum::http::HeaderMap;

/// Extensions served raw (with a detected MIME type) through the content
/// route, and accepted by the download route alongside content files.
pub(crate) const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Check the AJAX marker header (`X-Requested-With: XMLHttpRequest`).
pub(crate) fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .is_some_and(|value| value.as_bytes().eq_ignore_ascii_case(b"xmlhttprequest"))
}

/// Normalize a wildcard request path into a safe relative path.
///
/// Rejects absolute paths, `..` components, and Windows prefixes so a
/// request can never escape the content root. Returns `None` for paths
/// that normalize to nothing.
pub(crate) fn sanitize_path(raw: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Check whether a path carries one of the raw-served image extensions.
pub(crate) fn is_image_path(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str).is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}
