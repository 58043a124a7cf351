//! Small string and path helpers shared across the crate.

use std::path::Path;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters percent-encoded inside href path segments. Slashes stay
/// literal so nested paths keep their structure.
const HREF_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Escape text for inclusion in HTML content or attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Percent-encode a forward-slash relative path for use in an href.
pub(crate) fn encode_href_path(path: &str) -> String {
    utf8_percent_encode(path, HREF_PATH).to_string()
}

/// Humanize a file stem for display: `-` and `_` become spaces and each
/// word is capitalized.
///
/// Examples: `"my-first-post"` -> `"My First Post"`, `"notes_2024"` ->
/// `"Notes 2024"`.
#[must_use]
pub fn display_title(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word, leaving the rest unchanged.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Compute a path relative to `root`, forward-slash separated regardless
/// of host path conventions.
pub(crate) fn relative_url_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
