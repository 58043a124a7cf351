//! Front-matter parsing and date resolution.
//!
//! Documents may begin with a delimited metadata header: a `---` line, a
//! YAML body, and a closing `---` line. The header is decoded into the
//! recognized field set with serde; unknown keys are ignored. A malformed
//! header never fails a request - metadata comes back empty and the body
//! after the delimiters still renders.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SiteError;

/// Recognized front-matter fields. All optional; unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Display title, overriding the filename-derived one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Publish date, `YYYY-MM-DD`. Drives sort order and the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Short description used by the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FrontMatter {
    /// Check whether any recognized field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

/// Split a document into front matter and body.
///
/// Returns the parsed header and the text after the closing delimiter.
/// When no header block is present the whole input is the body. Malformed
/// YAML inside the delimiters is logged and treated as an empty header;
/// the body still renders.
#[must_use]
pub fn split(text: &str) -> (FrontMatter, &str) {
    let Some((header, body)) = split_header(text) else {
        return (FrontMatter::default(), text);
    };

    match serde_yaml::from_str::<FrontMatter>(header) {
        Ok(matter) => (matter, body),
        Err(err) => {
            tracing::warn!(error = %err, "Malformed front matter, ignoring header");
            (FrontMatter::default(), body)
        }
    }
}

/// Locate the delimited header. Returns `(header, body)` when the text
/// starts with a `---` line and a later `---` line closes it.
fn split_header(text: &str) -> Option<(&str, &str)> {
    let rest = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))?;

    for (pos, _) in rest.match_indices("\n---") {
        let header = rest[..pos].trim_end_matches('\r');
        let after = &rest[pos + "\n---".len()..];
        if after.is_empty() {
            return Some((header, ""));
        }
        if let Some(body) = after.strip_prefix("\r\n").or_else(|| after.strip_prefix('\n')) {
            return Some((header, body));
        }
        // A line merely starting with "---" (e.g. "----") is not a
        // delimiter; keep scanning.
    }
    None
}

/// Resolve a document's display and sort date.
///
/// An explicit front-matter date wins; otherwise the file's last-modified
/// time is formatted as an ISO calendar date (`YYYY-MM-DD`, UTC) from a
/// single stat call.
///
/// # Errors
///
/// Returns [`SiteError`] if the stat call fails. The date drives sort
/// order, so a vanished file must surface instead of defaulting.
pub fn resolve_date(explicit: Option<&str>, path: &Path) -> Result<String, SiteError> {
    if let Some(date) = explicit {
        return Ok(date.to_owned());
    }

    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| SiteError::io(e, path))?;
    let modified: DateTime<Utc> = modified.into();
    Ok(modified.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_extracts_recognized_fields() {
        let text = "---\ntitle: Hello\nauthor: Jo\ndate: 2024-03-01\ndescription: First post\n---\nBody text.\n";

        let (matter, body) = split(text);

        assert_eq!(matter.title.as_deref(), Some("Hello"));
        assert_eq!(matter.author.as_deref(), Some("Jo"));
        assert_eq!(matter.date.as_deref(), Some("2024-03-01"));
        assert_eq!(matter.description.as_deref(), Some("First post"));
        assert_eq!(body, "Body text.\n");
    }

    #[test]
    fn test_split_without_header_returns_whole_body() {
        let text = "Just some text.\n\n---\n\nA thematic break, not front matter.";

        let (matter, body) = split(text);

        assert!(matter.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_ignores_unknown_keys() {
        let text = "---\ntitle: Hi\nlayout: wide\n---\nBody";

        let (matter, body) = split(text);

        assert_eq!(matter.title.as_deref(), Some("Hi"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_malformed_yaml_keeps_body() {
        let text = "---\ntitle: [unclosed\n---\nBody survives.";

        let (matter, body) = split(text);

        assert!(matter.is_empty());
        assert_eq!(body, "Body survives.");
    }

    #[test]
    fn test_split_unclosed_header_is_body() {
        let text = "---\ntitle: Never closed\n\nBody?";

        let (matter, body) = split(text);

        assert!(matter.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_header_at_end_of_input() {
        let text = "---\ntitle: Only header\n---";

        let (matter, body) = split(text);

        assert_eq!(matter.title.as_deref(), Some("Only header"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_round_trip_preserves_field_set() {
        let text = "---\ntitle: Hello\ndate: 2024-03-01\n---\nBody";
        let (matter, _) = split(text);

        let yaml = serde_yaml::to_string(&matter).unwrap();
        let reparsed: FrontMatter = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(matter, reparsed);
    }

    #[test]
    fn test_resolve_date_prefers_explicit() {
        let date = resolve_date(Some("2023-12-31"), Path::new("/nonexistent")).unwrap();

        assert_eq!(date, "2023-12-31");
    }

    #[test]
    fn test_resolve_date_falls_back_to_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "content").unwrap();

        let modified: DateTime<Utc> = fs::metadata(&path).unwrap().modified().unwrap().into();
        let expected = modified.format("%Y-%m-%d").to_string();

        assert_eq!(resolve_date(None, &path).unwrap(), expected);
    }

    #[test]
    fn test_resolve_date_missing_file_propagates() {
        let err = resolve_date(None, Path::new("/nonexistent/post.md")).unwrap_err();

        assert!(err.is_not_found());
    }
}
