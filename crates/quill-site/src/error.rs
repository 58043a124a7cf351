//! Error type for content loading and tree building.

use std::path::PathBuf;

/// Error produced while reading or classifying content.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The requested file or directory does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O failure while reading content or metadata.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation failed on.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    /// Wrap an I/O error with path context, mapping missing files to
    /// [`SiteError::NotFound`].
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// True for errors caused by a missing file or directory.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_missing_file_to_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SiteError::io(io_err, "/content/missing.md");

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: /content/missing.md");
    }

    #[test]
    fn test_io_keeps_other_kinds() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SiteError::io(io_err, "/content/locked.md");

        assert!(!err.is_not_found());
        assert!(err.to_string().contains("/content/locked.md"));
    }
}
