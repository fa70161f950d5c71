use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for dist-guard library operations.
pub type GuardResult<T> = Result<T, GuardError>;

/// Typed errors for the library.
/// The binary wraps these in `anyhow` at the top level,
/// but the guard modules stay precise about which path failed.
#[derive(Error, Debug)]
pub enum GuardError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be serialized
    #[error("Failed to serialize manifest for '{}': {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl GuardError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        GuardError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            GuardError::Io { path, .. }
            | GuardError::Serialize { path, .. }
            | GuardError::Config { path, .. } => path,
        }
    }
}

/// Attach a path to `std::io::Result` values, like `anyhow::Context` does for messages.
pub trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> GuardResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> GuardResult<T> {
        self.map_err(|e| GuardError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = GuardError::io(
            Path::new("/tmp/dist/a.js"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/dist/a.js"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_at_path_maps_error() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.at_path(Path::new("/missing")).unwrap_err();
        assert_eq!(err.path(), Path::new("/missing"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
