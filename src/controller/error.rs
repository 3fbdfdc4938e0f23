use std::path::{Path, PathBuf};

use thiserror::Error;

/// A whole-file read or write that failed.
///
/// Carries the OS error text rather than the `io::Error` itself so the
/// value can be cloned into UI messages and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("{reason}, open '{}'", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("{reason}, write '{}'", .path.display())]
    Write { path: PathBuf, reason: String },
}

impl FileError {
    pub fn read(path: &Path, err: &std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn write(path: &Path, err: &std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// Text shown to the user in the alert box.
    pub fn alert_text(&self) -> String {
        format!("error : {self}")
    }
}
