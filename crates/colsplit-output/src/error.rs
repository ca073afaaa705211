use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no columns selected")]
    NoSelection,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to overwrite existing file {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("refusing to replace the input file {}", .0.display())]
    ReplacesSource(PathBuf),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

impl OutputError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Warnings are user-recoverable conditions, as opposed to failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoSelection | Self::Clipboard(_))
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
