use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a merge run. Input that matches neither ban list shape is
/// not an error; it simply yields no entries.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no input files given")]
    Usage,

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error encoding ban list file: {0}")]
    Encode(#[from] serde_json::Error),
}

impl MergeError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MergeError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
