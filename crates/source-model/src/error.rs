use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse failure from a converter; the message carries the line
    /// context reported by the underlying parser.
    #[error("Cannot parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl ModelError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
