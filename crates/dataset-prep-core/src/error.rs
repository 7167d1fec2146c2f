use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode failed for '{path}': {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("ratios must sum to 1.0 (got {0})")]
    InvalidRatio(f64),

    #[error("no eligible files found")]
    EmptyInput,

    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
