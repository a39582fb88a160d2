use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("archive has no {0} entry")]
    MissingEntry(&'static str),

    #[error("invalid size on line {line}: {value:?}")]
    FieldFormat { line: usize, value: String },

    #[error("failed to read index text: {0}")]
    Stream(#[source] std::io::Error),
}

impl IndexError {
    /// Returns `true` for failures in the gzip or tar layers.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::MissingEntry(_))
    }
}

pub type IndexResult<T> = Result<T, IndexError>;
