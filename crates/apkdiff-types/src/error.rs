use thiserror::Error;

/// Errors produced by record operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid package size: {0:?}")]
    InvalidSize(String),
}
