//! Error types for the diff crate.

/// Errors that can occur when configuring a diff.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// The policy name is not one of `full-tuple` or `name-keyed`.
    #[error("unknown matching policy: {0:?} (expected full-tuple or name-keyed)")]
    UnknownPolicy(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
