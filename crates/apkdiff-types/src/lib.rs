//! Foundation types for apkdiff.
//!
//! This crate provides the package record model shared by the index decoder
//! and the diff engine. Every other apkdiff crate depends on `apkdiff-types`.
//!
//! # Key Types
//!
//! - [`PackageRecord`] -- One package's metadata entry from an `APKINDEX`
//! - [`RecordKey`] -- Borrowed `(hash, name, size, version)` tuple used for matching
//! - [`FieldTag`] -- The single-letter stanza tags understood by the decoder
//! - [`package_path`] -- Repository-relative `.apk` path construction

pub mod error;
pub mod path;
pub mod record;

pub use error::TypeError;
pub use path::{join_repo_path, package_path};
pub use record::{FieldTag, PackageRecord, RecordKey};
