//! Diff engine for apkdiff.
//!
//! Classifies the package records of two index snapshots as added, removed
//! or common, and renders classified records as output lines.
//!
//! # Key Types
//!
//! - [`Policy`] / [`MatchPolicy`] -- Selectable matching strategies
//! - [`FullTuplePolicy`] -- Exact tuple matching (default, symmetric)
//! - [`NameKeyedPolicy`] -- Name-joined, hash-compared changed set
//! - [`Classification`] / [`Group`] -- Classified records
//! - [`MatchState`] -- Per-invocation matched flags
//! - [`ProjectedLine`] -- `(hash, size, path)` output triple

pub mod classification;
pub mod error;
pub mod full_tuple;
pub mod match_state;
pub mod name_keyed;
pub mod policy;
pub mod projection;

pub use classification::{Classification, Group};
pub use error::{DiffError, DiffResult};
pub use full_tuple::{diff, match_records};
pub use match_state::MatchState;
pub use name_keyed::merge;
pub use policy::{FullTuplePolicy, MatchPolicy, NameKeyedPolicy, Policy};
pub use projection::{project, ProjectedLine};
