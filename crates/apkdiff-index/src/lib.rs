//! APKINDEX decoding for apkdiff.
//!
//! Turns the raw bytes of an `APKINDEX.tar.gz` into package records.
//!
//! # Architecture
//!
//! - **Container splitting** ([`container`]): separates the detached signature
//!   gzip member from the payload member by scanning for the member header
//! - **Archive decoding** ([`archive`]): inflates the payload and selects the
//!   `APKINDEX` tar entry, skipping one optional leading entry
//! - **Stanza parsing** ([`stanza`]): lazily turns blank-line separated
//!   `<tag>:<value>` blocks into [`PackageRecord`](apkdiff_types::PackageRecord)s
//! - **Snapshots** ([`snapshot`]): file loading and the decoded result

pub mod archive;
pub mod container;
pub mod error;
pub mod snapshot;
pub mod stanza;

#[cfg(any(test, feature = "test"))]
pub mod fixture;

pub use archive::{decode, decode_archive, ArchiveContents, DESCRIPTION_ENTRY, INDEX_ENTRY};
pub use container::{signature_name, split, GZIP_MEMBER_MARKER};
pub use error::{IndexError, IndexResult};
pub use snapshot::{resolve_index_path, IndexSnapshot, INDEX_FILE_NAME};
pub use stanza::{parse, StanzaReader};
