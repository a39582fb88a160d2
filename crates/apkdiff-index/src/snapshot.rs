use std::path::{Path, PathBuf};

use apkdiff_types::PackageRecord;
use tracing::{debug, info};

use crate::archive::decode_archive;
use crate::container::{signature_name, split};
use crate::error::{IndexError, IndexResult};
use crate::stanza::parse;

/// File name of the index inside a repository directory.
pub const INDEX_FILE_NAME: &str = "APKINDEX.tar.gz";

/// One fully decoded index snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSnapshot {
    /// Package records in index order.
    pub records: Vec<PackageRecord>,
    /// Signing key file named by the leading signature stream.
    pub signature: Option<String>,
    /// Repository description from the `DESCRIPTION` entry.
    pub description: Option<String>,
}

impl IndexSnapshot {
    /// A snapshot with no packages.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a snapshot from the raw bytes of an `APKINDEX.tar.gz`.
    pub fn from_bytes(data: &[u8]) -> IndexResult<Self> {
        let (prefix, payload) = split(data);
        let signature = signature_name(prefix);
        let contents = decode_archive(payload)?;
        let records = parse(&contents.index)?;

        debug!(
            records = records.len(),
            signed = signature.is_some(),
            "decoded index snapshot"
        );
        Ok(Self {
            records,
            signature,
            description: contents.description,
        })
    }

    /// Read and decode the index at `path`.
    ///
    /// A directory is resolved to the `APKINDEX.tar.gz` inside it.
    pub fn load(path: &Path) -> IndexResult<Self> {
        let path = resolve_index_path(path);
        let data = std::fs::read(&path).map_err(|source| IndexError::Io {
            path: path.clone(),
            source,
        })?;
        let snapshot = Self::from_bytes(&data)?;
        info!(
            path = %path.display(),
            packages = snapshot.len(),
            description = snapshot.description.as_deref().unwrap_or("-"),
            signature = snapshot.signature.as_deref().unwrap_or("-"),
            "loaded index"
        );
        Ok(snapshot)
    }

    /// Number of package records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the snapshot holds no packages.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Map a directory to the index file inside it; other paths pass through.
pub fn resolve_index_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(INDEX_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    fn records() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("Q1aaa=", "alpine-base", 1_400, "3.18.4-r0"),
            PackageRecord::new("Q1bbb=", "busybox", 502_000, "1.36.1-r5"),
        ]
    }

    #[test]
    fn decodes_signed_index() {
        let data = fixture::apkindex(&records(), Some("v3.18.4-102-g5e1f6a0e9c"), true);
        let snap = IndexSnapshot::from_bytes(&data).unwrap();
        assert_eq!(snap.records, records());
        assert_eq!(snap.description.as_deref(), Some("v3.18.4-102-g5e1f6a0e9c"));
        assert!(snap.signature.as_deref().unwrap().starts_with(".SIGN.RSA."));
    }

    #[test]
    fn decodes_unsigned_index() {
        let data = fixture::apkindex(&records(), None, false);
        let snap = IndexSnapshot::from_bytes(&data).unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.signature, None);
        assert_eq!(snap.description, None);
    }

    #[test]
    fn loads_from_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data = fixture::apkindex(&records(), Some("edge"), true);
        let file = dir.path().join(INDEX_FILE_NAME);
        std::fs::write(&file, data).unwrap();

        let from_file = IndexSnapshot::load(&file).unwrap();
        let from_dir = IndexSnapshot::load(dir.path()).unwrap();
        assert_eq!(from_file, from_dir);
        assert_eq!(from_dir.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IndexSnapshot::load(&dir.path().join("nope.tar.gz")).unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
        assert!(err.to_string().contains("nope.tar.gz"));
    }

    #[test]
    fn empty_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IndexSnapshot::load(dir.path()).unwrap_err();
        match err {
            IndexError::Io { path, .. } => assert!(path.ends_with(INDEX_FILE_NAME)),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn bad_size_aborts_load() {
        let payload = fixture::gzip(&fixture::tar_archive(&[(
            "APKINDEX",
            b"P:a\nS:1\n\nP:b\nS:notanumber\n\n".as_slice(),
        )]));
        let err = IndexSnapshot::from_bytes(&payload).unwrap_err();
        assert!(matches!(err, IndexError::FieldFormat { .. }));
    }
}
