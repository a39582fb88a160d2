//! Builders for synthetic `APKINDEX.tar.gz` files.

use std::io::Write;
use std::path::{Path, PathBuf};

use apkdiff_types::PackageRecord;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::archive::{DESCRIPTION_ENTRY, INDEX_ENTRY};

/// Compress `data` into a single gzip member.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

/// Build a tar archive holding `entries` in order.
pub fn tar_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, *data)
            .expect("tar append");
    }
    builder.into_inner().expect("tar finish")
}

/// A gzip stream shaped like a detached index signature.
pub fn signature_stream(key_name: &str) -> Vec<u8> {
    let name = format!(".SIGN.RSA.{key_name}");
    gzip(&tar_archive(&[(name.as_str(), b"\x00signature-bytes".as_slice())]))
}

/// Render records as stanza text.
pub fn stanzas(records: &[PackageRecord]) -> String {
    records
        .iter()
        .map(|r| format!("C:{}\nP:{}\nV:{}\nS:{}\n\n", r.hash, r.name, r.version, r.size))
        .collect()
}

/// A complete index file, optionally signed and with a `DESCRIPTION` entry.
pub fn apkindex(records: &[PackageRecord], description: Option<&str>, signed: bool) -> Vec<u8> {
    let text = stanzas(records);
    let mut entries: Vec<(&str, &[u8])> = Vec::new();
    if let Some(desc) = description {
        entries.push((DESCRIPTION_ENTRY, desc.as_bytes()));
    }
    entries.push((INDEX_ENTRY, text.as_bytes()));

    let mut out = if signed {
        signature_stream("test@example.org-5d4a1b2c.rsa.pub")
    } else {
        Vec::new()
    };
    out.extend_from_slice(&gzip(&tar_archive(&entries)));
    out
}

/// Write an index file into `dir` and return its path.
pub fn write_index(dir: &Path, file_name: &str, records: &[PackageRecord]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, apkindex(records, Some("test-repo"), true)).expect("write index");
    path
}
