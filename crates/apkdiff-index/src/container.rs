//! Splitting a signed `APKINDEX.tar.gz` into its gzip members.
//!
//! A signed index is a detached-signature gzip stream followed directly by
//! the gzip stream that carries the index archive. Single-member gzip readers
//! stop after the first stream, so the payload is located by scanning for the
//! header the index builder writes (no flags, zero mtime).

use std::io::Read;

use flate2::read::GzDecoder;
use tracing::debug;

/// Gzip member header with no flags, zero mtime, and no extra flags.
pub const GZIP_MEMBER_MARKER: [u8; 8] = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Split `data` at the first gzip member marker after offset 0.
///
/// Returns `(prefix, remainder)`. Without a second marker the prefix is empty
/// and the whole input is the remainder.
pub fn split(data: &[u8]) -> (&[u8], &[u8]) {
    match find_payload_offset(data) {
        Some(pos) => {
            debug!(offset = pos, total = data.len(), "found payload gzip member");
            data.split_at(pos)
        }
        None => {
            debug!(total = data.len(), "no second gzip member; treating input as payload");
            (&[], data)
        }
    }
}

fn find_payload_offset(data: &[u8]) -> Option<usize> {
    data.get(1..)?
        .windows(GZIP_MEMBER_MARKER.len())
        .position(|w| w == GZIP_MEMBER_MARKER)
        .map(|p| p + 1)
}

/// Name of the first archive entry in the signature stream, if it decodes.
///
/// For Alpine indexes this is the signing key file, e.g.
/// `.SIGN.RSA.alpine-devel@lists.alpinelinux.org-6165ee59.rsa.pub`.
/// The signature is never verified; decode failures yield `None`.
pub fn signature_name(prefix: &[u8]) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    match first_entry_name(GzDecoder::new(prefix)) {
        Ok(name) => name,
        Err(e) => {
            debug!(error = %e, "could not decode signature stream");
            None
        }
    }
}

fn first_entry_name<R: Read>(reader: R) -> std::io::Result<Option<String>> {
    let mut archive = tar::Archive::new(reader);
    let mut entries = archive.entries()?;
    match entries.next() {
        Some(entry) => {
            let entry = entry?;
            let name = entry.path()?.to_string_lossy().into_owned();
            Ok(Some(name))
        }
        None => Ok(None),
    }
}
