//! Decoding the gzip-compressed tar payload of an index.

use std::io::Read;

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::error::{IndexError, IndexResult};

/// Name of the archive entry holding the stanza text.
pub const INDEX_ENTRY: &str = "APKINDEX";

/// Name of the optional entry that precedes the index.
pub const DESCRIPTION_ENTRY: &str = "DESCRIPTION";

/// The decoded contents of an index payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveContents {
    /// Raw stanza text of the index entry.
    pub index: Vec<u8>,
    /// Repository description, when the skipped leading entry was `DESCRIPTION`.
    pub description: Option<String>,
}

/// Decompress `payload` and return the raw index text.
pub fn decode(payload: &[u8]) -> IndexResult<Vec<u8>> {
    decode_archive(payload).map(|contents| contents.index)
}

/// Decompress `payload` and read its index entry.
///
/// The first entry is used when it is named `APKINDEX`. Otherwise exactly one
/// leading entry is skipped and the second entry is used, whatever its name.
pub fn decode_archive(payload: &[u8]) -> IndexResult<ArchiveContents> {
    let tarball = gunzip(payload)?;
    debug!(compressed = payload.len(), decompressed = tarball.len(), "inflated index payload");

    let mut archive = tar::Archive::new(tarball.as_slice());
    let mut entries = archive.entries().map_err(tar_error)?;

    let mut first = entries
        .next()
        .ok_or(IndexError::MissingEntry(INDEX_ENTRY))?
        .map_err(tar_error)?;
    let first_name = entry_name(&first)?;

    if first_name == INDEX_ENTRY {
        let index = read_entry(&mut first)?;
        return Ok(ArchiveContents { index, description: None });
    }

    let description = if first_name == DESCRIPTION_ENTRY {
        let text = read_entry(&mut first)?;
        Some(String::from_utf8_lossy(&text).trim_end().to_string())
    } else {
        warn!(entry = %first_name, "skipping unexpected leading archive entry");
        None
    };
    drop(first);

    let mut second = entries
        .next()
        .ok_or(IndexError::MissingEntry(INDEX_ENTRY))?
        .map_err(tar_error)?;
    let second_name = entry_name(&second)?;
    if second_name != INDEX_ENTRY {
        debug!(entry = %second_name, "using second archive entry as index");
    }
    let index = read_entry(&mut second)?;

    Ok(ArchiveContents { index, description })
}

fn gunzip(payload: &[u8]) -> IndexResult<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(payload)
        .read_to_end(&mut out)
        .map_err(|e| IndexError::Decode(format!("gzip: {e}")))?;
    Ok(out)
}

fn entry_name<R: Read>(entry: &tar::Entry<'_, R>) -> IndexResult<String> {
    let path = entry.path().map_err(tar_error)?;
    Ok(path.to_string_lossy().into_owned())
}

fn read_entry<R: Read>(entry: &mut tar::Entry<'_, R>) -> IndexResult<Vec<u8>> {
    let mut data = Vec::new();
    entry.read_to_end(&mut data).map_err(tar_error)?;
    Ok(data)
}

fn tar_error(e: std::io::Error) -> IndexError {
    IndexError::Decode(format!("tar: {e}"))
}
