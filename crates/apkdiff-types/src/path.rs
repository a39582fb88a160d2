//! Repository-relative package paths.
//!
//! Paths always use `/` separators regardless of the host platform since
//! they name locations on a mirror, not on the local filesystem.

use crate::record::PackageRecord;

/// Join a repository prefix and a file name into a cleaned `/`-separated path.
///
/// Empty and `.` segments are dropped and `..` removes the preceding segment.
/// An absolute prefix stays absolute; an empty prefix yields the bare file name.
pub fn join_repo_path(prefix: &str, file: &str) -> String {
    let absolute = prefix.starts_with('/') || (prefix.is_empty() && file.starts_with('/'));
    let mut parts: Vec<&str> = Vec::new();

    for segment in prefix.split('/').chain(file.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// The repository-relative path of a package artifact:
/// `<prefix>/<name>-<version>.apk`.
pub fn package_path(prefix: &str, record: &PackageRecord) -> String {
    join_repo_path(prefix, &record.file_name())
}
