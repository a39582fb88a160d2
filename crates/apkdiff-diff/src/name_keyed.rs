//! Name-keyed merging: packages are joined by name and compared by hash.
//!
//! The merged map holds the packages that are new or whose content hash
//! changed. There is no removal group: a package that exists only in the old
//! snapshot is never cancelled, so it stays in the map with its old record
//! and looks like any other change. Within one snapshot the last record for a
//! name wins.

use std::collections::BTreeMap;

use apkdiff_types::PackageRecord;
use tracing::debug;

/// Merge `old` then `new` by package name, keeping only changed packages.
///
/// Every old record is inserted by name. Each new record then cancels an
/// entry with the same name and hash, or else inserts/overwrites its name.
pub fn merge(old: &[PackageRecord], new: &[PackageRecord]) -> BTreeMap<String, PackageRecord> {
    let mut merged: BTreeMap<String, PackageRecord> = BTreeMap::new();

    for rec in old {
        merged.insert(rec.name.clone(), rec.clone());
    }

    let mut cancelled = 0usize;
    for rec in new {
        let unchanged = merged
            .get(&rec.name)
            .is_some_and(|existing| existing.hash == rec.hash);
        if unchanged {
            merged.remove(&rec.name);
            cancelled += 1;
        } else {
            merged.insert(rec.name.clone(), rec.clone());
        }
    }

    debug!(
        old = old.len(),
        new = new.len(),
        unchanged = cancelled,
        changed = merged.len(),
        "name-keyed merge complete"
    );
    merged
}
