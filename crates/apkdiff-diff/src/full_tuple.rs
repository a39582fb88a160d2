//! Full-tuple matching: records match only when hash, name, size and
//! version are all equal.
//!
//! Matching is greedy and one-to-one. Each new record, in order, binds the
//! first still-unmatched old record with an equal tuple. A hash index from
//! tuple to the queue of unmatched old positions yields the same pairs as a
//! linear first-fit scan in O(n + m).

use std::collections::{HashMap, VecDeque};

use apkdiff_types::{PackageRecord, RecordKey};
use tracing::debug;

use crate::classification::Classification;
use crate::match_state::MatchState;

/// Pair up equal records of `old` and `new`.
pub fn match_records(old: &[PackageRecord], new: &[PackageRecord]) -> MatchState {
    let mut state = MatchState::new(old.len(), new.len());

    let mut unmatched: HashMap<RecordKey<'_>, VecDeque<usize>> = HashMap::with_capacity(old.len());
    for (i, rec) in old.iter().enumerate() {
        unmatched.entry(rec.key()).or_default().push_back(i);
    }

    for (j, rec) in new.iter().enumerate() {
        if let Some(i) = unmatched.get_mut(&rec.key()).and_then(VecDeque::pop_front) {
            state.bind(i, j);
        }
    }

    state
}

/// Classify `old` and `new` into added-only, removed-only and common records.
pub fn diff(old: &[PackageRecord], new: &[PackageRecord]) -> Classification {
    let state = match_records(old, new);

    let mut result = Classification::new();
    for (j, rec) in new.iter().enumerate() {
        if state.is_new_matched(j) {
            result.common.push(rec.clone());
        } else {
            result.added.push(rec.clone());
        }
    }
    for (i, rec) in old.iter().enumerate() {
        if !state.is_old_matched(i) {
            result.removed.push(rec.clone());
        }
    }

    debug!(
        old = old.len(),
        new = new.len(),
        added = result.additions(),
        removed = result.removals(),
        common = result.unchanged(),
        "full-tuple diff complete"
    );
    result
}
