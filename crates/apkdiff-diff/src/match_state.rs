/// Matched/unmatched flags for one diff invocation, aligned by position to
/// the old and new collections.
///
/// Every position starts unmatched and is bound at most once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    old: Vec<bool>,
    new: Vec<bool>,
}

impl MatchState {
    /// All positions unmatched.
    pub fn new(old_len: usize, new_len: usize) -> Self {
        Self {
            old: vec![false; old_len],
            new: vec![false; new_len],
        }
    }

    /// Bind old position `old_idx` to new position `new_idx`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either position is already matched.
    pub fn bind(&mut self, old_idx: usize, new_idx: usize) {
        debug_assert!(!self.old[old_idx], "old position {old_idx} bound twice");
        debug_assert!(!self.new[new_idx], "new position {new_idx} bound twice");
        self.old[old_idx] = true;
        self.new[new_idx] = true;
    }

    pub fn is_old_matched(&self, idx: usize) -> bool {
        self.old[idx]
    }

    pub fn is_new_matched(&self, idx: usize) -> bool {
        self.new[idx]
    }

    /// Number of bound pairs.
    pub fn matched(&self) -> usize {
        self.new.iter().filter(|m| **m).count()
    }
}
