//! Duplicate final paths.

use std::collections::HashMap;

/// What to do with a record whose path has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Write to this path (possibly `_N`-suffixed).
    Write(String),
    /// Path already taken and duplicate writing is off.
    Skip,
}

/// Tracks every final path handed out so far, in processing order.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    write_duplicates: bool,
    /// Claimed path → next `_N` suffix to try for it.
    claimed: HashMap<String, usize>,
}

impl DuplicateTracker {
    pub fn new(write_duplicates: bool) -> Self {
        Self {
            write_duplicates,
            claimed: HashMap::new(),
        }
    }

    /// First claim returns the path unchanged; later claims return the lowest
    /// `path_N` not yet handed out, or [`Assignment::Skip`] when duplicates are
    /// not written. Suffixed paths count as claimed too, so a record whose URL
    /// maps to `path_1` literally never lands on an earlier duplicate's file.
    pub fn assign(&mut self, path: String) -> Assignment {
        let Some(next) = self.claimed.get(&path).copied() else {
            self.claimed.insert(path.clone(), 1);
            return Assignment::Write(path);
        };
        if !self.write_duplicates {
            return Assignment::Skip;
        }

        let mut n = next;
        let numbered = loop {
            let candidate = format!("{}_{}", path, n);
            n += 1;
            if !self.claimed.contains_key(&candidate) {
                break candidate;
            }
        };
        self.claimed.insert(path, n);
        self.claimed.insert(numbered.clone(), 1);
        Assignment::Write(numbered)
    }
}
