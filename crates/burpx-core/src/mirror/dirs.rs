//! Ancestor directories and the global directory set.

use std::collections::HashSet;
use url::Url;

use super::path::candidate_path;
use crate::export::Record;

/// Name given to a file whose path is also needed as a directory.
pub const INDEX_NAME: &str = "index";

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Ancestors of a path, innermost first, excluding the path itself, `/` and `.`.
///
/// Cheap to clone; a clone restarts from wherever the original was.
#[derive(Debug, Clone)]
pub struct ParentDirs<'a> {
    next: Option<&'a str>,
}

pub fn parent_dirs(path: &str) -> ParentDirs<'_> {
    ParentDirs {
        next: Some(parent_of(path)),
    }
}

impl<'a> Iterator for ParentDirs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let dir = self.next.take()?;
        if dir.is_empty() || dir == "." || dir == "/" {
            return None;
        }
        let up = parent_of(dir);
        if up != dir {
            self.next = Some(up);
        }
        Some(dir)
    }
}

/// Every path that some record needs to exist as a directory.
///
/// Built once from the full record list before any path is resolved, then
/// only read.
#[derive(Debug, Clone, Default)]
pub struct DirectorySet {
    dirs: HashSet<String>,
}

impl DirectorySet {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dirs = HashSet::new();
        for path in paths {
            dirs.extend(parent_dirs(path.as_ref()).map(str::to_string));
        }
        Self { dirs }
    }

    /// Directory set of all records whose URL parses; others are ignored here
    /// and reported when they are processed.
    pub fn from_records(records: &[Record]) -> Self {
        let paths = records.iter().filter_map(|record| match Url::parse(&record.url) {
            Ok(url) => Some(candidate_path(&url)),
            Err(err) => {
                tracing::debug!(url = %record.url, error = %err, "not a URL, no directories implied");
                None
            }
        });
        let set = Self::from_paths(paths);
        tracing::debug!(dirs = set.len(), "directory set built");
        set
    }

    pub fn contains(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// `path/index` when `path` is needed as a directory, else `path`.
    pub fn resolve_collision(&self, path: String) -> String {
        if self.contains(&path) {
            format!("{}/{}", path, INDEX_NAME)
        } else {
            path
        }
    }
}
