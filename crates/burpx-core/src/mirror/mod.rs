//! URL → on-disk path mapping for the mirrored site tree.
//!
//! A record's final path is built in a fixed order:
//!
//! 1. [`candidate_path`]: `/host/path` from the URL alone.
//! 2. [`DirectorySet::resolve_collision`]: `…/index` if another record needs
//!    the path as a directory.
//! 3. [`DuplicateTracker::assign`]: `_N` suffix (or skip) for repeated paths.
//! 4. [`with_inferred_extension`]: extension from the Content-Type, only for
//!    extension-less file names.

mod dedup;
mod dirs;
mod path;

pub use dedup::{Assignment, DuplicateTracker};
pub use dirs::{parent_dirs, DirectorySet, ParentDirs, INDEX_NAME};
pub use path::{candidate_path, clean_path};

use std::path::{Path, PathBuf};
use url::Url;

use crate::mime_ext::ExtensionResolver;

/// Candidate path for a raw URL string.
pub fn resolve_candidate(url: &str) -> Result<String, url::ParseError> {
    Url::parse(url).map(|u| candidate_path(&u))
}

/// True when the last path segment holds no `.`.
pub fn needs_extension(path: &str) -> bool {
    let basename = path.rsplit('/').next().unwrap_or(path);
    !basename.is_empty() && !basename.contains('.')
}

/// Appends the extension registered for `content_type` when the file name has none.
pub fn with_inferred_extension(
    path: String,
    resolver: &ExtensionResolver,
    content_type: &str,
) -> String {
    if !needs_extension(&path) {
        return path;
    }
    match resolver.extension_for(content_type) {
        Some(ext) => path + &ext,
        None => path,
    }
}

/// Location of a rooted final path under the output directory.
pub fn output_path(root: &Path, final_path: &str) -> PathBuf {
    root.join(final_path.trim_start_matches('/'))
}
