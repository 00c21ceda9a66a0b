//! Per-run extraction switches.

/// Effective options for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Write repeated paths as `path_1`, `path_2`, … instead of skipping them.
    pub write_duplicates: bool,
    /// Skip records whose status is outside 200..=299.
    pub skip_non_success: bool,
    /// Skip records whose method is not `GET`.
    pub skip_non_get: bool,
}
