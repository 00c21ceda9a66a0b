//! Whole-file writes into the output tree.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::report::SkipReason;

/// Writes `body` to `path` through a temp file in the same directory, then
/// renames it into place. Missing parent directories are created.
///
/// Returns the hex SHA-256 of the body.
pub(super) fn write_body(path: &Path, body: &[u8]) -> Result<String, SkipReason> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|source| SkipReason::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let write_err = |source| SkipReason::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".burpx-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(write_err)?;
    tmp.write_all(body).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(hex::encode(Sha256::digest(body)))
}
