//! Load an export file from disk (fatal-tier failures only).

use anyhow::{Context, Result};
use std::path::Path;

use super::parse::parse_export;
use super::types::SitemapExport;

/// Reads and parses a sitemap export.
///
/// Fails when the file cannot be read, is not well-formed, or holds no
/// `<item>` records at all.
pub fn load_export(path: &Path) -> Result<SitemapExport> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read export file: {}", path.display()))?;
    let xml = String::from_utf8(bytes)
        .with_context(|| format!("export file is not UTF-8: {}", path.display()))?;
    let export = parse_export(&xml)
        .with_context(|| format!("parse export XML: {}", path.display()))?;

    if export.records.is_empty() {
        anyhow::bail!(
            "no items in {}; not a Burp sitemap export file?",
            path.display()
        );
    }

    tracing::debug!(
        records = export.records.len(),
        burp_version = export.burp_version.as_deref().unwrap_or(""),
        export_time = export.export_time.as_deref().unwrap_or(""),
        "loaded export"
    );

    Ok(export)
}
