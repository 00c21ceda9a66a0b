//! Content-Type → file extension inference.
//!
//! The registry is the built-in `mime_guess` table merged with the system's
//! `mime.types` files. Lookups return every registered extension in sorted
//! order; the chosen one is the first that is not `.htm`, and when `.htm` is
//! all there is no extension is chosen at all.

mod registry;

pub use registry::parse_mime_types;

use anyhow::{Context, Result};
use mime_guess::mime::Mime;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// `mime.types` locations consulted by [`ExtensionResolver::system`].
pub const SYSTEM_MIME_TYPES_FILES: &[&str] = &[
    "/etc/mime.types",
    "/etc/apache2/mime.types",
    "/etc/apache/mime.types",
    "/etc/httpd/conf/mime.types",
];

/// Extension that is never picked on its own.
const TERSE_HTML_EXT: &str = ".htm";

#[derive(Debug, Clone, Default)]
pub struct ExtensionResolver {
    /// Consult the `mime_guess` built-in table.
    builtin: bool,
    /// Lower-cased essence → dotted extensions.
    table: HashMap<String, BTreeSet<String>>,
}

impl ExtensionResolver {
    /// No registered types at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only the built-in `mime_guess` table.
    pub fn builtin() -> Self {
        Self {
            builtin: true,
            table: HashMap::new(),
        }
    }

    /// Built-in table plus whichever system `mime.types` files exist.
    pub fn system() -> Self {
        let mut resolver = Self::builtin();
        for file in SYSTEM_MIME_TYPES_FILES {
            let path = Path::new(file);
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    resolver.merge_mime_types(&text);
                    tracing::debug!("loaded mime types from {}", path.display());
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => tracing::debug!("skipping {}: {}", path.display(), err),
            }
        }
        resolver
    }

    /// Registry built from `mime.types` text only.
    pub fn from_mime_types(text: &str) -> Self {
        let mut resolver = Self::empty();
        resolver.merge_mime_types(text);
        resolver
    }

    /// Adds the entries of a user-supplied `mime.types` file.
    pub fn with_mime_types_file(mut self, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read mime types: {}", path.display()))?;
        self.merge_mime_types(&text);
        Ok(self)
    }

    fn merge_mime_types(&mut self, text: &str) {
        for (essence, exts) in parse_mime_types(text) {
            let entry = self.table.entry(essence).or_default();
            entry.extend(exts.into_iter().map(|e| format!(".{}", e)));
        }
    }

    /// All extensions registered for `content_type`, sorted, with leading dots.
    pub fn extensions_for(&self, content_type: &str) -> Vec<String> {
        let Some(essence) = media_type_essence(content_type) else {
            return Vec::new();
        };

        let mut exts: BTreeSet<String> = self.table.get(&essence).cloned().unwrap_or_default();
        if self.builtin {
            if let Some(known) = mime_guess::get_mime_extensions_str(&essence) {
                exts.extend(known.iter().map(|e| format!(".{}", e.to_ascii_lowercase())));
            }
        }
        exts.into_iter().collect()
    }

    /// Extension to append for `content_type`, if any.
    pub fn extension_for(&self, content_type: &str) -> Option<String> {
        let exts = self.extensions_for(content_type);
        preferred_extension(&exts).map(str::to_string)
    }
}

/// First extension other than `.htm`. A list holding only `.htm` yields `None`.
pub fn preferred_extension(exts: &[String]) -> Option<&str> {
    exts.iter()
        .map(String::as_str)
        .find(|e| *e != TERSE_HTML_EXT)
}

/// `text/HTML; charset=utf-8` → `text/html`. `None` for empty or unparseable input.
fn media_type_essence(content_type: &str) -> Option<String> {
    let trimmed = content_type.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mime: Mime = trimmed.parse().ok()?;
    Some(mime.essence_str().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &str = "\
# test registry
text/html               html htm shtml
application/x-only-htm  htm
application/json        json
image/jpeg              jpeg jpg jpe
";

    #[test]
    fn prefers_first_non_htm_extension() {
        let r = ExtensionResolver::from_mime_types(TYPES);
        assert_eq!(r.extensions_for("text/html"), vec![".htm", ".html", ".shtml"]);
        assert_eq!(r.extension_for("text/html").as_deref(), Some(".html"));
    }

    #[test]
    fn htm_only_type_gets_no_extension() {
        // Policy: `.htm` is never chosen, even as the only candidate.
        let r = ExtensionResolver::from_mime_types(TYPES);
        assert_eq!(r.extensions_for("application/x-only-htm"), vec![".htm"]);
        assert_eq!(r.extension_for("application/x-only-htm"), None);
    }

    #[test]
    fn parameters_and_case_are_ignored() {
        let r = ExtensionResolver::from_mime_types(TYPES);
        assert_eq!(
            r.extension_for("Application/JSON; charset=UTF-8").as_deref(),
            Some(".json")
        );
    }

    #[test]
    fn sorted_order_decides() {
        let r = ExtensionResolver::from_mime_types(TYPES);
        assert_eq!(r.extension_for("image/jpeg").as_deref(), Some(".jpe"));
    }

    #[test]
    fn unknown_empty_or_garbage_content_type() {
        let r = ExtensionResolver::from_mime_types(TYPES);
        assert_eq!(r.extension_for("application/x-never-registered"), None);
        assert_eq!(r.extension_for(""), None);
        assert_eq!(r.extension_for("not a mime type"), None);
        assert_eq!(ExtensionResolver::empty().extension_for("text/html"), None);
    }

    #[test]
    fn builtin_table_html() {
        let r = ExtensionResolver::builtin();
        assert!(r.extensions_for("text/html").contains(&".html".to_string()));
        assert_eq!(r.extension_for("text/html; charset=utf-8").as_deref(), Some(".html"));
    }

    #[test]
    fn preferred_extension_policy() {
        let exts = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(preferred_extension(&exts(&[".htm", ".html"])), Some(".html"));
        assert_eq!(preferred_extension(&exts(&[".css"])), Some(".css"));
        assert_eq!(preferred_extension(&exts(&[".htm"])), None);
        assert_eq!(preferred_extension(&[]), None);
    }

    #[test]
    fn user_file_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.types");
        std::fs::write(&path, "application/x-burp-test  burptest\n").unwrap();
        let r = ExtensionResolver::empty().with_mime_types_file(&path).unwrap();
        assert_eq!(r.extension_for("application/x-burp-test").as_deref(), Some(".burptest"));
        assert!(ExtensionResolver::empty()
            .with_mime_types_file(&dir.path().join("absent"))
            .is_err());
    }
}
