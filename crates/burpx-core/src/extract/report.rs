//! Per-record outcomes of an extraction run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::response::ResponseParseError;

/// A record that produced a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Position of the record in the export.
    pub index: usize,
    pub url: String,
    /// Rooted path inside the output tree (`/host/...`).
    pub path: String,
    /// Where the file was written.
    pub location: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// A record that was dropped, and why.
#[derive(Debug)]
pub struct SkippedRecord {
    pub index: usize,
    pub url: String,
    pub reason: SkipReason,
}

/// Why a single record was not written. None of these abort the run.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("non-2xx response status {0}")]
    NonSuccessStatus(u16),
    #[error("non-GET request method {0:?}")]
    NonGetMethod(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid base64 response payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("malformed HTTP response: {0}")]
    MalformedResponse(#[from] ResponseParseError),
    #[error("duplicate path {0}")]
    Duplicate(String),
    #[error("create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("write file {}: {source}", .path.display())]
    WriteFile { path: PathBuf, source: io::Error },
}

/// Coarse grouping of [`SkipReason`]s for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipCategory {
    NonSuccessStatus,
    NonGetMethod,
    InvalidUrl,
    InvalidBase64,
    MalformedResponse,
    Duplicate,
    CreateDir,
    WriteFile,
}

impl SkipCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipCategory::NonSuccessStatus => "non-success-status",
            SkipCategory::NonGetMethod => "non-get-method",
            SkipCategory::InvalidUrl => "invalid-url",
            SkipCategory::InvalidBase64 => "invalid-base64",
            SkipCategory::MalformedResponse => "malformed-response",
            SkipCategory::Duplicate => "duplicate",
            SkipCategory::CreateDir => "create-dir",
            SkipCategory::WriteFile => "write-file",
        }
    }

    /// Filtered by an option rather than failed.
    pub fn is_filter(self) -> bool {
        matches!(
            self,
            SkipCategory::NonSuccessStatus | SkipCategory::NonGetMethod
        )
    }
}

impl fmt::Display for SkipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SkipReason {
    pub fn category(&self) -> SkipCategory {
        match self {
            SkipReason::NonSuccessStatus(_) => SkipCategory::NonSuccessStatus,
            SkipReason::NonGetMethod(_) => SkipCategory::NonGetMethod,
            SkipReason::InvalidUrl(_) => SkipCategory::InvalidUrl,
            SkipReason::InvalidBase64(_) => SkipCategory::InvalidBase64,
            SkipReason::MalformedResponse(_) => SkipCategory::MalformedResponse,
            SkipReason::Duplicate(_) => SkipCategory::Duplicate,
            SkipReason::CreateDir { .. } => SkipCategory::CreateDir,
            SkipReason::WriteFile { .. } => SkipCategory::WriteFile,
        }
    }
}

#[derive(Debug)]
pub enum RecordOutcome {
    Written(WrittenFile),
    Skipped(SkippedRecord),
}

/// Outcomes of a run, one per record, in record order.
#[derive(Debug, Default)]
pub struct ExtractReport {
    outcomes: Vec<RecordOutcome>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    written: Vec<&'a WrittenFile>,
    skipped: Vec<ManifestSkip<'a>>,
}

#[derive(Serialize)]
struct ManifestSkip<'a> {
    index: usize,
    url: &'a str,
    category: SkipCategory,
    reason: String,
}

impl ExtractReport {
    pub(crate) fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> impl Iterator<Item = &WrittenFile> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Written(w) => Some(w),
            RecordOutcome::Skipped(_) => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedRecord> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Skipped(s) => Some(s),
            RecordOutcome::Written(_) => None,
        })
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    pub fn skip_counts(&self) -> BTreeMap<SkipCategory, usize> {
        let mut counts = BTreeMap::new();
        for s in self.skipped() {
            *counts.entry(s.reason.category()).or_insert(0) += 1;
        }
        counts
    }

    /// One-line summary, e.g. `written 3, skipped 2 (duplicate: 1, invalid-url: 1)`.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "written {}, skipped {}",
            self.written_count(),
            self.skipped_count()
        );
        let counts = self.skip_counts();
        if !counts.is_empty() {
            let parts: Vec<String> = counts
                .iter()
                .map(|(category, n)| format!("{}: {}", category, n))
                .collect();
            line.push_str(&format!(" ({})", parts.join(", ")));
        }
        line
    }

    /// Writes the report as pretty JSON.
    pub fn write_manifest(&self, path: &Path) -> Result<()> {
        let manifest = Manifest {
            written: self.written().collect(),
            skipped: self
                .skipped()
                .map(|s| ManifestSkip {
                    index: s.index,
                    url: &s.url,
                    category: s.reason.category(),
                    reason: s.reason.to_string(),
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&manifest)?;
        std::fs::write(path, json)
            .with_context(|| format!("write manifest: {}", path.display()))?;
        Ok(())
    }
}
