//! Extraction driver: records in, site tree out.
//!
//! Runs in two passes. The first derives every record's candidate path and
//! collects all implied parent directories into a [`DirectorySet`]; only then
//! does the second pass resolve, deduplicate and write each record, in order.
//! A failing record is logged and reported, and the run moves on.

mod filter;
mod options;
mod report;
mod write;

pub use filter::{is_success, skip_reason_for};
pub use options::ExtractOptions;
pub use report::{
    ExtractReport, RecordOutcome, SkipCategory, SkipReason, SkippedRecord, WrittenFile,
};

use std::path::Path;

use crate::export::Record;
use crate::mime_ext::ExtensionResolver;
use crate::mirror::{
    output_path, resolve_candidate, with_inferred_extension, Assignment, DirectorySet,
    DuplicateTracker,
};
use crate::response::{decode_payload, normalize_status_line, parse_response};

pub struct Extractor {
    options: ExtractOptions,
    extensions: ExtensionResolver,
}

impl Extractor {
    pub fn new(options: ExtractOptions, extensions: ExtensionResolver) -> Self {
        Self {
            options,
            extensions,
        }
    }

    /// Extracts `records` under `out_root`. Never fails as a whole; see the
    /// returned report for what happened to each record.
    pub fn extract(&self, records: &[Record], out_root: &Path) -> ExtractReport {
        let dirs = DirectorySet::from_records(records);
        let mut tracker = DuplicateTracker::new(self.options.write_duplicates);
        let mut report = ExtractReport::default();

        for (index, record) in records.iter().enumerate() {
            match self.extract_one(index, record, &dirs, &mut tracker, out_root) {
                Ok(written) => report.push(RecordOutcome::Written(written)),
                Err(reason) => {
                    log_skip(record, &reason);
                    report.push(RecordOutcome::Skipped(SkippedRecord {
                        index,
                        url: record.url.clone(),
                        reason,
                    }));
                }
            }
        }

        tracing::info!(out = %out_root.display(), "extraction finished: {}", report.summary());
        report
    }

    fn extract_one(
        &self,
        index: usize,
        record: &Record,
        dirs: &DirectorySet,
        tracker: &mut DuplicateTracker,
        out_root: &Path,
    ) -> Result<WrittenFile, SkipReason> {
        if let Some(reason) = skip_reason_for(record, &self.options) {
            return Err(reason);
        }

        let payload = decode_payload(&record.response)?;
        let normalized = normalize_status_line(&payload);
        let response = parse_response(&normalized)?;

        let candidate = resolve_candidate(&record.url)?;
        let path = dirs.resolve_collision(candidate);
        let path = match tracker.assign(path.clone()) {
            Assignment::Write(path) => path,
            Assignment::Skip => return Err(SkipReason::Duplicate(path)),
        };
        let path = with_inferred_extension(path, &self.extensions, response.content_type());

        let location = output_path(out_root, &path);
        tracing::info!("Extracting {}", record.url);
        let sha256 = write::write_body(&location, &response.body)?;

        Ok(WrittenFile {
            index,
            url: record.url.clone(),
            path,
            location,
            bytes: response.body.len() as u64,
            sha256,
        })
    }
}

fn log_skip(record: &Record, reason: &SkipReason) {
    let category = reason.category();
    if category.is_filter() {
        tracing::info!(url = %record.url, %category, "skipping record: {}", reason);
    } else if category == SkipCategory::Duplicate {
        tracing::warn!(url = %record.url, "skipping duplicate path: {}", reason);
    } else {
        tracing::error!(url = %record.url, %category, "failed to extract record: {}", reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Payload;

    fn record(url: &str, response: &str) -> Record {
        Record {
            url: url.into(),
            method: "GET".into(),
            status: 200,
            response: Payload::plain(response),
            ..Record::default()
        }
    }

    const HTML: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n<p>x</p>";

    fn extractor(write_duplicates: bool) -> Extractor {
        Extractor::new(
            ExtractOptions {
                write_duplicates,
                ..ExtractOptions::default()
            },
            ExtensionResolver::from_mime_types("text/html html htm\n"),
        )
    }

    #[test]
    fn collision_runs_before_dedup_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            record("http://ex.com/a", HTML),
            record("http://ex.com/a/b", HTML),
            record("http://ex.com/a", HTML),
        ];
        let report = extractor(true).extract(&records, dir.path());
        let paths: Vec<&str> = report.written().map(|w| w.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/ex.com/a/index.html", "/ex.com/a/b.html", "/ex.com/a/index_1.html"]
        );
    }

    #[test]
    fn bad_records_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut bad_b64 = record("http://ex.com/b64", "");
        bad_b64.response = Payload::base64("%%%");
        let records = vec![
            record("not a url", HTML),
            bad_b64,
            record("http://ex.com/garbage", "garbage"),
            record("http://ex.com/ok", HTML),
        ];
        let report = extractor(false).extract(&records, dir.path());
        let categories: Vec<SkipCategory> =
            report.skipped().map(|s| s.reason.category()).collect();
        assert_eq!(
            categories,
            vec![
                SkipCategory::InvalidUrl,
                SkipCategory::InvalidBase64,
                SkipCategory::MalformedResponse
            ]
        );
        assert_eq!(report.written_count(), 1);
        assert!(dir.path().join("ex.com/ok.html").is_file());
    }

    #[test]
    fn skipped_records_do_not_claim_paths() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            record("http://ex.com/p", "garbage"),
            record("http://ex.com/p", HTML),
        ];
        let report = extractor(false).extract(&records, dir.path());
        let written: Vec<&WrittenFile> = report.written().collect();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].index, 1);
        assert_eq!(written[0].path, "/ex.com/p.html");
    }
}
