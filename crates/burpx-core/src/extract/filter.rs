//! Record pre-filters, applied before the response is decoded.

use super::options::ExtractOptions;
use super::report::SkipReason;
use crate::export::Record;

/// 200..=299.
pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Why `record` is filtered out under `options`, if it is.
///
/// Each filter is gated only by its own switch: with `skip_non_success` off,
/// every status (including 3xx and above) passes.
pub fn skip_reason_for(record: &Record, options: &ExtractOptions) -> Option<SkipReason> {
    if options.skip_non_success && !is_success(record.status) {
        return Some(SkipReason::NonSuccessStatus(record.status));
    }
    if options.skip_non_get && record.method != "GET" {
        return Some(SkipReason::NonGetMethod(record.method.clone()));
    }
    None
}
