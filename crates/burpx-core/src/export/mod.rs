//! Burp Suite sitemap export reader.
//!
//! Turns the XML produced by Burp's "Save items" into an ordered list of
//! [`Record`]s. Response payloads are kept exactly as stored (possibly base64);
//! decoding happens per record during extraction so one bad payload only
//! skips that record.

mod load;
mod parse;
mod types;

pub use load::load_export;
pub use parse::parse_export;
pub use types::{Payload, Record, SitemapExport};
