//! Burp Suite sitemap export structures.

/// Root of an export (the `<items>` element).
#[derive(Debug, Clone, Default)]
pub struct SitemapExport {
    pub burp_version: Option<String>,
    pub export_time: Option<String>,
    pub records: Vec<Record>,
}

/// One captured exchange (an `<item>` element).
///
/// Only `url`, `method`, `status` and `response` drive extraction; the rest is
/// carried for logging and the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub time: String,
    pub url: String,
    pub host: String,
    pub host_ip: Option<String>,
    pub port: Option<u16>,
    pub protocol: String,
    pub method: String,
    pub path: String,
    pub extension: String,
    pub request: Payload,
    pub status: u16,
    pub response_length: Option<u64>,
    pub mime_type: String,
    pub response: Payload,
    pub comment: String,
}

/// Raw request or response bytes as stored in the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    /// `base64="true"` on the element.
    pub base64: bool,
    pub data: String,
}

impl Payload {
    pub fn plain(data: impl Into<String>) -> Self {
        Self {
            base64: false,
            data: data.into(),
        }
    }

    pub fn base64(data: impl Into<String>) -> Self {
        Self {
            base64: true,
            data: data.into(),
        }
    }
}
