//! Builds Burp sitemap export XML for tests.

use std::io::Write;
use std::path::PathBuf;

pub struct Item {
    pub url: String,
    pub method: String,
    pub status: u16,
    pub response: String,
    pub base64: bool,
}

impl Item {
    pub fn get(url: &str, response: &str) -> Self {
        Self {
            url: url.to_string(),
            method: "GET".to_string(),
            status: 200,
            response: response.to_string(),
            base64: false,
        }
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn base64(mut self, encoded: &str) -> Self {
        self.response = encoded.to_string();
        self.base64 = true;
        self
    }
}

/// Raw HTTP/1.1 response with an optional Content-Type.
pub fn http_response(content_type: Option<&str>, body: &str) -> String {
    let mut raw = String::from("HTTP/1.1 200 OK\r\n");
    if let Some(ct) = content_type {
        raw.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    raw.push_str(&format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
    raw
}

pub fn export_xml(items: &[Item]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n<items burpVersion=\"2024.1\" exportTime=\"Mon Jan 01 00:00:00 UTC 2024\">\n",
    );
    for item in items {
        xml.push_str("  <item>\n");
        xml.push_str(&format!("    <url><![CDATA[{}]]></url>\n", item.url));
        xml.push_str(&format!("    <method><![CDATA[{}]]></method>\n", item.method));
        xml.push_str(&format!("    <status>{}</status>\n", item.status));
        xml.push_str(&format!(
            "    <response base64=\"{}\"><![CDATA[{}]]></response>\n",
            item.base64, item.response
        ));
        xml.push_str("  </item>\n");
    }
    xml.push_str("</items>\n");
    xml
}

/// Writes the export into `dir` and returns its path.
pub fn write_export(dir: &std::path::Path, items: &[Item]) -> PathBuf {
    let path = dir.join("sitemap.xml");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(export_xml(items).as_bytes()).unwrap();
    path
}
