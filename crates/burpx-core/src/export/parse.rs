//! Streaming reader for the Burp `<items>` XML document.

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str::FromStr;

use super::types::{Payload, Record, SitemapExport};

/// Parse a whole export document.
///
/// Elements other than `<items>` and `<item>` are skipped at the top level, so
/// a leading declaration or DOCTYPE is fine.
pub fn parse_export(xml: &str) -> Result<SitemapExport> {
    let mut reader = Reader::from_str(xml);
    let mut export = SitemapExport::default();

    loop {
        match reader.read_event().context("read export XML")? {
            Event::Start(e) if e.name().as_ref() == b"items" => {
                export.burp_version = attr_value(&e, b"burpVersion")?;
                export.export_time = attr_value(&e, b"exportTime")?;
            }
            Event::Empty(e) if e.name().as_ref() == b"items" => {
                export.burp_version = attr_value(&e, b"burpVersion")?;
                export.export_time = attr_value(&e, b"exportTime")?;
            }
            Event::Start(e) if e.name().as_ref() == b"item" => {
                let index = export.records.len();
                let record = parse_item(&mut reader)
                    .with_context(|| format!("decode item #{}", index))?;
                export.records.push(record);
            }
            Event::Empty(e) if e.name().as_ref() == b"item" => {
                export.records.push(Record::default());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(export)
}

fn parse_item(reader: &mut Reader<&[u8]>) -> Result<Record> {
    let mut record = Record::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let text = read_text(reader, &name)?;
                apply_field(&mut record, &e, &name, text)?;
            }
            Event::Empty(e) => {
                let name = e.name().as_ref().to_vec();
                apply_field(&mut record, &e, &name, String::new())?;
            }
            Event::End(e) if e.name().as_ref() == b"item" => return Ok(record),
            Event::Eof => bail!("unexpected end of file inside <item>"),
            _ => {}
        }
    }
}

fn apply_field(record: &mut Record, start: &BytesStart<'_>, name: &[u8], text: String) -> Result<()> {
    match name {
        b"time" => record.time = text,
        b"url" => record.url = text,
        b"host" => {
            record.host = text;
            record.host_ip = attr_value(start, b"ip")?;
        }
        b"port" => record.port = parse_number(&text, "port")?,
        b"protocol" => record.protocol = text,
        b"method" => record.method = text,
        b"path" => record.path = text,
        b"extension" => record.extension = text,
        b"request" => record.request = payload(start, text)?,
        b"status" => record.status = parse_number(&text, "status")?.unwrap_or(0),
        b"responselength" => record.response_length = parse_number(&text, "responselength")?,
        b"mimetype" => record.mime_type = text,
        b"response" => record.response = payload(start, text)?,
        b"comment" => record.comment = text,
        _ => {}
    }
    Ok(())
}

/// Collect the text and CDATA content of the element just opened, up to its end tag.
fn read_text(reader: &mut Reader<&[u8]>, name: &[u8]) -> Result<String> {
    let mut out = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Text(t) => out.push_str(&t.unescape()?),
            Event::CData(c) => {
                let raw = c.into_inner();
                out.push_str(std::str::from_utf8(&raw).context("CDATA is not valid UTF-8")?);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth > 0 => depth -= 1,
            Event::End(_) => return Ok(out),
            Event::Eof => bail!(
                "unexpected end of file inside <{}>",
                String::from_utf8_lossy(name)
            ),
            _ => {}
        }
    }
}

fn payload(start: &BytesStart<'_>, data: String) -> Result<Payload> {
    let base64 = attr_value(start, b"base64")?
        .map(|v| parse_bool(&v))
        .unwrap_or(false);
    Ok(Payload { base64, data })
}

fn attr_value(start: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_bool(value: &str) -> bool {
    let v = value.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("t")
}

/// Empty field → `None`; otherwise the value must parse.
fn parse_number<T>(text: &str, field: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let n = text
        .parse::<T>()
        .with_context(|| format!("invalid <{}> value: {:?}", field, text))?;
    Ok(Some(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_attribute_spellings() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool("t"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn empty_numeric_field_is_none() {
        assert_eq!(parse_number::<u16>("", "port").unwrap(), None);
        assert_eq!(parse_number::<u16>(" 443 ", "port").unwrap(), Some(443));
        assert!(parse_number::<u16>("abc", "port").is_err());
    }

    #[test]
    fn nested_markup_inside_field_is_flattened() {
        let xml = "<items><item><comment>a<b>x</b>c</comment></item></items>";
        let export = parse_export(xml).unwrap();
        assert_eq!(export.records[0].comment, "axc");
    }
}
