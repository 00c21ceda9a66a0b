//! HTTP response framing: status line, header block, body.

use thiserror::Error;

use super::chunked::decode_chunked;

/// Protocol version from the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpVersion {
    pub major: u32,
    pub minor: u32,
}

/// A parsed captured response.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub version: HttpVersion,
    pub status: u16,
    pub reason: String,
    /// Header fields in wire order, names as sent.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ParsedResponse {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Content-Type` value, or `""` when absent.
    pub fn content_type(&self) -> &str {
        self.header("Content-Type").unwrap_or("")
    }
}

/// The response head could not be parsed; the record is unusable.
#[derive(Debug, Error)]
pub enum ResponseParseError {
    #[error("empty response payload")]
    Empty,
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),
    #[error("malformed HTTP version: {0:?}")]
    MalformedVersion(String),
    #[error("malformed status code: {0:?}")]
    MalformedStatusCode(String),
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
}

/// The body could not be read per its framing. Callers fall back to an empty body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("body truncated: expected {expected} bytes, got {received}")]
    Truncated { expected: u64, received: u64 },
    #[error("malformed chunked body: {0}")]
    Chunked(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    NoBody,
    Chunked,
    Length(u64),
    UntilEof,
}

/// Parses a raw response.
///
/// Fails only when the status line or header block is malformed, or when
/// `Content-Length` is not a number. A body that does not match its framing is
/// logged and replaced by an empty body.
pub fn parse_response(bytes: &[u8]) -> Result<ParsedResponse, ResponseParseError> {
    let mut pos = 0;
    let status_line = next_line(bytes, &mut pos).ok_or(ResponseParseError::Empty)?;
    let (version, status, reason) = parse_status_line(&String::from_utf8_lossy(status_line))?;
    let headers = parse_header_block(bytes, &mut pos)?;

    let mut response = ParsedResponse {
        version,
        status,
        reason,
        headers,
        body: Vec::new(),
    };

    let framing = body_framing(&response)?;
    match read_body(framing, &bytes[pos..]) {
        Ok(body) => response.body = body,
        Err(err) => {
            tracing::warn!(status, error = %err, "response body unreadable, using empty body");
        }
    }

    Ok(response)
}

/// Next line starting at `*pos`, without its `\n` or `\r\n` terminator.
/// Returns `None` once the input is exhausted.
pub(super) fn next_line<'a>(bytes: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    if *pos >= bytes.len() {
        return None;
    }
    let rest = &bytes[*pos..];
    let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
        Some(i) => (&rest[..i], i + 1),
        None => (rest, rest.len()),
    };
    *pos += consumed;
    Some(line.strip_suffix(b"\r").unwrap_or(line))
}

fn parse_status_line(line: &str) -> Result<(HttpVersion, u16, String), ResponseParseError> {
    let line = line.trim_start_matches([' ', '\t']);
    let (proto, rest) = line
        .split_once(' ')
        .ok_or_else(|| ResponseParseError::MalformedStatusLine(line.to_string()))?;
    let version = parse_version(proto)?;

    let rest = rest.trim_start_matches(' ');
    let (code, reason) = rest.split_once(' ').unwrap_or((rest, ""));
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ResponseParseError::MalformedStatusCode(code.to_string()));
    }
    let status = code
        .parse::<u16>()
        .map_err(|_| ResponseParseError::MalformedStatusCode(code.to_string()))?;

    Ok((version, status, reason.trim().to_string()))
}

/// `HTTP/<major>.<minor>`; both parts are required.
fn parse_version(proto: &str) -> Result<HttpVersion, ResponseParseError> {
    let malformed = || ResponseParseError::MalformedVersion(proto.to_string());
    let numbers = proto.strip_prefix("HTTP/").ok_or_else(malformed)?;
    let (major, minor) = numbers.split_once('.').ok_or_else(malformed)?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(major) || !digits(minor) {
        return Err(malformed());
    }
    Ok(HttpVersion {
        major: major.parse().map_err(|_| malformed())?,
        minor: minor.parse().map_err(|_| malformed())?,
    })
}

fn parse_header_block(
    bytes: &[u8],
    pos: &mut usize,
) -> Result<Vec<(String, String)>, ResponseParseError> {
    let mut headers: Vec<(String, String)> = Vec::new();

    // End of input also terminates the block.
    while let Some(line) = next_line(bytes, pos) {
        if line.is_empty() {
            break;
        }
        let text = String::from_utf8_lossy(line);

        if line[0] == b' ' || line[0] == b'\t' {
            // obs-fold
            match headers.last_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(text.trim());
                    continue;
                }
                None => return Err(ResponseParseError::MalformedHeader(text.into_owned())),
            }
        }

        let (name, value) = text
            .split_once(':')
            .ok_or_else(|| ResponseParseError::MalformedHeader(text.to_string()))?;
        if name.is_empty() || name.contains([' ', '\t']) {
            return Err(ResponseParseError::MalformedHeader(text.to_string()));
        }
        headers.push((name.to_string(), value.trim().to_string()));
    }

    Ok(headers)
}

fn body_framing(response: &ParsedResponse) -> Result<Framing, ResponseParseError> {
    let status = response.status;
    if (100..200).contains(&status) || status == 204 || status == 304 {
        return Ok(Framing::NoBody);
    }

    let chunked = response
        .headers
        .iter()
        .filter(|(n, _)| n.eq_ignore_ascii_case("Transfer-Encoding"))
        .flat_map(|(_, v)| v.split(','))
        .any(|coding| coding.trim().eq_ignore_ascii_case("chunked"));
    if chunked {
        return Ok(Framing::Chunked);
    }

    let mut length: Option<u64> = None;
    for (_, value) in response
        .headers
        .iter()
        .filter(|(n, _)| n.eq_ignore_ascii_case("Content-Length"))
    {
        let n = value
            .trim()
            .parse::<u64>()
            .map_err(|_| ResponseParseError::InvalidContentLength(value.clone()))?;
        if length.is_some_and(|prev| prev != n) {
            return Err(ResponseParseError::InvalidContentLength(value.clone()));
        }
        length = Some(n);
    }

    Ok(length.map(Framing::Length).unwrap_or(Framing::UntilEof))
}

fn read_body(framing: Framing, rest: &[u8]) -> Result<Vec<u8>, BodyError> {
    match framing {
        Framing::NoBody => Ok(Vec::new()),
        Framing::Chunked => decode_chunked(rest),
        Framing::UntilEof => Ok(rest.to_vec()),
        Framing::Length(n) => {
            let available = rest.len() as u64;
            if available < n {
                return Err(BodyError::Truncated {
                    expected: n,
                    received: available,
                });
            }
            Ok(rest[..n as usize].to_vec())
        }
    }
}
