//! Status-line patch for captures that write `HTTP/2` without a minor version.

use std::borrow::Cow;

const BARE_HTTP2: &[u8] = b"HTTP/2";
const PATCHED_HTTP2: &[u8] = b"HTTP/2.0";

/// Rewrites a leading `HTTP/2` protocol token to `HTTP/2.0`.
///
/// Only the first line is inspected. Leading spaces/tabs are kept, as is every
/// byte after the token. Input that does not start with a bare `HTTP/2` token
/// (including `HTTP/2.x`) is returned borrowed and untouched.
pub fn normalize_status_line(payload: &[u8]) -> Cow<'_, [u8]> {
    if payload.is_empty() {
        return Cow::Borrowed(payload);
    }

    let eol = payload
        .iter()
        .position(|&b| b == b'\n')
        .or_else(|| payload.iter().position(|&b| b == b'\r'))
        .unwrap_or(payload.len());

    let start = payload[..eol]
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(eol);

    if start >= eol
        || eol - start < BARE_HTTP2.len()
        || &payload[start..start + BARE_HTTP2.len()] != BARE_HTTP2
    {
        return Cow::Borrowed(payload);
    }

    let after = start + BARE_HTTP2.len();
    if payload.get(after) == Some(&b'.') {
        return Cow::Borrowed(payload);
    }

    let mut out = Vec::with_capacity(payload.len() + 2);
    out.extend_from_slice(&payload[..start]);
    out.extend_from_slice(PATCHED_HTTP2);
    out.extend_from_slice(&payload[after..]);
    Cow::Owned(out)
}
