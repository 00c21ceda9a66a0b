//! Captured response handling: payload decoding, status-line patching and
//! HTTP response parsing.
//!
//! Burp stores each response as the raw bytes seen on the wire (optionally
//! base64). Some captures write an HTTP/2 status line as `HTTP/2 200`, which
//! the strict status-line grammar here rejects, so payloads go through
//! [`normalize_status_line`] before [`parse_response`].

mod chunked;
mod decode;
mod normalize;
mod parse;

pub use decode::decode_payload;
pub use normalize::normalize_status_line;
pub use parse::{parse_response, BodyError, HttpVersion, ParsedResponse, ResponseParseError};
