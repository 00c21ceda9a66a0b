//! `Transfer-Encoding: chunked` body decoding.

use super::parse::{next_line, BodyError};

/// Decodes a chunked body. Chunk extensions and trailer fields are ignored.
pub(super) fn decode_chunked(data: &[u8]) -> Result<Vec<u8>, BodyError> {
    let mut out = Vec::new();
    let mut pos = 0;

    loop {
        let line = next_line(data, &mut pos).ok_or(BodyError::Chunked("missing chunk size"))?;
        let size_field = std::str::from_utf8(line)
            .map_err(|_| BodyError::Chunked("chunk size is not ASCII"))?;
        let size_hex = size_field.split(';').next().unwrap_or("").trim();
        if size_hex.is_empty() || !size_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BodyError::Chunked("invalid chunk size"));
        }
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| BodyError::Chunked("chunk size overflow"))?;

        if size == 0 {
            return Ok(out);
        }

        let end = pos
            .checked_add(size)
            .filter(|&end| end <= data.len())
            .ok_or(BodyError::Chunked("chunk data truncated"))?;
        out.extend_from_slice(&data[pos..end]);
        pos = end;

        let tail = &data[pos..];
        if tail.starts_with(b"\r\n") {
            pos += 2;
        } else if tail.starts_with(b"\n") {
            pos += 1;
        } else {
            return Err(BodyError::Chunked("missing line break after chunk data"));
        }
    }
}
