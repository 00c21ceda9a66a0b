//! Payload decoding (base64 as flagged in the export).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::borrow::Cow;

use crate::export::Payload;

/// Returns the raw bytes of a payload.
///
/// Base64 payloads are decoded with the standard alphabet; line breaks inside
/// the encoded text are ignored since exports may wrap long lines.
pub fn decode_payload(payload: &Payload) -> Result<Cow<'_, [u8]>, base64::DecodeError> {
    if !payload.base64 {
        return Ok(Cow::Borrowed(payload.data.as_bytes()));
    }

    let data = payload.data.as_bytes();
    let decoded = if data.iter().any(|&b| b == b'\r' || b == b'\n') {
        let compact: Vec<u8> = data
            .iter()
            .copied()
            .filter(|&b| b != b'\r' && b != b'\n')
            .collect();
        STANDARD.decode(compact)?
    } else {
        STANDARD.decode(data)?
    };
    Ok(Cow::Owned(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_payload_passthrough() {
        let p = Payload::plain("HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(&*decode_payload(&p).unwrap(), b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn base64_payload() {
        let p = Payload::base64("SFRUUC8yIDIwMCBPSw0KDQpoaQ==");
        assert_eq!(&*decode_payload(&p).unwrap(), b"HTTP/2 200 OK\r\n\r\nhi");
    }

    #[test]
    fn base64_payload_with_line_breaks() {
        let p = Payload::base64("SFRUUC8yIDIw\r\nMCBPSw0KDQpo\naQ==");
        assert_eq!(&*decode_payload(&p).unwrap(), b"HTTP/2 200 OK\r\n\r\nhi");
    }

    #[test]
    fn invalid_base64_is_error() {
        let p = Payload::base64("not*base64!");
        assert!(decode_payload(&p).is_err());
    }
}
