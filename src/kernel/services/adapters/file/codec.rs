//! Text encoding detection and the inverse encode used when saving.
//!
//! A BOM decides the encoding outright. Otherwise valid UTF-8 wins, NUL-bearing data is
//! `Unknown`, and anything else goes through `chardetng`.

use crate::kernel::services::ports::file::{DecodedText, TextEncoding};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;

pub const ENCODING_UNKNOWN: &str = "Unknown";

pub fn decode_text(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..], true);
    }

    if bytes.contains(&0) {
        let (content, lossy) = match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(s) => (s.to_string(), false),
            Cow::Owned(s) => (s, true),
        };
        return DecodedText {
            content,
            encoding: TextEncoding {
                label: ENCODING_UNKNOWN.to_string(),
                bom: false,
                lossy,
            },
        };
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return DecodedText {
            content: s.to_string(),
            encoding: TextEncoding::utf8(),
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, false);
    decode_with(guess, bytes, false)
}

fn decode_with(encoding: &'static Encoding, body: &[u8], bom: bool) -> DecodedText {
    let (content, lossy) = match encoding.decode_without_bom_handling_and_without_replacement(body)
    {
        Some(text) => (text.into_owned(), false),
        None => {
            let (text, _) = encoding.decode_without_bom_handling(body);
            (text.into_owned(), true)
        }
    };
    tracing::debug!(encoding = encoding.name(), bom, lossy, "decoded text");

    DecodedText {
        content,
        encoding: TextEncoding {
            label: encoding.name().to_string(),
            bom,
            lossy,
        },
    }
}

/// Encodes `content` back into `encoding`. `None` when the result would not be a
/// faithful copy: the text was decoded lossily, or a character has no mapping.
pub fn encode_text(content: &str, encoding: &TextEncoding) -> Option<Vec<u8>> {
    if encoding.lossy {
        return None;
    }
    if encoding.label == ENCODING_UNKNOWN {
        return Some(content.as_bytes().to_vec());
    }

    let target = Encoding::for_label(encoding.label.as_bytes())?;
    let mut out = Vec::with_capacity(content.len() + 3);
    if target == UTF_16LE || target == UTF_16BE {
        let little = target == UTF_16LE;
        let unit_bytes = |unit: u16| {
            if little {
                unit.to_le_bytes()
            } else {
                unit.to_be_bytes()
            }
        };
        if encoding.bom {
            out.extend_from_slice(&unit_bytes(0xFEFF));
        }
        for unit in content.encode_utf16() {
            out.extend_from_slice(&unit_bytes(unit));
        }
        return Some(out);
    }

    if encoding.bom && target == UTF_8 {
        out.extend_from_slice(b"\xEF\xBB\xBF");
    }
    let (bytes, used, had_unmappable) = target.encode(content);
    if had_unmappable || used != target {
        return None;
    }
    out.extend_from_slice(&bytes);
    Some(out)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/codec.rs"]
mod tests;
