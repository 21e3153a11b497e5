//! MIME type sniffing from the leading bytes of a file.

use std::borrow::Cow;

/// Only this many leading bytes are considered when sniffing a MIME type.
pub const SNIFF_LEN: usize = 512;

const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16BE: &[u8] = &[0xFE, 0xFF];

const MIME_TEXT_UTF8: &str = "text/plain; charset=utf-8";
const MIME_BINARY: &str = "application/octet-stream";

pub fn sniff_mime(bytes: &[u8]) -> Cow<'static, str> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];

    if head.starts_with(BOM_UTF16BE) {
        return Cow::Borrowed("text/plain; charset=utf-16be");
    }
    if head.starts_with(BOM_UTF16LE) {
        return Cow::Borrowed("text/plain; charset=utf-16le");
    }
    if head.starts_with(BOM_UTF8) {
        return Cow::Borrowed(MIME_TEXT_UTF8);
    }

    for (signature, mime) in BINARY_SIGNATURES {
        if head.starts_with(signature) {
            return Cow::Borrowed(*mime);
        }
    }

    let trimmed = match head.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(start) => &head[start..],
        None => &[][..],
    };
    for (prefix, mime) in MARKUP_PREFIXES {
        if starts_with_ignore_case(trimmed, prefix) {
            return Cow::Borrowed(*mime);
        }
    }

    if head.iter().any(|&b| is_binary_byte(b)) {
        return Cow::Borrowed(MIME_BINARY);
    }

    Cow::Borrowed(MIME_TEXT_UTF8)
}

const BINARY_SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
    (b"\x7FELF", MIME_BINARY),
];

const MARKUP_PREFIXES: &[(&[u8], &str)] = &[
    (b"<?xml", "text/xml; charset=utf-8"),
    (b"<!doctype html", "text/html; charset=utf-8"),
    (b"<html", "text/html; charset=utf-8"),
    (b"<head", "text/html; charset=utf-8"),
    (b"<body", "text/html; charset=utf-8"),
    (b"<script", "text/html; charset=utf-8"),
];

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/sniff.rs"]
mod tests;
