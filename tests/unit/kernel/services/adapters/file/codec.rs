use super::*;

const FRENCH_1252: &[u8] = b"Le caf\xE9 \xE9tait tr\xE8s fr\xE9quent\xE9 \xE0 No\xEBl, o\xF9 l'on mangeait des cr\xEApes \xE0 la cr\xE8me.\n";

#[test]
fn test_plain_utf8() {
    let decoded = decode_text("héllo\n".as_bytes());
    assert_eq!(decoded.encoding, TextEncoding::utf8());
    assert_eq!(decoded.content, "héllo\n");
}

#[test]
fn test_utf8_bom_is_stripped_and_written_back() {
    let bytes = b"\xEF\xBB\xBFabc";
    let decoded = decode_text(bytes);
    assert_eq!(decoded.encoding.label, "UTF-8");
    assert!(decoded.encoding.bom);
    assert_eq!(decoded.content, "abc");

    assert_eq!(
        encode_text(&decoded.content, &decoded.encoding).unwrap(),
        bytes
    );
}

#[test]
fn test_utf16_boms_round_trip() {
    for bytes in [&b"\xFF\xFEh\x00i\x00"[..], &b"\xFE\xFF\x00h\x00i"[..]] {
        let decoded = decode_text(bytes);
        assert_eq!(decoded.content, "hi");
        assert!(decoded.encoding.bom);
        assert_eq!(
            encode_text(&decoded.content, &decoded.encoding).unwrap(),
            bytes
        );
    }
    assert_eq!(decode_text(b"\xFF\xFEh\x00").encoding.label, "UTF-16LE");
    assert_eq!(decode_text(b"\xFE\xFF\x00h").encoding.label, "UTF-16BE");
}

#[test]
fn test_western_single_byte_text_is_detected_and_round_trips() {
    let decoded = decode_text(FRENCH_1252);
    assert_eq!(decoded.encoding.label, "windows-1252");
    assert!(!decoded.encoding.lossy);
    assert!(decoded.content.starts_with("Le café était"));

    assert_eq!(
        encode_text(&decoded.content, &decoded.encoding).unwrap(),
        FRENCH_1252
    );
}

#[test]
fn test_edited_single_byte_text_keeps_its_encoding() {
    let decoded = decode_text(FRENCH_1252);
    let edited = format!("Déjà {}", decoded.content);

    let bytes = encode_text(&edited, &decoded.encoding).unwrap();
    assert!(bytes.starts_with(b"D\xE9j\xE0 "));
}

#[test]
fn test_unmappable_character_is_refused() {
    let decoded = decode_text(FRENCH_1252);
    assert!(encode_text("snow ☃", &decoded.encoding).is_none());
}

#[test]
fn test_nul_bytes_are_unknown() {
    let decoded = decode_text(b"a\x00b");
    assert_eq!(decoded.encoding.label, ENCODING_UNKNOWN);
    assert!(!decoded.encoding.lossy);
    assert_eq!(decoded.content, "a\u{0}b");
    assert_eq!(
        encode_text(&decoded.content, &decoded.encoding).unwrap(),
        b"a\x00b"
    );
}

#[test]
fn test_invalid_bytes_next_to_nul_are_lossy() {
    let decoded = decode_text(b"ab\x00\xFF\xFE\n");
    assert_eq!(decoded.encoding.label, ENCODING_UNKNOWN);
    assert!(decoded.encoding.lossy);
    assert!(encode_text(&decoded.content, &decoded.encoding).is_none());
}

#[test]
fn test_unknown_label_from_elsewhere_is_refused() {
    let encoding = TextEncoding {
        label: "no-such-charset".to_string(),
        bom: false,
        lossy: false,
    };
    assert!(encode_text("abc", &encoding).is_none());
}
