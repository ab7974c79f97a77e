//! Bit-level pieces of the `\uXXXX` codec.
//!
//! Decoding turns four hex digits into a code unit and a code point into its
//! UTF-8 bytes. Encoding goes the other way: a leading byte is classified by
//! its high bits, the payload bits of a two- or three-byte sequence are
//! reassembled into a 16-bit code unit, and that unit is written back as hex.

use smallvec::SmallVec;

use crate::options::HexCase;

/// UTF-8 encoding of a single code point, one to four bytes.
pub type Utf8Bytes = SmallVec<[u8; 4]>;

const NOT_HEX: u8 = 0xFF;

const fn build_hex_values() -> [u8; 256] {
    let mut table = [NOT_HEX; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'A' as usize + i] = 10 + i as u8;
        table[b'a' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
}

static HEX_VALUES: [u8; 256] = build_hex_values();

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";
const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

#[inline]
pub fn hex_value(digit: u8) -> Option<u8> {
    match HEX_VALUES[digit as usize] {
        NOT_HEX => None,
        value => Some(value),
    }
}

#[inline]
pub fn hex_digit(value: u8, case: HexCase) -> u8 {
    let table = match case {
        HexCase::Upper => HEX_UPPER,
        HexCase::Lower => HEX_LOWER,
    };
    table[(value & 0x0F) as usize]
}

/// Reads exactly four hex digits as a 16-bit code unit.
pub fn decode_hex4(digits: &[u8]) -> Option<u16> {
    let digits = digits.get(..4)?;
    let mut unit = 0u16;
    for &digit in digits {
        unit = (unit << 4) | hex_value(digit)? as u16;
    }
    Some(unit)
}

#[inline]
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

pub fn compose_surrogates(high: u16, low: u16) -> u32 {
    0x10000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00)
}

/// UTF-8 bytes for `code_point`; `len()` of the result is the byte count.
pub fn encode_code_point(code_point: u32) -> Utf8Bytes {
    let mut out = Utf8Bytes::new();
    if code_point < 0x80 {
        out.push(code_point as u8);
    } else if code_point < 0x800 {
        out.push(0xC0 | (code_point >> 6) as u8);
        out.push(0x80 | (code_point & 0x3F) as u8);
    } else if code_point < 0x10000 {
        out.push(0xE0 | (code_point >> 12) as u8);
        out.push(0x80 | ((code_point >> 6) & 0x3F) as u8);
        out.push(0x80 | (code_point & 0x3F) as u8);
    } else {
        out.push(0xF0 | ((code_point >> 18) & 0x07) as u8);
        out.push(0x80 | ((code_point >> 12) & 0x3F) as u8);
        out.push(0x80 | ((code_point >> 6) & 0x3F) as u8);
        out.push(0x80 | (code_point & 0x3F) as u8);
    }
    out
}

/// Decodes the four hex digits of a `\u` escape straight to UTF-8.
pub fn decode_escape(digits: &[u8]) -> Option<Utf8Bytes> {
    decode_hex4(digits).map(|unit| encode_code_point(unit as u32))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadByte {
    Ascii,
    Continuation,
    Two,
    Three,
    Four,
    Invalid,
}

impl LeadByte {
    pub fn classify(byte: u8) -> Self {
        if byte & 0x80 == 0 {
            LeadByte::Ascii
        } else if byte & 0xC0 == 0x80 {
            LeadByte::Continuation
        } else if byte & 0xE0 == 0xC0 {
            LeadByte::Two
        } else if byte & 0xF0 == 0xE0 {
            LeadByte::Three
        } else if byte & 0xF8 == 0xF0 {
            LeadByte::Four
        } else {
            LeadByte::Invalid
        }
    }

    pub fn sequence_len(self) -> usize {
        match self {
            LeadByte::Ascii | LeadByte::Continuation | LeadByte::Invalid => 1,
            LeadByte::Two => 2,
            LeadByte::Three => 3,
            LeadByte::Four => 4,
        }
    }
}

/// Reassembles the 11- or 16-bit payload of a two- or three-byte sequence.
pub fn decode_sequence(bytes: &[u8]) -> Option<u16> {
    match *bytes {
        [lead, b1] if LeadByte::classify(lead) == LeadByte::Two => {
            Some((((lead & 0x1F) as u16) << 6) | (b1 & 0x3F) as u16)
        }
        [lead, b1, b2] if LeadByte::classify(lead) == LeadByte::Three => Some(
            (((lead & 0x0F) as u16) << 12) | (((b1 & 0x3F) as u16) << 6) | (b2 & 0x3F) as u16,
        ),
        _ => None,
    }
}

/// `\uXXXX` for a 16-bit code unit.
pub fn push_unicode_escape(out: &mut String, unit: u16, case: HexCase) {
    out.push('\\');
    out.push('u');
    for shift in [12u16, 8, 4, 0] {
        out.push(hex_digit((unit >> shift) as u8, case) as char);
    }
}

/// The short escape for quote, backslash, slash and the named controls.
pub fn short_escape(byte: u8) -> Option<&'static str> {
    let escaped = match byte {
        b'"' => "\\\"",
        b'\\' => "\\\\",
        b'/' => "\\/",
        0x08 => "\\b",
        0x0C => "\\f",
        b'\n' => "\\n",
        b'\r' => "\\r",
        b'\t' => "\\t",
        _ => return None,
    };
    Some(escaped)
}

/// Writes the escape for an ASCII byte that must not appear raw.
pub fn push_control_escape(out: &mut String, byte: u8, case: HexCase) {
    match short_escape(byte) {
        Some(escaped) => out.push_str(escaped),
        None => push_unicode_escape(out, byte as u16, case),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(b'0', Some(0))]
    #[case(b'9', Some(9))]
    #[case(b'A', Some(10))]
    #[case(b'f', Some(15))]
    #[case(b'g', None)]
    #[case(b' ', None)]
    fn test_hex_value(#[case] digit: u8, #[case] expected: Option<u8>) {
        assert_eq!(hex_value(digit), expected);
    }

    #[rstest::rstest]
    fn test_hex_digit_case() {
        assert_eq!(hex_digit(0xE, HexCase::Upper), b'E');
        assert_eq!(hex_digit(0xE, HexCase::Lower), b'e');
        assert_eq!(hex_digit(0x3, HexCase::Lower), b'3');
    }

    #[rstest::rstest]
    #[case(b"0041", Some(0x0041))]
    #[case(b"00e9", Some(0x00E9))]
    #[case(b"00E9", Some(0x00E9))]
    #[case(b"FFFF", Some(0xFFFF))]
    #[case(b"12345", Some(0x1234))]
    #[case(b"123", None)]
    #[case(b"12G4", None)]
    fn test_decode_hex4(#[case] digits: &[u8], #[case] expected: Option<u16>) {
        assert_eq!(decode_hex4(digits), expected);
    }

    #[rstest::rstest]
    #[case(b"0041", &[0x41])]
    #[case(b"00e9", &[0xC3, 0xA9])]
    #[case(b"07FF", &[0xDF, 0xBF])]
    #[case(b"0800", &[0xE0, 0xA0, 0x80])]
    #[case(b"20AC", &[0xE2, 0x82, 0xAC])]
    #[case(b"FFFF", &[0xEF, 0xBF, 0xBF])]
    fn test_decode_escape_byte_lengths(#[case] digits: &[u8], #[case] expected: &[u8]) {
        let bytes = decode_escape(digits).unwrap();
        assert_eq!(bytes.as_slice(), expected);
    }

    #[rstest::rstest]
    #[case('a')]
    #[case('\u{e9}')]
    #[case('\u{20ac}')]
    #[case('\u{1F600}')]
    #[case('\u{10FFFF}')]
    fn test_encode_code_point_matches_std(#[case] ch: char) {
        let mut buf = [0u8; 4];
        let expected = ch.encode_utf8(&mut buf).as_bytes();
        assert_eq!(encode_code_point(ch as u32).as_slice(), expected);
    }

    #[rstest::rstest]
    fn test_compose_surrogates() {
        assert!(is_high_surrogate(0xD83D));
        assert!(is_low_surrogate(0xDE00));
        assert!(!is_low_surrogate(0xD83D));
        assert_eq!(compose_surrogates(0xD83D, 0xDE00), 0x1F600);
    }

    #[rstest::rstest]
    #[case(b'a', LeadByte::Ascii)]
    #[case(0x80, LeadByte::Continuation)]
    #[case(0xC3, LeadByte::Two)]
    #[case(0xE2, LeadByte::Three)]
    #[case(0xF0, LeadByte::Four)]
    #[case(0xF8, LeadByte::Invalid)]
    fn test_classify(#[case] byte: u8, #[case] expected: LeadByte) {
        assert_eq!(LeadByte::classify(byte), expected);
    }

    #[rstest::rstest]
    #[case("\u{e9}", Some(0x00E9))]
    #[case("\u{7ff}", Some(0x07FF))]
    #[case("\u{20ac}", Some(0x20AC))]
    #[case("a", None)]
    #[case("\u{1F600}", None)]
    fn test_decode_sequence(#[case] text: &str, #[case] expected: Option<u16>) {
        assert_eq!(decode_sequence(text.as_bytes()), expected);
    }

    #[rstest::rstest]
    fn test_push_escapes() {
        let mut out = String::new();
        push_unicode_escape(&mut out, 0x00E9, HexCase::Upper);
        push_unicode_escape(&mut out, 0x00E9, HexCase::Lower);
        push_control_escape(&mut out, b'\n', HexCase::Upper);
        push_control_escape(&mut out, 0x01, HexCase::Upper);
        push_control_escape(&mut out, 0x1f, HexCase::Lower);
        assert_eq!(out, "\\u00E9\\u00e9\\n\\u0001\\u001f");
    }
}
