use memchr::memchr;

use crate::error::ErrorKind;
use crate::options::EncodeOptions;
use crate::text::utf8::{
    compose_surrogates, decode_hex4, decode_sequence, encode_code_point, is_high_surrogate,
    is_low_surrogate, push_control_escape, push_unicode_escape, short_escape, LeadByte,
};

/// Failure while unescaping a quoted span. `offset` is relative to the span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EscapeError {
    pub kind: ErrorKind,
    pub offset: usize,
    pub message: String,
}

impl EscapeError {
    fn invalid(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidEscape,
            offset,
            message: message.into(),
        }
    }
}

/// Resolves backslash escapes in the raw text between two quotes.
pub(crate) fn unescape(raw: &str) -> Result<String, EscapeError> {
    let bytes = raw.as_bytes();
    let Some(first) = memchr(b'\\', bytes) else {
        return Ok(raw.to_owned());
    };

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve(bytes.len()).map_err(|_| EscapeError {
        kind: ErrorKind::OutOfMemory,
        offset: 0,
        message: "allocation failed".to_string(),
    })?;
    out.extend_from_slice(&bytes[..first]);

    let mut idx = first;
    while idx < bytes.len() {
        let Some(&tag) = bytes.get(idx + 1) else {
            return Err(EscapeError::invalid(idx, "dangling backslash"));
        };
        let consumed = match tag {
            b'"' | b'\\' | b'/' => {
                out.push(tag);
                2
            }
            b'b' => {
                out.push(0x08);
                2
            }
            b'f' => {
                out.push(0x0C);
                2
            }
            b'n' => {
                out.push(b'\n');
                2
            }
            b'r' => {
                out.push(b'\r');
                2
            }
            b't' => {
                out.push(b'\t');
                2
            }
            b'u' => {
                let (code_point, consumed) = read_unicode_escape(bytes, idx)?;
                out.extend_from_slice(&encode_code_point(code_point));
                consumed
            }
            other => {
                return Err(EscapeError::invalid(
                    idx,
                    format!("unknown escape '\\{}'", other.escape_ascii()),
                ));
            }
        };
        idx += consumed;

        match memchr(b'\\', &bytes[idx..]) {
            Some(offset) => {
                out.extend_from_slice(&bytes[idx..idx + offset]);
                idx += offset;
            }
            None => {
                out.extend_from_slice(&bytes[idx..]);
                idx = bytes.len();
            }
        }
    }

    out.shrink_to_fit();
    String::from_utf8(out).map_err(|err| EscapeError {
        kind: ErrorKind::InvalidUtf8,
        offset: err.utf8_error().valid_up_to(),
        message: "escape produced invalid utf-8".to_string(),
    })
}

/// Code point of the `\u` escape at `idx`, plus how many bytes it spans.
/// A high surrogate pulls in the low surrogate escape that must follow it.
fn read_unicode_escape(bytes: &[u8], idx: usize) -> Result<(u32, usize), EscapeError> {
    let digits = bytes.get(idx + 2..).unwrap_or_default();
    let unit = decode_hex4(digits)
        .ok_or_else(|| EscapeError::invalid(idx, "\\u must be followed by four hex digits"))?;

    if is_low_surrogate(unit) {
        return Err(EscapeError::invalid(
            idx,
            format!("unpaired low surrogate \\u{unit:04X}"),
        ));
    }
    if !is_high_surrogate(unit) {
        return Ok((unit as u32, 6));
    }

    let next = idx + 6;
    let low = match bytes.get(next..next + 2) {
        Some(b"\\u") => bytes.get(next + 2..).and_then(decode_hex4),
        _ => None,
    };
    match low {
        Some(low) if is_low_surrogate(low) => Ok((compose_surrogates(unit, low), 12)),
        _ => Err(EscapeError::invalid(
            idx,
            format!("unpaired high surrogate \\u{unit:04X}"),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Raw(usize),
    Control(u8),
    Unicode(u16, usize),
}

#[inline]
fn step(bytes: &[u8], idx: usize, options: &EncodeOptions) -> Step {
    let byte = bytes[idx];
    match LeadByte::classify(byte) {
        LeadByte::Ascii => {
            if byte < 0x20 || byte == b'"' || byte == b'\\' || (byte == b'/' && options.escape_slash)
            {
                Step::Control(byte)
            } else {
                Step::Raw(1)
            }
        }
        lead @ (LeadByte::Two | LeadByte::Three) if options.escape_unicode => {
            let len = lead.sequence_len();
            match bytes.get(idx..idx + len).and_then(decode_sequence) {
                Some(unit) => Step::Unicode(unit, len),
                None => Step::Raw(1),
            }
        }
        lead => Step::Raw(lead.sequence_len().min(bytes.len() - idx)),
    }
}

/// Exact length of `escape_string_into`'s output for `value`.
pub(crate) fn escaped_len(value: &str, options: &EncodeOptions) -> usize {
    let bytes = value.as_bytes();
    let mut idx = 0;
    let mut len = 0;
    while idx < bytes.len() {
        match step(bytes, idx, options) {
            Step::Raw(n) => {
                len += n;
                idx += n;
            }
            Step::Control(byte) => {
                len += short_escape(byte).map_or(6, str::len);
                idx += 1;
            }
            Step::Unicode(_, n) => {
                len += 6;
                idx += n;
            }
        }
    }
    len
}

/// Appends `value` with quote, backslash, slash and control bytes escaped and
/// two/three-byte sequences rewritten as `\uXXXX`. Four-byte sequences are
/// copied through unchanged.
pub fn escape_string_into(out: &mut String, value: &str, options: &EncodeOptions) {
    let bytes = value.as_bytes();
    let mut start = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        match step(bytes, idx, options) {
            Step::Raw(n) => idx += n,
            Step::Control(byte) => {
                out.push_str(&value[start..idx]);
                push_control_escape(out, byte, options.hex_case);
                idx += 1;
                start = idx;
            }
            Step::Unicode(unit, n) => {
                out.push_str(&value[start..idx]);
                push_unicode_escape(out, unit, options.hex_case);
                idx += n;
                start = idx;
            }
        }
    }
    if start < value.len() {
        out.push_str(&value[start..]);
    }
}

pub fn escape_string(value: &str, options: &EncodeOptions) -> String {
    let mut out = String::with_capacity(escaped_len(value, options));
    escape_string_into(&mut out, value, options);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::options::HexCase;

    #[rstest::rstest]
    #[case("plain", "plain")]
    #[case("", "")]
    #[case(r#"a\"b"#, "a\"b")]
    #[case(r"a\\b", "a\\b")]
    #[case(r"a\/b", "a/b")]
    #[case(r"\b\f\n\r\t", "\u{8}\u{c}\n\r\t")]
    #[case(r"\u0041", "A")]
    #[case(r"\u00e9", "\u{e9}")]
    #[case(r"x\u20ACy", "x\u{20ac}y")]
    #[case(r"\uD83D\uDE00", "\u{1F600}")]
    #[case(r"\u0000", "\u{0}")]
    #[case(r"caf\u00e9 \u00E9t\u00e9", "caf\u{e9} \u{e9}t\u{e9}")]
    #[case("raw \u{e9}", "raw \u{e9}")]
    fn test_unescape(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unescape(raw).unwrap(), expected);
    }

    #[rstest::rstest]
    #[case(r"\x", 0)]
    #[case(r"ab\", 2)]
    #[case(r"\u12", 0)]
    #[case(r"\u12G4", 0)]
    #[case(r"ok\uDE00", 2)]
    #[case(r"\uD83D", 0)]
    #[case(r"\uD83Dx", 0)]
    #[case(r"\uD83DA", 0)]
    fn test_unescape_rejects(#[case] raw: &str, #[case] offset: usize) {
        let err = unescape(raw).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidEscape);
        assert_eq!(err.offset, offset);
    }

    #[rstest::rstest]
    #[case("plain", "plain")]
    #[case("say \"hi\"", r#"say \"hi\""#)]
    #[case("a\\b", r"a\\b")]
    #[case("a/b", r"a\/b")]
    #[case("\u{8}\u{c}\n\r\t", r"\b\f\n\r\t")]
    #[case("\u{1}\u{1f}", r"\u0001\u001f")]
    #[case("\u{e9}", r"\u00e9")]
    #[case("\u{7ff}", r"\u07ff")]
    #[case("\u{20ac}5", r"\u20ac5")]
    #[case("\u{1F600}", "\u{1F600}")]
    fn test_escape_default(#[case] value: &str, #[case] expected: &str) {
        let options = EncodeOptions::default();
        let escaped = escape_string(value, &options);
        assert_eq!(escaped, expected);
        assert_eq!(escaped_len(value, &options), expected.len());
    }

    #[rstest::rstest]
    fn test_escape_options() {
        let upper = EncodeOptions::new().with_hex_case(HexCase::Upper);
        assert_eq!(escape_string("\u{e9}\u{1f}", &upper), r"\u00E9\u001F");

        let raw = EncodeOptions::new()
            .with_escape_unicode(false)
            .with_escape_slash(false);
        assert_eq!(escape_string("caf\u{e9}/\n", &raw), "caf\u{e9}/\\n");
        assert_eq!(escaped_len("caf\u{e9}/\n", &raw), "caf\u{e9}/\\n".len());
    }

    #[rstest::rstest]
    #[case("plain text")]
    #[case("tab\there \"quoted\" back\\slash / \u{0}")]
    #[case("\u{e9}\u{4f60}\u{597d}\u{1F600}")]
    fn test_escape_then_unescape(#[case] value: &str) {
        let escaped = escape_string(value, &EncodeOptions::default());
        assert_eq!(unescape(&escaped).unwrap(), value);
    }
}
