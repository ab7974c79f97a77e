use memchr::{memchr2, memchr_iter, memrchr};

use crate::error::{Error, ErrorKind, Location};
use crate::options::Whitespace;

/// Outcome of looking for the closing quote of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringEnd {
    /// Byte offset of the closing quote.
    Closed(usize),
    Unterminated,
}

/// A single read position shared by every step of the parser.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.input.len());
    }

    pub fn skip_whitespace(&mut self, whitespace: Whitespace) -> usize {
        let bytes = self.input.as_bytes();
        let start = self.position;
        while self.position < bytes.len() && whitespace.skips(bytes[self.position]) {
            self.position += 1;
        }
        self.position - start
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.input.as_bytes()[self.position..]
    }

    /// Text of `[start, end)`; both offsets must fall on ASCII bytes.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Consumes bytes while `accept` holds and returns the consumed range.
    pub fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> (usize, usize) {
        let start = self.position;
        let bytes = self.input.as_bytes();
        while self.position < bytes.len() && accept(bytes[self.position]) {
            self.position += 1;
        }
        (start, self.position)
    }

    /// Finds the quote closing a string whose body starts at `body_start`.
    /// Backslash pairs are skipped so an escaped quote never ends the string.
    pub fn find_string_end(&self, body_start: usize) -> StringEnd {
        let bytes = self.input.as_bytes();
        let mut idx = body_start;
        while idx < bytes.len() {
            let Some(offset) = memchr2(b'"', b'\\', &bytes[idx..]) else {
                break;
            };
            let found = idx + offset;
            if bytes[found] == b'"' {
                return StringEnd::Closed(found);
            }
            idx = found + 2;
        }
        StringEnd::Unterminated
    }

    pub fn location(&self, offset: usize) -> Location {
        let bytes = self.input.as_bytes();
        let offset = offset.min(bytes.len());
        let before = &bytes[..offset];
        let line = memchr_iter(b'\n', before).count() + 1;
        let line_start = memrchr(b'\n', before).map_or(0, |idx| idx + 1);
        let column = self
            .input
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count())
            + 1;
        Location {
            offset,
            line,
            column,
        }
    }

    /// Printable form of the character at `offset`.
    pub fn describe(&self, offset: usize) -> String {
        match self.input.get(offset..).and_then(|rest| rest.chars().next()) {
            Some(ch) => format!("'{}'", ch.escape_debug()),
            None => match self.input.as_bytes().get(offset) {
                Some(byte) => format!("byte 0x{byte:02X}"),
                None => "end of input".to_string(),
            },
        }
    }

    pub fn error_at(&self, offset: usize, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::parse(kind, message).with_location(self.location(offset))
    }

    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        self.error_at(self.position, kind, message)
    }
}
