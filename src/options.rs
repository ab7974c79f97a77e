use crate::constants::MAX_DEPTH;

/// Which characters the parser skips between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Whitespace {
    /// ASCII space only.
    #[default]
    Space,
    /// Space, tab, line feed and carriage return.
    Json,
}

impl Whitespace {
    #[inline]
    pub fn skips(self, byte: u8) -> bool {
        match self {
            Whitespace::Space => byte == b' ',
            Whitespace::Json => matches!(byte, b' ' | b'\t' | b'\n' | b'\r'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexCase {
    Upper,
    #[default]
    Lower,
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub whitespace: Whitespace,
    pub strict_literals: bool,
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitespace(mut self, whitespace: Whitespace) -> Self {
        self.whitespace = whitespace;
        self
    }

    /// When disabled, `t`/`f` consume four/five characters without checking
    /// the spelling.
    pub fn with_strict_literals(mut self, strict_literals: bool) -> Self {
        self.strict_literals = strict_literals;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            whitespace: Whitespace::default(),
            strict_literals: true,
            max_depth: MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub hex_case: HexCase,
    pub escape_unicode: bool,
    pub escape_slash: bool,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hex_case(mut self, hex_case: HexCase) -> Self {
        self.hex_case = hex_case;
        self
    }

    /// Escape two- and three-byte UTF-8 sequences as `\uXXXX`.
    pub fn with_escape_unicode(mut self, escape_unicode: bool) -> Self {
        self.escape_unicode = escape_unicode;
        self
    }

    pub fn with_escape_slash(mut self, escape_slash: bool) -> Self {
        self.escape_slash = escape_slash;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            hex_case: HexCase::default(),
            escape_unicode: true,
            escape_slash: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_encode_defaults() {
        let opts = EncodeOptions::default();
        assert_eq!(opts.hex_case, HexCase::Lower);
        assert!(opts.escape_unicode);
        assert!(opts.escape_slash);
    }

    #[rstest::rstest]
    fn test_parse_defaults() {
        let opts = ParseOptions::default();
        assert_eq!(opts.whitespace, Whitespace::Space);
        assert!(opts.strict_literals);
        assert_eq!(opts.max_depth, MAX_DEPTH);
    }

    #[rstest::rstest]
    #[case(Whitespace::Space, b' ', true)]
    #[case(Whitespace::Space, b'\n', false)]
    #[case(Whitespace::Space, b'\t', false)]
    #[case(Whitespace::Json, b'\n', true)]
    #[case(Whitespace::Json, b'\r', true)]
    #[case(Whitespace::Json, b'x', false)]
    fn test_whitespace_skips(#[case] mode: Whitespace, #[case] byte: u8, #[case] expected: bool) {
        assert_eq!(mode.skips(byte), expected);
    }

    #[rstest::rstest]
    fn test_encode_builder() {
        let opts = EncodeOptions::new()
            .with_hex_case(HexCase::Upper)
            .with_escape_unicode(false)
            .with_escape_slash(false);
        assert_eq!(opts.hex_case, HexCase::Upper);
        assert!(!opts.escape_unicode);
        assert!(!opts.escape_slash);
    }
}
