mod parser;
mod scanner;

use std::io::Read;

use crate::error::{Error, ErrorKind, ErrorStage};
use crate::options::ParseOptions;
use crate::types::Node;
use crate::Result;

pub fn from_str(input: &str, options: &ParseOptions) -> Result<Node> {
    tracing::trace!(len = input.len(), "parsing document");
    let mut parser = parser::Parser::new(input, options);
    parser.parse_document().inspect_err(|err| {
        tracing::debug!(kind = ?err.kind, error = %err, "document rejected");
    })
}

pub fn from_slice(input: &[u8], options: &ParseOptions) -> Result<Node> {
    let text = std::str::from_utf8(input).map_err(|err| {
        Error::parse(ErrorKind::InvalidUtf8, format!("invalid utf-8: {err}"))
    })?;
    from_str(text, options)
}

pub fn from_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Node> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::from(err).with_stage(ErrorStage::Parse))?;
    from_str(&buf, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_from_slice_rejects_bad_utf8() {
        let err = from_slice(b"[\"\xFF\"]", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidUtf8);
        assert_eq!(err.stage, ErrorStage::Parse);
    }

    #[rstest::rstest]
    fn test_from_reader() {
        let node = from_reader(&b"[1,2]"[..], &ParseOptions::default()).unwrap();
        assert_eq!(node.children().map(|c| c.len()), Some(2));
    }

    #[rstest::rstest]
    fn test_from_reader_io_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("boom"))
            }
        }
        let err = from_reader(Broken, &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(err.stage, ErrorStage::Parse);
    }
}
