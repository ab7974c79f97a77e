use std::num::IntErrorKind;

use smol_str::SmolStr;

use crate::constants::{is_number_byte, is_number_start, FALSE_LITERAL, TRUE_LITERAL};
use crate::decode::scanner::{Scanner, StringEnd};
use crate::error::{ErrorKind, ErrorStage};
use crate::options::ParseOptions;
use crate::text::string::unescape;
use crate::types::{KeyNode, Node, NodeList};
use crate::Result;

/// Which container the parser is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    TopLevel,
    InObject,
    InArray,
    /// Between a key and the end of its single value.
    AwaitingKeyValue,
}

/// What a state does with the byte under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Skip,
    Key,
    Value,
    /// Consume the closer and hand the children back.
    Close,
    /// Hand the children back, leaving the byte for the caller.
    Yield,
    /// Consume the byte and hand the children back.
    YieldConsume,
    Mismatched,
    Unbalanced,
    Illegal,
}

#[inline]
fn starts_value(byte: u8) -> bool {
    matches!(byte, b'{' | b'[' | b'"' | b't' | b'f') || is_number_start(byte)
}

fn transition(state: State, byte: u8) -> Transition {
    use State::*;
    use Transition::*;

    match (state, byte) {
        (InObject, b'"') => Key,
        (InObject, b',') => Skip,
        (InObject, b'}') => Close,
        (InObject, b']') => Mismatched,
        (InObject, _) => Illegal,

        (InArray, b',') => Skip,
        (InArray, b']') => Close,
        (InArray, b'}') => Mismatched,

        (AwaitingKeyValue, b':') => Skip,
        (AwaitingKeyValue, b',') => YieldConsume,
        (AwaitingKeyValue, b'}') => Yield,
        (AwaitingKeyValue, b']') => Mismatched,

        (TopLevel, b',') => Skip,
        (TopLevel, b'}' | b']') => Unbalanced,

        (_, byte) if starts_value(byte) => Value,
        _ => Illegal,
    }
}

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(input),
            options,
        }
    }

    /// Reads the whole input as exactly one value.
    pub fn parse_document(&mut self) -> Result<Node> {
        let mut roots = self.read_children(State::TopLevel, 0)?;
        roots.pop().ok_or_else(|| {
            self.scanner
                .error(ErrorKind::EmptyDocument, "document contains no value")
        })
    }

    fn read_children(&mut self, state: State, depth: usize) -> Result<NodeList> {
        let mut children = NodeList::new();
        loop {
            self.scanner.skip_whitespace(self.options.whitespace);
            let Some(byte) = self.scanner.peek() else {
                return self.finish(state, children);
            };
            let offset = self.scanner.position();

            match transition(state, byte) {
                Transition::Skip => self.scanner.advance(1),
                Transition::Close => {
                    self.scanner.advance(1);
                    return Ok(children);
                }
                Transition::Yield => return Ok(children),
                Transition::YieldConsume => {
                    self.scanner.advance(1);
                    return Ok(children);
                }
                Transition::Key => {
                    let name = self.read_string()?;
                    let value = self.read_children(State::AwaitingKeyValue, depth)?;
                    if value.is_empty() {
                        return Err(self.scanner.error_at(
                            offset,
                            ErrorKind::MissingValue,
                            format!("key \"{name}\" has no value"),
                        ));
                    }
                    let entry = KeyNode::from_parts(SmolStr::from(name), value);
                    self.push(&mut children, Node::Key(entry))?;
                }
                Transition::Value => {
                    self.check_slot(state, &children, offset)?;
                    let node = self.read_value(byte, depth)?;
                    self.push(&mut children, node)?;
                }
                Transition::Mismatched => {
                    return Err(self.scanner.error(
                        ErrorKind::MismatchedBracket,
                        format!(
                            "{} does not close the enclosing {}",
                            self.scanner.describe(offset),
                            container_name(state)
                        ),
                    ));
                }
                Transition::Unbalanced => {
                    return Err(self.scanner.error(
                        ErrorKind::UnbalancedBrackets,
                        format!("unmatched {}", self.scanner.describe(offset)),
                    ));
                }
                Transition::Illegal => {
                    return Err(self.scanner.error(
                        ErrorKind::IllegalCharacter,
                        format!("unexpected {}", self.scanner.describe(offset)),
                    ));
                }
            }
        }
    }

    fn finish(&self, state: State, children: NodeList) -> Result<NodeList> {
        match state {
            State::TopLevel | State::AwaitingKeyValue => Ok(children),
            State::InObject | State::InArray => Err(self.scanner.error(
                ErrorKind::UnbalancedBrackets,
                format!("unclosed {}", container_name(state)),
            )),
        }
    }

    /// A key takes one value and a document one root; anything more is an error.
    fn check_slot(&self, state: State, children: &NodeList, offset: usize) -> Result<()> {
        if children.is_empty() {
            return Ok(());
        }
        match state {
            State::TopLevel => Err(self.scanner.error_at(
                offset,
                ErrorKind::TrailingValue,
                "unexpected value after the document root",
            )),
            State::AwaitingKeyValue => Err(self.scanner.error_at(
                offset,
                ErrorKind::KeyHasMultipleChildren,
                "key already has a value",
            )),
            State::InObject | State::InArray => Ok(()),
        }
    }

    fn push(&self, children: &mut NodeList, node: Node) -> Result<()> {
        children
            .push(node)
            .map_err(|err| err.with_stage(ErrorStage::Parse))
    }

    fn read_value(&mut self, byte: u8, depth: usize) -> Result<Node> {
        match byte {
            b'{' => {
                let depth = self.enter(depth)?;
                self.scanner.advance(1);
                Ok(Node::Object(self.read_children(State::InObject, depth)?))
            }
            b'[' => {
                let depth = self.enter(depth)?;
                self.scanner.advance(1);
                Ok(Node::Array(self.read_children(State::InArray, depth)?))
            }
            b'"' => Ok(Node::String(self.read_string()?)),
            b't' => self.read_literal(TRUE_LITERAL, true),
            b'f' => self.read_literal(FALSE_LITERAL, false),
            _ => self.read_number(),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(self.scanner.error(
                ErrorKind::DepthLimitExceeded,
                format!("nesting exceeds the limit of {}", self.options.max_depth),
            ));
        }
        Ok(depth)
    }

    /// Reads a quoted string starting at the opening quote.
    fn read_string(&mut self) -> Result<String> {
        let open = self.scanner.position();
        let body = open + 1;
        let close = match self.scanner.find_string_end(body) {
            StringEnd::Closed(close) => close,
            StringEnd::Unterminated => {
                return Err(self.scanner.error_at(
                    open,
                    ErrorKind::UnterminatedString,
                    "string is never closed",
                ));
            }
        };
        let raw = self.scanner.slice(body, close);
        self.scanner.advance(close + 1 - open);
        unescape(raw).map_err(|err| {
            self.scanner
                .error_at(body + err.offset, err.kind, err.message)
        })
    }

    fn read_literal(&mut self, word: &str, value: bool) -> Result<Node> {
        let remaining = self.scanner.remaining();
        let accepted = if self.options.strict_literals {
            remaining.starts_with(word.as_bytes())
        } else {
            remaining.len() >= word.len()
        };
        if !accepted {
            return Err(self.scanner.error(
                ErrorKind::InvalidLiteral,
                format!("expected `{word}`"),
            ));
        }
        self.scanner.advance(word.len());
        Ok(Node::Bool(value))
    }

    fn read_number(&mut self) -> Result<Node> {
        let (start, end) = self.scanner.take_while(is_number_byte);
        let text = self.scanner.slice(start, end);
        let invalid = || {
            self.scanner
                .error_at(start, ErrorKind::InvalidNumber, format!("invalid number `{text}`"))
        };
        let float = || {
            let value = text.parse::<f64>().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(self.scanner.error_at(
                    start,
                    ErrorKind::NonFiniteFloat,
                    format!("number `{text}` is out of range"),
                ));
            }
            Ok(Node::Float(value))
        };

        let is_float = text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
        if is_float {
            return float();
        }
        match text.parse::<i64>() {
            Ok(value) => Ok(Node::Int(value)),
            Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                float()
            }
            Err(_) => Err(invalid()),
        }
    }
}

fn container_name(state: State) -> &'static str {
    match state {
        State::InObject | State::AwaitingKeyValue => "object",
        State::InArray => "array",
        State::TopLevel => "document",
    }
}
