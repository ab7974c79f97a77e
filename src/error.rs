use thiserror::Error as ThisError;

/// What went wrong. Every kind maps to a distinct bit (see [`ErrorKind::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfMemory,
    KeyHasMultipleChildren,
    IllegalCharacter,
    InvalidType,
    /// Reserved. Arrays holding a `Key` are reported as [`ErrorKind::InvalidType`].
    KeyInArray,
    UnbalancedBrackets,
    MismatchedBracket,
    UnterminatedString,
    InvalidEscape,
    InvalidNumber,
    InvalidLiteral,
    MissingValue,
    EmptyDocument,
    TrailingValue,
    DepthLimitExceeded,
    NonFiniteFloat,
    InvalidUtf8,
    IndexOutOfRange,
    Io,
    Unsupported,
}

impl ErrorKind {
    /// Numeric error code. Never zero; zero means "no error" to callers that
    /// still speak in codes.
    pub fn code(self) -> u32 {
        match self {
            ErrorKind::OutOfMemory => 1,
            ErrorKind::KeyHasMultipleChildren => 2,
            ErrorKind::IllegalCharacter => 4,
            ErrorKind::InvalidType => 8,
            ErrorKind::KeyInArray => 16,
            ErrorKind::UnbalancedBrackets => 32,
            ErrorKind::MismatchedBracket => 64,
            ErrorKind::UnterminatedString => 128,
            ErrorKind::InvalidEscape => 256,
            ErrorKind::InvalidNumber => 512,
            ErrorKind::InvalidLiteral => 1024,
            ErrorKind::MissingValue => 2048,
            ErrorKind::EmptyDocument => 4096,
            ErrorKind::TrailingValue => 8192,
            ErrorKind::DepthLimitExceeded => 16384,
            ErrorKind::NonFiniteFloat => 32768,
            ErrorKind::InvalidUtf8 => 65536,
            ErrorKind::IndexOutOfRange => 131072,
            ErrorKind::Io => 262144,
            ErrorKind::Unsupported => 524288,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Parse,
    Serialize,
    Tree,
}

/// Byte offset plus 1-based line and column of the offending character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub stage: ErrorStage,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    pub fn new(kind: ErrorKind, stage: ErrorStage, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            message: message.into(),
            location: None,
        }
    }

    pub fn out_of_memory(stage: ErrorStage) -> Self {
        Self::new(ErrorKind::OutOfMemory, stage, "allocation failed")
    }

    pub fn parse(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, ErrorStage::Parse, message)
    }

    pub fn serialize(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, ErrorStage::Serialize, message)
    }

    pub fn tree(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, ErrorStage::Tree, message)
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.message = format!(
            "{} at line {} column {}",
            self.message, location.line, location.column
        );
        self.location = Some(location);
        self
    }

    pub fn with_stage(mut self, stage: ErrorStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Io, ErrorStage::Serialize, format!("io failed: {err}"))
    }
}
