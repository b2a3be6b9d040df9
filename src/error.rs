use std::fmt;
use std::io;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ThisError)]
pub enum ErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid initial character")]
    InvalidInitialCharacter,
    #[error("invalid number format")]
    InvalidNumberFormat,
    #[error("invalid constant")]
    InvalidConstant,
    #[error("invalid hash key")]
    InvalidHashKey,
    #[error("invalid object or array format")]
    InvalidObjectOrArrayFormat,
    #[error("trailing characters")]
    TrailingCharacters,
    #[error("key not found")]
    KeyNotFound,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
    #[error("i/o error")]
    Io,
}

/// An error raised while reading, parsing or looking up JSON.
///
/// Parse errors carry the absolute character offset at which they were
/// detected. Offsets count one per character read, starting at 1, and the
/// read that hits end-of-input counts as a position of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: Option<usize>,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset: None,
            message: message.into(),
        }
    }

    pub fn at(kind: ErrorKind, offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset: Some(offset),
            message: message.into(),
        }
    }

    pub fn key_not_found(key: &str) -> Self {
        Self::new(ErrorKind::KeyNotFound, format!("no entry for key {key:?}"))
    }

    pub fn io(err: io::Error) -> Self {
        Self::new(ErrorKind::Io, err.to_string())
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn with_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{}: {} at offset {offset}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn display_includes_offset_when_present() {
        let err = Error::at(ErrorKind::TrailingCharacters, 3, "expected end of input, found '2'");
        assert_eq!(
            err.to_string(),
            "trailing characters: expected end of input, found '2' at offset 3"
        );
    }

    #[rstest::rstest]
    fn display_without_offset() {
        let err = Error::key_not_found("missing");
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(err.offset(), None);
        assert_eq!(err.to_string(), "key not found: no entry for key \"missing\"");
    }

    #[rstest::rstest]
    fn io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind, ErrorKind::Io);
        assert_eq!(err.message, "gone");
    }
}
