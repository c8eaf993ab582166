use std::error::Error as StdError;
use std::fmt;

/// Stage that produced a [`SourceError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Tokenize,
    Parse,
}

/// A diagnostic tied to a location in the assembly source. Both the lexer
/// and the parser accumulate these instead of aborting, so a single run can
/// surface every problem in the file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceError {
    pub kind: ErrorKind,
    pub message: String,
    pub file: String,
    /// Zero-based; rendered one-based.
    pub line: usize,
    pub column: usize,
    pub line_text: String,
}

impl SourceError {
    pub fn tokenize(
        message: String,
        file: &str,
        line: usize,
        column: usize,
        line_text: &str,
    ) -> SourceError {
        SourceError {
            kind: ErrorKind::Tokenize,
            message,
            file: file.to_owned(),
            line,
            column,
            line_text: line_text.to_owned(),
        }
    }

    pub fn parse(
        message: String,
        file: &str,
        line: usize,
        column: usize,
        line_text: &str,
    ) -> SourceError {
        SourceError {
            kind: ErrorKind::Parse,
            message,
            file: file.to_owned(),
            line,
            column,
            line_text: line_text.to_owned(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "error: {} at {}:{}:{} (full line: {})",
            self.message,
            self.file,
            self.line + 1,
            self.column,
            self.line_text
        )
    }
}

impl StdError for SourceError {}
