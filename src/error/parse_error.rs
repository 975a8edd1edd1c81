use std::{fmt, path::PathBuf};

use crate::ast::Position;

/// Represents all fatal errors that can occur during lexing or parsing.
///
/// A fatal error aborts the parse of the current file. When the file was
/// reached through `include` or `use`, the error propagates to the including
/// parser as well.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer found a character that starts no token.
    #[error("Error at {position}: Unexpected character '{text}'.")]
    UnexpectedCharacter {
        /// The offending source text.
        text:     String,
        /// Where it was found.
        position: Position,
    },
    /// Found an unexpected token while parsing.
    #[error("Error at {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// Description of the token encountered.
        found:    String,
        /// Where the token starts.
        position: Position,
    },
    /// Reached the end of input inside a construct.
    #[error("Error at {position}: Unexpected end of input while parsing {context}.")]
    UnexpectedEndOfInput {
        /// The construct that was left open.
        context:  String,
        /// Position of the end-of-input sentinel.
        position: Position,
    },
    /// `assign` received an argument without a name.
    #[error("Error at {position}: Positional arguments are not allowed in assign blocks.")]
    PositionalAssign {
        /// Position of the argument.
        position: Position,
    },
    /// A source file could not be read.
    #[error("Failed to read '{}': {message}", path.display())]
    Io {
        /// The file that failed.
        path:    PathBuf,
        /// Description from the operating system.
        message: String,
    },
}

impl ParseError {
    /// Source position of the error, if it has one.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::PositionalAssign { position } => Some(*position),
            Self::Io { .. } => None,
        }
    }
}

/// A non-fatal problem found while parsing.
///
/// Diagnostics are logged through `tracing` as soon as they are raised and
/// collected on the parse session so callers can inspect them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human readable description.
    pub message:  String,
    /// Where the problem was found.
    pub position: Position,
    /// File being parsed, if the source came from a file.
    pub file:     Option<PathBuf>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}: {}", file.display(), self.position, self.message),
            None => write!(f, "{}: {}", self.position, self.message),
        }
    }
}
