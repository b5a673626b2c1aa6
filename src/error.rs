//! Error types for reading and writing bracketed-table text.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: a character that is not allowed in the current parser
//!   state, with its character position
//! - **Number Errors**: a bare token that is not a valid floating-point number
//! - **Duplicate Tables**: the same table name appearing twice in one document
//! - **Unexpected End**: input that stops inside a table, row or string
//! - **Schema / Shape Errors**: invalid schema definitions, or datasets that do not
//!   fit their schema
//! - **Unsupported Tables / Values**: generator or generic tables, and strings the
//!   format cannot express
//!
//! Positions are 0-based offsets counted in characters, not bytes. Parser errors
//! also carry a 1-based line and column for display.
//!
//! ## Examples
//!
//! ```rust
//! use opl_text::{from_str, Error};
//!
//! let err = from_str("a = {\n<1x>\n};\n").unwrap_err();
//! assert!(matches!(err, Error::InvalidNumber { .. }));
//! assert!(err.to_string().contains("'1x'"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while reading or writing bracketed-table text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Character not allowed in the current parser state
    #[error(
        "Syntax error at character position {position} (line {line}, column {col}): {msg}"
    )]
    Syntax {
        position: usize,
        line: usize,
        col: usize,
        character: char,
        msg: String,
    },

    /// A table name was declared twice
    #[error("Duplicate table name '{name}' at character position {position} (line {line}, column {col})")]
    DuplicateTable {
        name: String,
        position: usize,
        line: usize,
        col: usize,
    },

    /// A bare field token that does not parse as a number
    #[error("Field '{token}' is not a valid number at character position {position} (line {line}, column {col})")]
    InvalidNumber {
        token: String,
        position: usize,
        line: usize,
        col: usize,
    },

    /// Input ended while a table, row or string was still open
    #[error("Unexpected end of input at character position {position}: {state}")]
    UnexpectedEof { state: String, position: usize },

    /// Invalid schema definition
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// Dataset does not match its schema
    #[error("Dataset does not match schema: {0}")]
    Shape(String),

    /// Table variant the text format cannot carry
    #[error("Table '{table}' is a {kind} table, which cannot be written as bracketed-table text")]
    UnsupportedTable { table: String, kind: String },

    /// Value the text format cannot express
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error for `character` found at `position`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::Error;
    ///
    /// let err = Error::syntax(7, 2, 3, '}', "unrecognized '}'");
    /// assert!(err.to_string().contains("position 7"));
    /// ```
    pub fn syntax(position: usize, line: usize, col: usize, character: char, msg: &str) -> Self {
        Error::Syntax {
            position,
            line,
            col,
            character,
            msg: msg.to_string(),
        }
    }

    pub fn duplicate_table(name: &str, position: usize, line: usize, col: usize) -> Self {
        Error::DuplicateTable {
            name: name.to_string(),
            position,
            line,
            col,
        }
    }

    pub fn invalid_number(token: &str, position: usize, line: usize, col: usize) -> Self {
        Error::InvalidNumber {
            token: token.to_string(),
            position,
            line,
            col,
        }
    }

    /// Creates an unexpected end-of-input error; `state` describes what was left open.
    pub fn unexpected_eof(state: &str, position: usize) -> Self {
        Error::UnexpectedEof {
            state: state.to_string(),
            position,
        }
    }

    pub fn schema<T: fmt::Display>(msg: T) -> Self {
        Error::Schema(msg.to_string())
    }

    /// Creates a shape error describing how a dataset differs from its schema.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::Error;
    ///
    /// let err = Error::shape("table 'foods' is missing field 'cost'");
    /// assert!(err.to_string().contains("foods"));
    /// ```
    pub fn shape<T: fmt::Display>(msg: T) -> Self {
        Error::Shape(msg.to_string())
    }

    pub fn unsupported_table(table: &str, kind: &str) -> Self {
        Error::UnsupportedTable {
            table: table.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn unsupported_value<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the character position the error points at, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax { position, .. }
            | Error::DuplicateTable { position, .. }
            | Error::InvalidNumber { position, .. }
            | Error::UnexpectedEof { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
