//! Error types for delimited text encoding.
//!
//! The encoder streams: once bytes reach the sink they stay there. Errors are
//! therefore split by *when* they can happen.
//!
//! ## Error Categories
//!
//! - **Before writing**: [`Error::Open`] (destination cannot be opened),
//!   [`Error::InvalidDelimiter`] and [`Error::LengthMismatch`] (input rejected).
//!   Nothing has been written when these are returned.
//! - **While writing**: [`Error::UnsupportedType`] (a column kind with no text
//!   encoding) and [`Error::Io`] (the sink refused bytes). Whatever was written
//!   before the failure remains in the sink.
//!
//! ## Examples
//!
//! ```rust
//! use delimwrite::{to_string, Column, Error, Table};
//!
//! let mut table = Table::new();
//! table.insert("bytes", Column::Raw(vec![0x01, 0x02]));
//!
//! let err = to_string(&table).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedType(_)));
//! assert!(err.to_string().contains("raw"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a table.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The destination file could not be opened for writing
    #[error("Failed to open '{}': {msg}", .path.display())]
    Open { path: PathBuf, msg: String },

    /// Writing to or flushing the sink failed
    #[error("IO error: {0}")]
    Io(String),

    /// A column kind that has no delimited text encoding
    #[error("Don't know how to handle vector of type {0}.")]
    UnsupportedType(String),

    /// Delimiter that would make the output ambiguous
    #[error("Invalid delimiter {0:?}: must be a single ASCII character other than '\"', '\\n' or '\\r'")]
    InvalidDelimiter(char),

    /// Columns of different lengths
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an open error naming the destination path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::Error;
    ///
    /// let err = Error::open("/no/such/dir/out.csv", "No such file or directory");
    /// assert!(err.to_string().starts_with("Failed to open '/no/such/dir/out.csv'"));
    /// ```
    pub fn open(path: impl AsRef<Path>, msg: impl fmt::Display) -> Self {
        Error::Open {
            path: path.as_ref().to_path_buf(),
            msg: msg.to_string(),
        }
    }

    /// Creates an I/O error for write or flush failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an unsupported type error naming the column kind.
    pub fn unsupported_type(type_name: &str) -> Self {
        Error::UnsupportedType(type_name.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
