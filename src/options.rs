//! Configuration options for delimited output.
//!
//! This module provides types to customize the output format:
//!
//! - [`DelimOptions`]: Main configuration struct
//! - [`Delimiter`]: The field separator (comma, tab, pipe, semicolon, or any other ASCII character)
//!
//! Options are fixed for the duration of one encode call.
//!
//! ## Examples
//!
//! ```rust
//! use delimwrite::{table, to_string_with_options, DelimOptions, Delimiter};
//!
//! let data = table! { "x" => vec![1, 2], "y" => vec![3, 4] };
//!
//! // Tab separated, no header
//! let options = DelimOptions::tsv().with_header(false);
//! let tsv = to_string_with_options(&data, &options).unwrap();
//! assert_eq!(tsv, "1\t3\n2\t4\n");
//!
//! // Empty string for missing values
//! let options = DelimOptions::new().with_na("");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Field separator.
///
/// # Examples
///
/// ```rust
/// use delimwrite::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Other(':').as_char(), ':');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
    Other(char),
}

impl Delimiter {
    /// Returns the character this delimiter writes.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
            Delimiter::Other(c) => *c,
        }
    }

    /// Returns the delimiter as a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] for non-ASCII characters and for
    /// characters the quoting rules rely on (`"`, `\n`, `\r`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::Delimiter;
    ///
    /// assert_eq!(Delimiter::Pipe.as_byte().unwrap(), b'|');
    /// assert!(Delimiter::Other('"').as_byte().is_err());
    /// assert!(Delimiter::Other('é').as_byte().is_err());
    /// ```
    pub fn as_byte(&self) -> Result<u8> {
        let c = self.as_char();
        if !c.is_ascii() || matches!(c, '"' | '\n' | '\r') {
            return Err(Error::InvalidDelimiter(c));
        }
        Ok(c as u8)
    }
}

impl From<char> for Delimiter {
    fn from(c: char) -> Self {
        match c {
            ',' => Delimiter::Comma,
            '\t' => Delimiter::Tab,
            '|' => Delimiter::Pipe,
            ';' => Delimiter::Semicolon,
            other => Delimiter::Other(other),
        }
    }
}

/// Configuration options for delimited output.
///
/// # Examples
///
/// ```rust
/// use delimwrite::{DelimOptions, Delimiter};
///
/// let options = DelimOptions::new()
///     .with_delimiter(Delimiter::Semicolon)
///     .with_na("")
///     .with_header(false);
/// assert_eq!(options.delimiter.as_char(), ';');
/// assert_eq!(options.na, "");
/// assert!(!options.header);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimOptions {
    /// Field separator
    pub delimiter: Delimiter,
    /// Text written for a missing value of any type
    pub na: String,
    /// Whether to write the column names as the first line
    pub header: bool,
    /// Append to a file destination instead of truncating it
    pub append: bool,
}

impl Default for DelimOptions {
    fn default() -> Self {
        DelimOptions {
            delimiter: Delimiter::default(),
            na: "NA".to_string(),
            header: true,
            append: false,
        }
    }
}

impl DelimOptions {
    /// Creates default options (comma delimiter, `NA` marker, header on, truncate).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::DelimOptions;
    ///
    /// let options = DelimOptions::new();
    /// assert_eq!(options.na, "NA");
    /// assert!(options.header);
    /// assert!(!options.append);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma separated values. Same as [`DelimOptions::new`].
    #[must_use]
    pub fn csv() -> Self {
        Self::default()
    }

    /// Tab separated values.
    #[must_use]
    pub fn tsv() -> Self {
        DelimOptions {
            delimiter: Delimiter::Tab,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Sets the missing value marker. Compared byte for byte against text values.
    #[must_use]
    pub fn with_na(mut self, na: impl Into<String>) -> Self {
        self.na = na.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Only affects file destinations.
    #[must_use]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }
}
