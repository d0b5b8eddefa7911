//! Table serialization.
//!
//! This module provides the [`Serializer`] that streams a [`Table`] into any
//! [`io::Write`], and the [`Sink`] destinations the top-level functions pick
//! from.
//!
//! ## Output
//!
//! - Optional header line with the column names, encoded like text fields
//! - One line per row, fields separated by the delimiter
//! - Every line ends with `\n`; there is no trailing delimiter
//! - A table with no columns produces no output at all
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use delimwrite::{table, DelimOptions, Serializer};
//!
//! let data = table! {
//!     "id" => vec![Some(1), None],
//!     "name" => vec![Some("Al,ice"), None],
//! };
//!
//! let options = DelimOptions::new();
//! let mut serializer = Serializer::new(Vec::new(), &options);
//! serializer.serialize_table(&data).unwrap();
//!
//! let csv = String::from_utf8(serializer.into_inner()).unwrap();
//! assert_eq!(csv, "id,name\n1,\"Al,ice\"\nNA,NA\n");
//! ```

use crate::field::{write_cell, write_text};
use crate::{DelimOptions, Error, Result, Table};
use log::{debug, trace};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The delimited text serializer.
///
/// Borrows its options for the duration of the encode; holds no state
/// between tables.
pub struct Serializer<'o, W> {
    writer: W,
    options: &'o DelimOptions,
}

impl<'o, W: Write> Serializer<'o, W> {
    pub fn new(writer: W, options: &'o DelimOptions) -> Self {
        Serializer { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Writes `table` to the underlying writer.
    ///
    /// The delimiter and column lengths are checked before the first byte is
    /// written. After that, an unsupported column kind stops the encode at the
    /// first cell of that column; everything written so far stays written.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDelimiter`], [`Error::LengthMismatch`],
    /// [`Error::UnsupportedType`] or [`Error::Io`].
    pub fn serialize_table(&mut self, table: &Table) -> Result<()> {
        let delimiter = self.options.delimiter.as_byte()?;
        table.validate()?;

        let ncol = table.len();
        if ncol == 0 {
            return Ok(());
        }
        let na = self.options.na.as_str();

        if self.options.header {
            trace!("writing header for {} columns", ncol);
            for (j, name) in table.names().enumerate() {
                if j > 0 {
                    self.writer.write_all(&[delimiter])?;
                }
                write_text(&mut self.writer, name, delimiter, na)?;
            }
            self.writer.write_all(b"\n")?;
        }

        let nrow = table.nrow();
        for i in 0..nrow {
            for (j, column) in table.columns().enumerate() {
                if j > 0 {
                    self.writer.write_all(&[delimiter])?;
                }
                write_cell(&mut self.writer, column.cell(i)?, delimiter, na)?;
            }
            self.writer.write_all(b"\n")?;
        }

        debug!("encoded {} rows x {} columns", nrow, ncol);
        Ok(())
    }
}

/// Where encoded bytes go: an in-memory buffer or a buffered file.
#[derive(Debug)]
pub enum Sink {
    Memory(Vec<u8>),
    File(BufWriter<File>),
}

impl Sink {
    pub fn memory() -> Self {
        Sink::Memory(Vec::with_capacity(256))
    }

    /// Opens `path` for writing, truncating it unless `append` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] naming `path` if the file cannot be opened.
    pub fn open(path: &Path, append: bool) -> Result<Self> {
        debug!("opening '{}' (append: {})", path.display(), append);
        let mut open = OpenOptions::new();
        if append {
            open.append(true).create(true);
        } else {
            open.write(true).create(true).truncate(true);
        }
        let file = open.open(path).map_err(|e| Error::open(path, e))?;
        Ok(Sink::File(BufWriter::new(file)))
    }

    /// Returns the buffered bytes of a memory sink, `None` for a file sink.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Sink::Memory(bytes) => Some(bytes),
            Sink::File(_) => None,
        }
    }
}

impl Write for Sink {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Memory(bytes) => bytes.write(buf),
            Sink::File(file) => file.write(buf),
        }
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Memory(bytes) => bytes.write_all(buf),
            Sink::File(file) => file.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Memory(_) => Ok(()),
            Sink::File(file) => file.flush(),
        }
    }
}

/// Serializes `table` into `sink` and flushes it, whether or not encoding
/// succeeded. An encode error takes precedence over a flush error.
pub(crate) fn serialize_into(sink: &mut Sink, table: &Table, options: &DelimOptions) -> Result<()> {
    let result = Serializer::new(&mut *sink, options).serialize_table(table);
    let flushed = sink.flush().map_err(Error::from);
    result.and(flushed)
}
