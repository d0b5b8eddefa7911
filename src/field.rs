//! Encoding of individual fields.
//!
//! Each cell becomes one field of text:
//!
//! | Cell | Output |
//! |------|--------|
//! | missing (any type) | the NA marker, never quoted |
//! | logical | `TRUE` / `FALSE` |
//! | integer | decimal digits |
//! | double | shortest round-trip text, or `NaN`, `Inf`, `-Inf` |
//! | character | as is, or quoted when [`needs_quote`] says so |
//!
//! Quoting wraps the text in `"` and doubles every embedded `"`. Nothing else
//! is escaped: delimiters and line breaks appear literally inside the quotes.

use crate::dtoa::{self, BUFFER_SIZE};
use crate::Cell;
use std::io::{self, Write};

/// Returns `true` if a text value must be quoted.
///
/// A value is quoted when it equals the NA marker (so it cannot be mistaken
/// for a missing value) or contains `\n`, `\r`, `"` or the delimiter.
///
/// # Examples
///
/// ```rust
/// use delimwrite::field::needs_quote;
///
/// assert!(needs_quote("a,b", b',', "NA"));
/// assert!(needs_quote("NA", b',', "NA"));
/// assert!(!needs_quote("a,b", b'\t', "NA"));
/// assert!(!needs_quote("abc", b',', "NA"));
/// ```
#[inline]
#[must_use]
pub fn needs_quote(s: &str, delimiter: u8, na: &str) -> bool {
    s == na
        || s
            .bytes()
            .any(|b| b == b'\n' || b == b'\r' || b == b'"' || b == delimiter)
}

/// Writes a text value, quoting and escaping it if needed.
pub fn write_text<W: Write + ?Sized>(
    out: &mut W,
    s: &str,
    delimiter: u8,
    na: &str,
) -> io::Result<()> {
    if !needs_quote(s, delimiter, na) {
        return out.write_all(s.as_bytes());
    }

    out.write_all(b"\"")?;
    let mut rest = s;
    while let Some(pos) = rest.find('"') {
        out.write_all(rest[..=pos].as_bytes())?;
        out.write_all(b"\"")?;
        rest = &rest[pos + 1..];
    }
    out.write_all(rest.as_bytes())?;
    out.write_all(b"\"")
}

/// Writes one cell.
pub fn write_cell<W: Write + ?Sized>(
    out: &mut W,
    cell: Cell<'_>,
    delimiter: u8,
    na: &str,
) -> io::Result<()> {
    match cell {
        Cell::Logical(None) | Cell::Integer(None) | Cell::Double(None) | Cell::Character(None) => {
            out.write_all(na.as_bytes())
        }
        Cell::Logical(Some(true)) => out.write_all(b"TRUE"),
        Cell::Logical(Some(false)) => out.write_all(b"FALSE"),
        Cell::Integer(Some(value)) => write_integer(out, value),
        Cell::Double(Some(value)) if !value.is_finite() => {
            out.write_all(dtoa::non_finite_literal(value).as_bytes())
        }
        Cell::Double(Some(value)) => {
            let mut buf = [0u8; BUFFER_SIZE];
            let len = dtoa::format_finite(value, &mut buf);
            out.write_all(&buf[..len])
        }
        Cell::Character(Some(s)) => write_text(out, s, delimiter, na),
    }
}

#[inline]
fn write_integer<W: Write + ?Sized>(out: &mut W, value: i64) -> io::Result<()> {
    let mut buf = [0u8; 20];
    let mut i = buf.len();
    let mut magnitude = value.unsigned_abs();
    loop {
        i -= 1;
        buf[i] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        out.write_all(b"-")?;
    }
    out.write_all(&buf[i..])
}

/// Encodes one cell into a new `String`.
///
/// The table encoder streams cells straight into its sink; this is the same
/// encoding materialized, for callers that want a single field.
///
/// # Examples
///
/// ```rust
/// use delimwrite::{encode_scalar, Cell};
///
/// assert_eq!(encode_scalar(Cell::Logical(Some(true)), b',', "NA"), "TRUE");
/// assert_eq!(encode_scalar(Cell::Double(None), b',', "NA"), "NA");
/// assert_eq!(encode_scalar(Cell::Double(Some(f64::NEG_INFINITY)), b',', "NA"), "-Inf");
/// assert_eq!(
///     encode_scalar(Cell::Character(Some("He said \"hi\"")), b',', "NA"),
///     "\"He said \"\"hi\"\"\""
/// );
/// ```
#[must_use]
pub fn encode_scalar(cell: Cell<'_>, delimiter: u8, na: &str) -> String {
    let mut out = Vec::with_capacity(BUFFER_SIZE);
    // Writing into a Vec cannot fail.
    let written = write_cell(&mut out, cell, delimiter, na);
    debug_assert!(written.is_ok());
    String::from_utf8(out).unwrap_or_default()
}
