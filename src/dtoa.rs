//! Shortest round-trip formatting of `f64`.
//!
//! [`format_finite`] writes the shortest decimal text that parses back to the
//! exact same double. Digits come from Grisu3; when Grisu3 cannot prove its
//! answer, the digits are taken from the core library's exact shortest
//! exponential formatting instead. Either way the layout below is applied by
//! this module, so the output is identical whichever path produced the digits.
//!
//! ## Layout
//!
//! - Fixed notation (`123`, `1.5`, `0.25`) unless scientific notation
//!   (`1e5`, `1.5e-7`) is strictly shorter.
//! - Fixed notation always has a leading digit: `0.5`, never `.5`.
//! - Exponents carry no `+` and no zero padding.
//! - `-` for negative values, including `-0`.
//!
//! ## Examples
//!
//! ```rust
//! use delimwrite::dtoa::Buffer;
//!
//! let mut buffer = Buffer::new();
//! assert_eq!(buffer.format(0.1), "0.1");
//! assert_eq!(buffer.format(100000.0), "1e5");
//! assert_eq!(buffer.format(-1234.5), "-1234.5");
//! ```

use crate::grisu::{grisu3, Digits, MAX_DIGITS};
use std::fmt::{self, Write};

/// Capacity sufficient for any `f64` written by [`format_finite`].
pub const BUFFER_SIZE: usize = 32;

const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Writes the shortest round-trip text for `value` into `buf` and returns
/// the number of bytes written. The output is ASCII.
///
/// Intended for finite values; NaN and infinities are written as `NaN`,
/// `Inf` and `-Inf` instead of panicking.
///
/// # Examples
///
/// ```rust
/// use delimwrite::dtoa::{format_finite, BUFFER_SIZE};
///
/// let mut buf = [0u8; BUFFER_SIZE];
/// let len = format_finite(2.5e-8, &mut buf);
/// assert_eq!(&buf[..len], b"2.5e-8");
/// ```
pub fn format_finite(value: f64, buf: &mut [u8; BUFFER_SIZE]) -> usize {
    if !value.is_finite() {
        return write_literal(non_finite_literal(value), buf);
    }

    let bits = value.to_bits();
    let mut pos = 0;
    if bits & SIGN_MASK != 0 {
        buf[0] = b'-';
        pos = 1;
    }

    let abs_bits = bits & !SIGN_MASK;
    if abs_bits == 0 {
        buf[pos] = b'0';
        return pos + 1;
    }

    let digits = match grisu3(abs_bits) {
        Some(digits) => digits,
        None => exact_digits(f64::from_bits(abs_bits)),
    };
    pos + layout(digits.as_bytes(), digits.exponent, &mut buf[pos..])
}

/// Literal used for a non-finite double: `NaN`, `Inf` or `-Inf`.
#[must_use]
pub fn non_finite_literal(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "Inf"
    } else {
        "-Inf"
    }
}

fn write_literal(literal: &str, buf: &mut [u8; BUFFER_SIZE]) -> usize {
    let bytes = literal.as_bytes();
    buf[..bytes.len()].copy_from_slice(bytes);
    bytes.len()
}

/// Fixed-capacity `fmt::Write` target on the stack.
struct StackWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Write for StackWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Exact shortest digits for a positive finite double, used when Grisu3
/// bails out. `LowerExp` prints the shortest round-trip mantissa.
#[cold]
fn exact_digits(value: f64) -> Digits {
    let mut scratch = [0u8; BUFFER_SIZE];
    let mut writer = StackWriter {
        buf: &mut scratch,
        len: 0,
    };
    // At most 23 bytes ("d.dddddddddddddddde-308").
    let written = write!(writer, "{:e}", value);
    debug_assert!(written.is_ok(), "scratch buffer too small for {:e}", value);
    let len = writer.len;
    parse_exponential(&scratch[..len])
}

/// Splits `d[.ddd]e[-]x` into digits and the exponent of the last digit.
fn parse_exponential(text: &[u8]) -> Digits {
    let mut digits = Digits::empty();
    let split = text.iter().position(|&b| b == b'e').unwrap_or(text.len());
    let (mantissa, exponent) = text.split_at(split);

    for &b in mantissa {
        if b.is_ascii_digit() && digits.len < MAX_DIGITS {
            digits.buf[digits.len] = b;
            digits.len += 1;
        }
    }
    if digits.len == 0 {
        digits.buf[0] = b'0';
        digits.len = 1;
    }

    let exponent = exponent.get(1..).unwrap_or(&[]);
    let (negative, magnitude) = match exponent.split_first() {
        Some((&b'-', rest)) => (true, rest),
        _ => (false, exponent),
    };
    let mut exp: i32 = 0;
    for &b in magnitude.iter().filter(|b| b.is_ascii_digit()) {
        exp = exp * 10 + i32::from(b - b'0');
    }
    if negative {
        exp = -exp;
    }

    digits.exponent = exp - (digits.len as i32 - 1);
    digits
}

#[inline]
fn decimal_len(value: i32) -> i32 {
    let mut n = value.unsigned_abs();
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len + i32::from(value < 0)
}

/// Lays out `digits * 10^exponent` in fixed or scientific notation,
/// whichever is shorter (fixed on ties).
fn layout(digits: &[u8], exponent: i32, out: &mut [u8]) -> usize {
    let n = digits.len() as i32;
    // value = 0.DIGITS * 10^point
    let point = n + exponent;

    let fixed_len = if exponent >= 0 {
        n + exponent
    } else if point > 0 {
        n + 1
    } else {
        2 - point + n
    };
    let fraction_len = if n > 1 { n } else { 0 };
    let scientific_len = 1 + fraction_len + 1 + decimal_len(point - 1);

    if scientific_len < fixed_len {
        write_scientific(digits, point - 1, out)
    } else {
        write_fixed(digits, exponent, point, out)
    }
}

fn write_fixed(digits: &[u8], exponent: i32, point: i32, out: &mut [u8]) -> usize {
    let n = digits.len();
    if exponent >= 0 {
        out[..n].copy_from_slice(digits);
        let end = n + exponent as usize;
        out[n..end].fill(b'0');
        end
    } else if point > 0 {
        let point = point as usize;
        out[..point].copy_from_slice(&digits[..point]);
        out[point] = b'.';
        out[point + 1..=n].copy_from_slice(&digits[point..]);
        n + 1
    } else {
        let zeros = (-point) as usize;
        out[0] = b'0';
        out[1] = b'.';
        out[2..2 + zeros].fill(b'0');
        out[2 + zeros..2 + zeros + n].copy_from_slice(digits);
        2 + zeros + n
    }
}

fn write_scientific(digits: &[u8], exponent: i32, out: &mut [u8]) -> usize {
    let n = digits.len();
    out[0] = digits[0];
    let mut pos = 1;
    if n > 1 {
        out[1] = b'.';
        out[2..=n].copy_from_slice(&digits[1..]);
        pos = n + 1;
    }
    out[pos] = b'e';
    pos += 1;
    if exponent < 0 {
        out[pos] = b'-';
        pos += 1;
    }

    let mut magnitude = exponent.unsigned_abs();
    let mut scratch = [0u8; 4];
    let mut i = scratch.len();
    loop {
        i -= 1;
        scratch[i] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    let width = scratch.len() - i;
    out[pos..pos + width].copy_from_slice(&scratch[i..]);
    pos + width
}

/// Stack-allocated buffer for repeated formatting.
///
/// # Examples
///
/// ```rust
/// use delimwrite::dtoa::Buffer;
///
/// let mut buffer = Buffer::new();
/// assert_eq!(buffer.format(1.0 / 3.0), "0.3333333333333333");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Buffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Buffer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Buffer {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Formats `value` and returns the text, valid until the next call.
    #[inline]
    pub fn format(&mut self, value: f64) -> &str {
        let len = format_finite(value, &mut self.bytes);
        std::str::from_utf8(&self.bytes[..len]).unwrap_or_default()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
