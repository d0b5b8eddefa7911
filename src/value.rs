//! Column representation for delimited encoding.
//!
//! This module provides the [`Column`] enum: one typed vector per column, with
//! missing values represented as `None`. It mirrors what a columnar in-memory
//! table hands to the encoder.
//!
//! ## Core Types
//!
//! - [`Column`]: A typed vector (logical, integer, double, character, plus the
//!   complex and raw kinds that have no text encoding)
//! - [`ColumnType`]: The type tag of a column, with its display name
//! - [`Cell`]: A single borrowed scalar from a supported column
//!
//! ## Creating Columns
//!
//! ```rust
//! use delimwrite::{Column, ColumnType};
//!
//! let ids = Column::from(vec![1, 2, 3]);
//! let scores = Column::from(vec![Some(1.5), None, Some(f64::NAN)]);
//! let names = Column::from(vec![Some("Alice"), None, Some("Bob")]);
//!
//! assert_eq!(ids.column_type(), ColumnType::Integer);
//! assert_eq!(scores.len(), 3);
//! assert_eq!(names.column_type().name(), "character");
//! ```
//!
//! ## Missing vs NaN
//!
//! For doubles, `None` is a missing value and `Some(f64::NAN)` is a value that
//! happens to be not-a-number. They are written differently.

use crate::{Error, Result};
use std::fmt;

/// Type tag of a [`Column`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Logical,
    Integer,
    Double,
    Character,
    Complex,
    Raw,
}

impl ColumnType {
    /// Name used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::ColumnType;
    ///
    /// assert_eq!(ColumnType::Logical.name(), "logical");
    /// assert_eq!(ColumnType::Raw.name(), "raw");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ColumnType::Logical => "logical",
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::Character => "character",
            ColumnType::Complex => "complex",
            ColumnType::Raw => "raw",
        }
    }

    /// Returns `true` if cells of this type have a delimited text encoding.
    #[inline]
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(
            self,
            ColumnType::Logical | ColumnType::Integer | ColumnType::Double | ColumnType::Character
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-length vector of values of one type.
///
/// # Examples
///
/// ```rust
/// use delimwrite::{Cell, Column};
///
/// let column = Column::Logical(vec![Some(true), None]);
/// assert_eq!(column.cell(0).unwrap(), Cell::Logical(Some(true)));
/// assert_eq!(column.cell(1).unwrap(), Cell::Logical(None));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Logical(Vec<Option<bool>>),
    Integer(Vec<Option<i64>>),
    Double(Vec<Option<f64>>),
    Character(Vec<Option<String>>),
    /// Complex numbers as `(re, im)`. Not encodable.
    Complex(Vec<(f64, f64)>),
    /// Raw bytes. Not encodable.
    Raw(Vec<u8>),
}

impl Column {
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match self {
            Column::Logical(_) => ColumnType::Logical,
            Column::Integer(_) => ColumnType::Integer,
            Column::Double(_) => ColumnType::Double,
            Column::Character(_) => ColumnType::Character,
            Column::Complex(_) => ColumnType::Complex,
            Column::Raw(_) => ColumnType::Raw,
        }
    }

    /// Number of rows in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Logical(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Double(v) => v.len(),
            Column::Character(v) => v.len(),
            Column::Complex(v) => v.len(),
            Column::Raw(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell at row `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for complex and raw columns, and
    /// [`Error::Custom`] if `i` is out of bounds.
    pub fn cell(&self, i: usize) -> Result<Cell<'_>> {
        let cell = match self {
            Column::Logical(v) => v.get(i).map(|x| Cell::Logical(*x)),
            Column::Integer(v) => v.get(i).map(|x| Cell::Integer(*x)),
            Column::Double(v) => v.get(i).map(|x| Cell::Double(*x)),
            Column::Character(v) => v.get(i).map(|x| Cell::Character(x.as_deref())),
            Column::Complex(_) | Column::Raw(_) => {
                return Err(Error::unsupported_type(self.column_type().name()))
            }
        };
        cell.ok_or_else(|| Error::custom(format!("row {} out of bounds ({} rows)", i, self.len())))
    }
}

/// One scalar of a supported type, `None` when missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
    Logical(Option<bool>),
    Integer(Option<i64>),
    Double(Option<f64>),
    Character(Option<&'a str>),
}

impl Cell<'_> {
    #[inline]
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(
            self,
            Cell::Logical(None) | Cell::Integer(None) | Cell::Double(None) | Cell::Character(None)
        )
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match self {
            Cell::Logical(_) => ColumnType::Logical,
            Cell::Integer(_) => ColumnType::Integer,
            Cell::Double(_) => ColumnType::Double,
            Cell::Character(_) => ColumnType::Character,
        }
    }
}

macro_rules! impl_from_vec {
    ($variant:ident, $ty:ty, $convert:expr) => {
        impl From<Vec<$ty>> for Column {
            fn from(values: Vec<$ty>) -> Self {
                Column::$variant(values.into_iter().map($convert).collect())
            }
        }
    };
}

impl_from_vec!(Logical, bool, Some);
impl_from_vec!(Logical, Option<bool>, |x| x);
impl_from_vec!(Integer, i64, Some);
impl_from_vec!(Integer, Option<i64>, |x| x);
impl_from_vec!(Integer, i32, |x| Some(i64::from(x)));
impl_from_vec!(Integer, Option<i32>, |x: Option<i32>| x.map(i64::from));
impl_from_vec!(Double, f64, Some);
impl_from_vec!(Double, Option<f64>, |x| x);
impl_from_vec!(Character, String, Some);
impl_from_vec!(Character, Option<String>, |x| x);
impl_from_vec!(Character, &str, |x: &str| Some(x.to_string()));
impl_from_vec!(Character, Option<&str>, |x: Option<&str>| x.map(str::to_string));
