//! Ordered table of named columns.
//!
//! This module provides [`Table`], a wrapper around [`IndexMap`] that keeps
//! columns in insertion order. Column order is output order, so a plain
//! `HashMap` would make the encoded text nondeterministic.
//!
//! ## Examples
//!
//! ```rust
//! use delimwrite::{Column, Table};
//!
//! let mut table = Table::new();
//! table.insert("id", Column::from(vec![1, 2]));
//! table.insert("name", Column::from(vec!["Alice", "Bob"]));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.nrow(), 2);
//! assert_eq!(table.names().collect::<Vec<_>>(), vec!["id", "name"]);
//! ```

use crate::{Column, Error, Result};
use indexmap::IndexMap;

/// An ordered map of column names to columns.
///
/// All columns are expected to have the same length; [`Table::validate`]
/// checks this and the encoder calls it before writing anything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Column>);

impl Table {
    /// Creates an empty `Table`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::Table;
    ///
    /// let table = Table::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.nrow(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a column, keeping its position if the name already exists.
    ///
    /// If the table already contained this name, the old column is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::{Column, Table};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("x", Column::from(vec![1])).is_none());
    /// assert!(table.insert("x", Column::from(vec![2])).is_some());
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Option<Column> {
        self.0.insert(name.into(), column)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.0.get(name)
    }

    /// Column at position `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&String, &Column)> {
        self.0.get_index(index)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows, taken from the first column. Zero for an empty table.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.0.first().map_or(0, |(_, column)| column.len())
    }

    /// Returns an iterator over the column names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over the columns, in insertion order.
    pub fn columns(&self) -> indexmap::map::Values<'_, String, Column> {
        self.0.values()
    }

    /// Returns an iterator over `(name, column)` pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Column> {
        self.0.iter()
    }

    /// Checks that every column has as many rows as the first one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] naming the first offending column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delimwrite::{Column, Table};
    ///
    /// let mut table = Table::new();
    /// table.insert("a", Column::from(vec![1, 2]));
    /// table.insert("b", Column::from(vec![1]));
    /// assert!(table.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let expected = self.nrow();
        match self.0.iter().find(|(_, column)| column.len() != expected) {
            Some((name, column)) => Err(Error::LengthMismatch {
                column: name.clone(),
                expected,
                found: column.len(),
            }),
            None => Ok(()),
        }
    }
}

impl IntoIterator for Table {
    type Item = (String, Column);
    type IntoIter = indexmap::map::IntoIter<String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Column);
    type IntoIter = indexmap::map::Iter<'a, String, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Column)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, Column)>>(iter: T) -> Self {
        Table(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
