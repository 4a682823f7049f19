//! Tables: an optional header row plus a dense list of body rows.
//!
//! Rows are built in isolation and only installed once they are complete, so
//! a failing [`Table::set_header`] or [`Table::set_row`] leaves the table as
//! it was. Writing past the end of the body fills the gap with empty
//! placeholder rows; if that fill fails part way, the placeholders added by
//! the call are removed again before the error is returned.
//!
//! # Examples
//!
//! ```
//! use fort_rust::{Table, args};
//!
//! let mut table = Table::new().unwrap();
//! assert_eq!(table.set_header("%s|%s", args!["id", "name"]), Ok(2));
//! assert_eq!(table.set_row(1, "%d|%s", args![2, "bob"]), Ok(2));
//!
//! // Row 0 was filled in with an empty placeholder.
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.to_text().unwrap(), "| id| name\n\n| 2| bob\n");
//! ```

use crate::error::{Error, Result};
use crate::format::Arg;
use crate::options::TableOptions;
use crate::row::Row;
use crate::vector::GrowableVec;
use std::fmt;

/// A text table.
///
/// Fields drop in declaration order, so the header goes before the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    header: Option<Row>,
    rows: GrowableVec<Row>,
    options: TableOptions,
}

impl Table {
    /// Create an empty table with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(TableOptions::default())
    }

    /// Create an empty table.
    pub fn with_options(options: TableOptions) -> Result<Self> {
        Ok(Self {
            header: None,
            rows: GrowableVec::with_limit(options.table_capacity, options.max_table_capacity)?,
            options,
        })
    }

    /// Options this table builds rows and cells with.
    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Build the header from `template` and `args`, replacing any previous
    /// header. Returns the header's column count.
    pub fn set_header(&mut self, template: &str, args: &[Arg<'_>]) -> Result<usize> {
        let row = Row::from_format_with(template, args, &self.options)?;
        let columns = row.column_count();
        self.header = Some(row);
        Ok(columns)
    }

    /// Build body row `index` from `template` and `args`, replacing whatever
    /// was there. Returns the row's column count.
    ///
    /// When `index` is past the end, empty rows are appended until the body
    /// has `index + 1` rows.
    pub fn set_row(&mut self, index: usize, template: &str, args: &[Arg<'_>]) -> Result<usize> {
        let row = Row::from_format_with(template, args, &self.options)?;
        let columns = row.column_count();

        let original_len = self.rows.len();
        while self.rows.len() <= index {
            let appended = Row::with_options(&self.options).and_then(|placeholder| self.rows.push(placeholder));
            if let Err(err) = appended {
                tracing::debug!(
                    index,
                    rolled_back = self.rows.len() - original_len,
                    error = %err,
                    "placeholder rows rolled back"
                );
                self.rows.truncate(original_len);
                return Err(err);
            }
        }

        // The slot exists now, so the displaced row is simply dropped.
        self.rows.replace(index, row)?;
        Ok(columns)
    }

    /// The header row, if one has been set.
    #[must_use]
    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    /// Remove the header and return it.
    pub fn clear_header(&mut self) -> Option<Row> {
        self.header.take()
    }

    /// Body row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.at(index)
    }

    /// Body row at `index`, mutably.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.at_mut(index)
    }

    /// Iterate over the body rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Remove body row `index`, shifting later rows up.
    pub fn erase_row(&mut self, index: usize) -> Result<Row> {
        self.rows.erase(index)
    }

    /// Number of body rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Body size as `(rows, columns)`, where columns is the widest body row.
    #[must_use]
    pub fn body_size(&self) -> (usize, usize) {
        let columns = self.rows.iter().map(Row::column_count).max().unwrap_or(0);
        (self.rows.len(), columns)
    }

    /// Widest row, header included.
    #[must_use]
    pub fn column_count(&self) -> usize {
        let (_, body) = self.body_size();
        body.max(crate::row::column_count(self.header()))
    }

    /// Render the table as text.
    ///
    /// Each row becomes its cells written as `"| " + content`, followed by a
    /// newline, header first. Padding is not applied and columns are not
    /// aligned.
    pub fn to_text(&self) -> Result<String> {
        let len = self.rendered_len();
        let mut out = String::new();
        out.try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { requested: len })?;
        self.write_to(&mut out).map_err(|_| Error::OutOfMemory { requested: len })?;
        Ok(out)
    }

    fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        if let Some(header) = &self.header {
            header.write_to(out)?;
            out.write_char('\n')?;
        }
        for row in &self.rows {
            row.write_to(out)?;
            out.write_char('\n')?;
        }
        Ok(())
    }

    fn rendered_len(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(|row| row.rendered_len() + 1)
            .sum()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new().unwrap();
        assert!(table.header().is_none());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.body_size(), (0, 0));
        assert_eq!(table.to_text().unwrap(), "");
    }

    #[test]
    fn test_set_header_replaces() {
        let mut table = Table::new().unwrap();
        assert_eq!(table.set_header("a|b", args![]), Ok(2));
        assert_eq!(table.set_header("%s", args!["only"]), Ok(1));
        assert_eq!(table.header().unwrap().contents(), ["only"]);
    }

    #[test]
    fn test_set_header_failure_keeps_old() {
        let mut table = Table::new().unwrap();
        table.set_header("a|b", args![]).unwrap();
        let err = table.set_header("%s|%s", args!["x|y", "z"]).unwrap_err();
        assert!(matches!(err, Error::ColumnCountMismatch { .. }));
        assert_eq!(table.header().unwrap().contents(), ["a", "b"]);
    }

    #[test]
    fn test_set_row_fills_placeholders() {
        let mut table = Table::new().unwrap();
        assert_eq!(table.set_row(5, "x", args![]), Ok(1));
        assert_eq!(table.row_count(), 6);
        for i in 0..5 {
            assert_eq!(table.row(i).unwrap().column_count(), 0);
        }
        assert_eq!(table.row(5).unwrap().contents(), ["x"]);
    }

    #[test]
    fn test_set_row_replaces_existing() {
        let mut table = Table::new().unwrap();
        table.set_row(0, "old|row", args![]).unwrap();
        assert_eq!(table.set_row(0, "%s", args!["new"]), Ok(1));
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.row(0).unwrap().contents(), ["new"]);
    }

    #[test]
    fn test_set_row_rolls_back_placeholders() {
        let opts = TableOptions::default()
            .with_table_capacity(2)
            .with_max_table_capacity(4);
        let mut table = Table::with_options(opts).unwrap();
        table.set_row(0, "keep", args![]).unwrap();

        let err = table.set_row(9, "x", args![]).unwrap_err();
        assert_eq!(err, Error::OutOfMemory { requested: 8 });
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.row(0).unwrap().contents(), ["keep"]);
    }

    #[test]
    fn test_row_limit_only_caps_cells() {
        let opts = TableOptions::default()
            .with_row_capacity(2)
            .with_max_row_capacity(2);
        let mut table = Table::with_options(opts).unwrap();
        assert_eq!(table.set_row(12, "a|b", args![]), Ok(2));
        assert_eq!(table.row_count(), 13);

        let err = table.set_row(0, "a|b|c", args![]).unwrap_err();
        assert_eq!(err, Error::OutOfMemory { requested: 4 });
        assert!(table.row(0).unwrap().is_empty());
    }

    #[test]
    fn test_set_row_large_float_precision() {
        let mut table = Table::new().unwrap();
        assert_eq!(table.set_row(0, "%.100000f", args![0.5]), Ok(1));
        let content = table.row(0).unwrap().cell(0).unwrap().content();
        assert_eq!(content.len(), 2 + 100_000);
        assert!(content.starts_with("0.5000"));
    }

    #[test]
    fn test_body_and_column_counts() {
        let mut table = Table::new().unwrap();
        table.set_header("a|b|c|d", args![]).unwrap();
        table.set_row(0, "1|2", args![]).unwrap();
        table.set_row(2, "1|2|3", args![]).unwrap();
        assert_eq!(table.body_size(), (3, 3));
        assert_eq!(table.column_count(), 4);
    }

    #[test]
    fn test_erase_row() {
        let mut table = Table::new().unwrap();
        table.set_row(0, "a", args![]).unwrap();
        table.set_row(1, "b", args![]).unwrap();
        let removed = table.erase_row(0).unwrap();
        assert_eq!(removed.contents(), ["a"]);
        assert_eq!(table.row(0).unwrap().contents(), ["b"]);
        assert_eq!(
            table.erase_row(4).unwrap_err(),
            Error::IndexOutOfRange { index: 4, len: 1 }
        );
    }

    #[test]
    fn test_render_without_header() {
        let mut table = Table::new().unwrap();
        table.set_row(0, "%d|%s", args![1, "a"]).unwrap();
        assert_eq!(table.to_text().unwrap(), "| 1| a\n");
    }

    #[test]
    fn test_display_matches_to_text() {
        let mut table = Table::new().unwrap();
        table.set_header("h1|h2", args![]).unwrap();
        table.set_row(2, "%s|%s", args!["x", "y"]).unwrap();
        assert_eq!(table.to_string(), table.to_text().unwrap());
    }

    #[test]
    fn test_render_sized_dynamically() {
        let big = "w".repeat(10_000);
        let mut table = Table::new().unwrap();
        table.set_row(0, "%s|%s", args![big.as_str(), big.as_str()]).unwrap();
        let text = table.to_text().unwrap();
        assert_eq!(text.len(), 2 * (2 + 10_000) + 1);
    }

    #[test]
    fn test_clear_header() {
        let mut table = Table::new().unwrap();
        table.set_header("h", args![]).unwrap();
        assert!(table.clear_header().is_some());
        assert!(table.header().is_none());
        assert_eq!(table.column_count(), 0);
    }
}
