//! Table rows and the builders that split text into cells.
//!
//! A row is always produced whole: either empty, or fully populated by one of
//! the builders. A builder that fails drops everything it allocated and hands
//! back only the error.
//!
//! # Examples
//!
//! ```
//! use fort_rust::{Error, Row, args};
//!
//! let row = Row::from_literal("a|b|c").unwrap();
//! assert_eq!(row.column_count(), 3);
//!
//! let row = Row::from_format("%d|%s", args![5, "x"]).unwrap();
//! assert_eq!(row.cell(0).unwrap().content(), "5");
//! assert_eq!(row.cell(1).unwrap().content(), "x");
//!
//! // Substituted text may not introduce new columns.
//! let err = Row::from_format("%s|%s", args!["a|b", "c"]).unwrap_err();
//! assert_eq!(err, Error::ColumnCountMismatch { expected: 2, actual: 3 });
//! ```

use crate::buffer::StringBuffer;
use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::format::{self, Arg, Template};
use crate::options::TableOptions;
use crate::vector::GrowableVec;

/// Character that separates columns. It cannot be escaped.
pub const COL_SEPARATOR: char = '|';

/// Number of columns `text` splits into: separators plus one.
#[must_use]
pub fn count_columns(text: &str) -> usize {
    text.matches(COL_SEPARATOR).count() + 1
}

/// Number of cells in `row`, or 0 when there is no row.
#[must_use]
pub fn column_count(row: Option<&Row>) -> usize {
    row.map_or(0, Row::column_count)
}

/// An ordered collection of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    cells: GrowableVec<Cell>,
}

impl Row {
    /// Create a row with no cells.
    pub fn new() -> Result<Self> {
        Self::with_options(&TableOptions::default())
    }

    /// Create a row with no cells, sized according to `options`.
    pub fn with_options(options: &TableOptions) -> Result<Self> {
        Ok(Self {
            cells: GrowableVec::with_limit(options.row_capacity, options.max_row_capacity)?,
        })
    }

    /// Split `text` on [`COL_SEPARATOR`] into one cell per segment.
    ///
    /// Empty segments become empty cells, so `"a||b"` has three columns and
    /// `""` has one. `None` yields a row with no cells.
    pub fn from_literal<'a>(text: impl Into<Option<&'a str>>) -> Result<Self> {
        Self::from_literal_with(text, &TableOptions::default())
    }

    /// [`from_literal`](Self::from_literal) with explicit options.
    pub fn from_literal_with<'a>(
        text: impl Into<Option<&'a str>>,
        options: &TableOptions,
    ) -> Result<Self> {
        let mut row = Self::with_options(options)?;
        let Some(text) = text.into() else {
            return Ok(row);
        };
        for segment in text.split(COL_SEPARATOR) {
            let mut cell = Cell::with_options(options)?;
            cell.set_content(segment)?;
            row.cells.push(cell)?;
        }
        Ok(row)
    }

    /// Render `template` with `args` and split the result into cells.
    ///
    /// Fails with [`Error::ColumnCountMismatch`] when the rendered text has a
    /// different number of separators than the template, which happens when
    /// an argument contains the separator. No attempt is made to re-split.
    pub fn from_format(template: &str, args: &[Arg<'_>]) -> Result<Self> {
        Self::from_format_with(template, args, &TableOptions::default())
    }

    /// [`from_format`](Self::from_format) with explicit options.
    pub fn from_format_with(
        template: &str,
        args: &[Arg<'_>],
        options: &TableOptions,
    ) -> Result<Self> {
        let expected = count_columns(template);
        let template = Template::parse(template)?;

        let mut buffer = StringBuffer::with_limit(options.format_capacity, options.max_buffer_capacity)?;
        format::render_to_buffer(&mut buffer, &template, args)?;

        let actual = count_columns(buffer.as_str());
        if actual != expected {
            tracing::debug!(
                template = template.source(),
                expected,
                actual,
                "rendered row changed column count"
            );
            return Err(Error::ColumnCountMismatch { expected, actual });
        }

        Self::from_literal_with(buffer.as_str(), options)
    }

    /// Number of cells.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.at(index)
    }

    /// Get the cell at `index` mutably.
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.at_mut(index)
    }

    /// Iterate over the cells left to right.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cell contents left to right.
    #[must_use]
    pub fn contents(&self) -> Vec<&str> {
        self.cells.iter().map(Cell::content).collect()
    }

    /// Append a cell, taking ownership of it.
    pub fn push_cell(&mut self, cell: Cell) -> Result<()> {
        self.cells.push(cell)
    }

    /// Remove and return the cell at `index`.
    pub fn erase_cell(&mut self, index: usize) -> Result<Cell> {
        self.cells.erase(index)
    }

    /// Index of the first cell equal to `cell`.
    #[must_use]
    pub fn position(&self, cell: &Cell) -> Option<usize> {
        self.cells.index_of(cell)
    }

    /// Write the row as `"| "` followed by each cell's content.
    pub(crate) fn write_to<W: std::fmt::Write>(&self, out: &mut W) -> std::fmt::Result {
        for cell in &self.cells {
            out.write_str("| ")?;
            out.write_str(cell.content())?;
        }
        Ok(())
    }

    /// Length in bytes of [`write_to`](Self::write_to)'s output.
    pub(crate) fn rendered_len(&self) -> usize {
        self.cells.iter().map(|cell| 2 + cell.content().len()).sum()
    }
}
