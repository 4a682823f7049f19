//! Table construction options.

use crate::cell::CellOptions;

/// Initial byte capacity of every string buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;
/// Initial element capacity of row and table arrays.
pub const DEFAULT_COLLECTION_CAPACITY: usize = 10;

/// Sizing and limit configuration for tables, rows and cells.
///
/// The defaults reproduce the classic behavior: 1024-byte cell and render
/// buffers, room for ten cells per row and ten rows per table, and no limit
/// other than what the allocator refuses.
///
/// Limits are checked before growing. A buffer or array that would have to
/// grow past its limit fails with [`Error::OutOfMemory`](crate::Error) exactly
/// as if the allocator had refused the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableOptions {
    /// Initial buffer capacity of a new cell, in bytes.
    pub cell_capacity: usize,
    /// Initial capacity of the buffer a template is rendered into, in bytes.
    pub format_capacity: usize,
    /// Initial number of cells a row has room for.
    pub row_capacity: usize,
    /// Initial number of body rows a table has room for.
    pub table_capacity: usize,
    /// Largest capacity any string buffer may grow to.
    pub max_buffer_capacity: Option<usize>,
    /// Largest number of cells any row may grow to hold.
    pub max_row_capacity: Option<usize>,
    /// Largest number of body rows the table may grow to hold.
    pub max_table_capacity: Option<usize>,
    /// Padding given to every newly created cell.
    pub cell_options: CellOptions,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            cell_capacity: DEFAULT_BUFFER_CAPACITY,
            format_capacity: DEFAULT_BUFFER_CAPACITY,
            row_capacity: DEFAULT_COLLECTION_CAPACITY,
            table_capacity: DEFAULT_COLLECTION_CAPACITY,
            max_buffer_capacity: None,
            max_row_capacity: None,
            max_table_capacity: None,
            cell_options: CellOptions::default(),
        }
    }
}

impl TableOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial cell buffer capacity.
    #[must_use]
    pub fn with_cell_capacity(mut self, bytes: usize) -> Self {
        self.cell_capacity = bytes;
        self
    }

    /// Set the initial render buffer capacity.
    #[must_use]
    pub fn with_format_capacity(mut self, bytes: usize) -> Self {
        self.format_capacity = bytes;
        self
    }

    /// Set the initial per-row cell capacity.
    #[must_use]
    pub fn with_row_capacity(mut self, cells: usize) -> Self {
        self.row_capacity = cells;
        self
    }

    /// Set the initial body row capacity.
    #[must_use]
    pub fn with_table_capacity(mut self, rows: usize) -> Self {
        self.table_capacity = rows;
        self
    }

    /// Cap the capacity any string buffer may grow to.
    #[must_use]
    pub fn with_max_buffer_capacity(mut self, bytes: usize) -> Self {
        self.max_buffer_capacity = Some(bytes);
        self
    }

    /// Cap the number of cells any row may hold.
    #[must_use]
    pub fn with_max_row_capacity(mut self, cells: usize) -> Self {
        self.max_row_capacity = Some(cells);
        self
    }

    /// Cap the number of body rows the table may hold.
    #[must_use]
    pub fn with_max_table_capacity(mut self, rows: usize) -> Self {
        self.max_table_capacity = Some(rows);
        self
    }

    /// Set the padding applied to new cells.
    #[must_use]
    pub fn with_cell_options(mut self, options: CellOptions) -> Self {
        self.cell_options = options;
        self
    }
}
