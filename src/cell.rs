//! Table cell holding one piece of text and its padding.
//!
//! A [`Cell`] owns a [`StringBuffer`] with its content and a [`CellOptions`]
//! describing the padding around it. Cells report size hints that a layout
//! pass can use; the minimal renderer in this crate ignores the padding.
//!
//! # Examples
//!
//! ```
//! use fort_rust::Cell;
//!
//! let mut cell = Cell::new().unwrap();
//! cell.set_content("first\nsecond").unwrap();
//!
//! assert_eq!(cell.line_count(), 2);
//! // One line of padding above and below by default.
//! assert_eq!(cell.height_hint(), 4);
//! // One column of padding left and right, plus the content length.
//! assert_eq!(cell.width_hint(), 14);
//! ```

use crate::buffer::StringBuffer;
use crate::error::Result;
use crate::options::{DEFAULT_BUFFER_CAPACITY, TableOptions};

/// Padding around a cell's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellOptions {
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_left: u32,
    pub padding_right: u32,
}

impl Default for CellOptions {
    fn default() -> Self {
        Self::uniform(1)
    }
}

impl CellOptions {
    /// Same padding on all four sides.
    #[must_use]
    pub const fn uniform(padding: u32) -> Self {
        Self {
            padding_top: padding,
            padding_bottom: padding,
            padding_left: padding,
            padding_right: padding,
        }
    }

    /// Total horizontal padding.
    #[must_use]
    pub const fn horizontal(&self) -> usize {
        self.padding_left as usize + self.padding_right as usize
    }

    /// Total vertical padding.
    #[must_use]
    pub const fn vertical(&self) -> usize {
        self.padding_top as usize + self.padding_bottom as usize
    }
}

/// A single table cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    buffer: StringBuffer,
    options: CellOptions,
}

impl Cell {
    /// Create an empty cell with default padding and a 1024-byte buffer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            buffer: StringBuffer::with_capacity(DEFAULT_BUFFER_CAPACITY)?,
            options: CellOptions::default(),
        })
    }

    /// Create an empty cell sized and padded according to `options`.
    pub fn with_options(options: &TableOptions) -> Result<Self> {
        Ok(Self {
            buffer: StringBuffer::with_limit(options.cell_capacity, options.max_buffer_capacity)?,
            options: options.cell_options,
        })
    }

    /// The cell's text.
    #[must_use]
    pub fn content(&self) -> &str {
        self.buffer.as_str()
    }

    /// Replace the cell's text, growing its buffer as needed.
    pub fn set_content(&mut self, text: &str) -> Result<()> {
        self.buffer.fill_from(text)
    }

    /// The buffer backing this cell.
    #[must_use]
    pub fn buffer(&self) -> &StringBuffer {
        &self.buffer
    }

    /// Padding configuration.
    #[must_use]
    pub fn options(&self) -> CellOptions {
        self.options
    }

    /// Replace the padding configuration.
    pub fn set_options(&mut self, options: CellOptions) {
        self.options = options;
    }

    /// Number of newline-separated lines, or 0 for an empty cell.
    ///
    /// A trailing newline starts a new, empty line: `"a\n"` has two lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let content = self.content();
        if content.is_empty() {
            return 0;
        }
        content.bytes().filter(|&b| b == b'\n').count() + 1
    }

    /// Horizontal padding plus the content length in bytes.
    #[must_use]
    pub fn width_hint(&self) -> usize {
        self.options.horizontal() + self.content().len()
    }

    /// Vertical padding plus the line count.
    #[must_use]
    pub fn height_hint(&self) -> usize {
        self.options.vertical() + self.line_count()
    }
}
