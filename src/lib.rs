//! `fort` - simple text tables
//!
//! A [`Table`] holds an optional header [`Row`] and a dense list of body rows.
//! Rows are built either by splitting a literal string on `|`, or by
//! rendering a printf-style template with arguments and then splitting the
//! result. A rendered row must split into as many columns as its template
//! text does; an argument that smuggles in a `|` is rejected rather than
//! silently shifting the columns.
//!
//! Every allocation goes through fallible growth, so running out of memory
//! (or into a configured limit) surfaces as [`Error::OutOfMemory`] instead of
//! aborting, and failed operations leave tables unchanged.
//!
//! # Examples
//!
//! ```
//! use fort_rust::{Error, Table, args};
//!
//! let mut table = Table::new().unwrap();
//! table.set_header("N|Driver|Time", args![]).unwrap();
//! table.set_row(0, "%d|%s|%.1f", args![1, "Ricciardo", 83.3]).unwrap();
//! table.set_row(1, "%d|%s|%.1f", args![2, "Hamilton", 84.1]).unwrap();
//!
//! let err = table.set_row(2, "%d|%s", args![3, "Rosberg|Webber"]);
//! assert_eq!(err, Err(Error::ColumnCountMismatch { expected: 2, actual: 3 }));
//!
//! assert_eq!(
//!     table.to_text().unwrap(),
//!     "| N| Driver| Time\n| 1| Ricciardo| 83.3\n| 2| Hamilton| 84.1\n"
//! );
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional integer conversions in directives
#![allow(clippy::cast_sign_loss)] // Intentional wrapping for %u/%x/%o
#![allow(clippy::cast_possible_wrap)] // Intentional wrapping for %d on unsigned args
#![allow(clippy::module_name_repetitions)] // Allow format::FormatX style names
#![allow(clippy::missing_errors_doc)] // Every fallible call returns crate::Error
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::float_cmp)] // Exact zero check in %g is intentional
#![allow(clippy::items_after_statements)] // Common pattern in tests

mod macros;

pub mod buffer;
pub mod cell;
pub mod error;
pub mod format;
pub mod options;
pub mod row;
pub mod table;
pub mod vector;

// Re-export core types at crate root
pub use buffer::StringBuffer;
pub use cell::{Cell, CellOptions};
pub use error::{Error, Result};
pub use format::{Arg, Template};
pub use options::TableOptions;
pub use row::{COL_SEPARATOR, Row, column_count, count_columns};
pub use table::Table;
pub use vector::GrowableVec;
