//! Error types for fort.

use std::collections::TryReserveError;
use std::fmt;

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for table operations.
///
/// Every variant is a synchronous, recoverable failure of a single operation.
/// Nothing outside the operation in progress is modified when one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An allocation or growth step failed, or would exceed a configured limit.
    OutOfMemory {
        /// Capacity (bytes for buffers, elements for arrays) that was requested.
        requested: usize,
    },
    /// The template could not be rendered with the supplied arguments.
    EncodingFailure {
        /// Byte offset in the template where rendering failed.
        offset: usize,
        /// Short description of what went wrong.
        reason: &'static str,
    },
    /// The rendered text splits into a different number of columns than the
    /// template itself.
    ColumnCountMismatch {
        /// Columns in the template text.
        expected: usize,
        /// Columns in the rendered text.
        actual: usize,
    },
    /// Index outside the populated range of an array.
    IndexOutOfRange {
        /// Index that was asked for.
        index: usize,
        /// Number of populated elements.
        len: usize,
    },
}

impl Error {
    /// True for failures caused by allocation, which may succeed if retried.
    #[must_use]
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: failed to grow to capacity {requested}")
            }
            Self::EncodingFailure { offset, reason } => {
                write!(f, "cannot render template at byte {offset}: {reason}")
            }
            Self::ColumnCountMismatch { expected, actual } => {
                write!(
                    f,
                    "column count mismatch: template has {expected} columns, rendered text has {actual}"
                )
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        // TryReserveError does not expose the requested size on stable.
        Self::OutOfMemory {
            requested: usize::MAX,
        }
    }
}
