//! Doubling string buffer.
//!
//! [`StringBuffer`] holds exactly one string at a time. Its capacity is
//! tracked explicitly and always leaves room for one terminator byte past
//! the content, so a buffer of capacity `n` holds at most `n - 1` bytes.
//! Growth always doubles, and growing never preserves the old content: a
//! buffer is either refilled from a fresh string with [`fill_from`] or
//! rendered into again from scratch with [`render_with`].
//!
//! [`fill_from`]: StringBuffer::fill_from
//! [`render_with`]: StringBuffer::render_with

use crate::error::{Error, Result};
use crate::format::MAX_FIELD;
use std::fmt;

/// Heap-allocated, doubling text buffer.
#[derive(Clone, Debug)]
pub struct StringBuffer {
    data: String,
    capacity: usize,
    limit: Option<usize>,
}

impl StringBuffer {
    /// Create an empty buffer able to hold `capacity - 1` bytes.
    ///
    /// A zero capacity is clamped to 1.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_limit(capacity, None)
    }

    /// Create an empty buffer that refuses to grow past `limit` bytes.
    pub fn with_limit(capacity: usize, limit: Option<usize>) -> Result<Self> {
        let capacity = capacity.max(1);
        if limit.is_some_and(|max| capacity > max) {
            return Err(Error::OutOfMemory {
                requested: capacity,
            });
        }
        Ok(Self {
            data: allocate(capacity)?,
            capacity,
            limit,
        })
    }

    /// Current capacity in bytes, terminator included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The buffer's content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Length of the content in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Double the capacity, discarding the current content.
    ///
    /// On failure the buffer keeps its capacity and content.
    pub fn grow_without_copy(&mut self) -> Result<()> {
        let requested = self
            .capacity
            .checked_mul(2)
            .ok_or(Error::OutOfMemory {
                requested: usize::MAX,
            })?;
        if self.limit.is_some_and(|max| requested > max) {
            tracing::debug!(
                capacity = self.capacity,
                requested,
                "string buffer growth refused by limit"
            );
            return Err(Error::OutOfMemory { requested });
        }
        self.data = allocate(requested)?;
        self.capacity = requested;
        tracing::trace!(capacity = requested, "string buffer grown");
        Ok(())
    }

    /// Replace the content with an exact copy of `text`.
    ///
    /// The buffer doubles until its capacity exceeds `text.len()`. If a
    /// growth step fails the error is returned and the content is
    /// unspecified.
    pub fn fill_from(&mut self, text: &str) -> Result<()> {
        while text.len() >= self.capacity {
            self.grow_without_copy()?;
        }
        self.data.clear();
        self.data.push_str(text);
        Ok(())
    }

    /// Render into the buffer the way `vsnprintf` does.
    ///
    /// The content is cleared and `render` writes into a sink that keeps at
    /// most `capacity - 1` bytes but counts everything it is given. Returns
    /// the full length the rendered text needs. When that length is not
    /// below [`capacity`](Self::capacity) the content is truncated and the
    /// caller should grow and render again.
    pub fn render_with<F>(&mut self, render: F) -> Result<usize>
    where
        F: FnOnce(&mut BoundedWriter<'_>) -> Result<()>,
    {
        self.data.clear();
        let mut writer = BoundedWriter {
            out: &mut self.data,
            limit: self.capacity - 1,
            required: 0,
        };
        render(&mut writer)?;
        Ok(writer.required)
    }
}

impl PartialEq for StringBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for StringBuffer {}

impl fmt::Display for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// Write sink that stores a bounded prefix and counts the full length.
///
/// Created by [`StringBuffer::render_with`]. Text past the limit is counted
/// and dropped, cut back to a character boundary so the stored prefix stays
/// valid UTF-8. A write fails once the counted length passes [`MAX_FIELD`],
/// the largest length a C `int` can report.
#[derive(Debug)]
pub struct BoundedWriter<'a> {
    out: &'a mut String,
    limit: usize,
    required: usize,
}

impl BoundedWriter<'_> {
    /// Bytes written so far, including those that did not fit.
    #[must_use]
    pub fn required(&self) -> usize {
        self.required
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.required = self.required.saturating_add(s.len());
        if self.required > MAX_FIELD {
            return Err(fmt::Error);
        }
        let room = self.limit.saturating_sub(self.out.len());
        if room >= s.len() {
            self.out.push_str(s);
        } else if room > 0 {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.out.push_str(&s[..end]);
        }
        Ok(())
    }
}

fn allocate(capacity: usize) -> Result<String> {
    let mut data = String::new();
    data.try_reserve_exact(capacity).map_err(|_| {
        tracing::debug!(requested = capacity, "string buffer allocation failed");
        Error::OutOfMemory {
            requested: capacity,
        }
    })?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn test_new_buffer_is_empty() {
        let buf = StringBuffer::with_capacity(1024).unwrap();
        assert_eq!(buf.capacity(), 1024);
        assert!(buf.is_empty());
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let buf = StringBuffer::with_capacity(0).unwrap();
        assert_eq!(buf.capacity(), 1);
    }

    #[test]
    fn test_grow_without_copy_doubles_and_discards() {
        let mut buf = StringBuffer::with_capacity(8).unwrap();
        buf.fill_from("abc").unwrap();
        buf.grow_without_copy().unwrap();
        assert_eq!(buf.capacity(), 16);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_fill_from_fits() {
        let mut buf = StringBuffer::with_capacity(8).unwrap();
        buf.fill_from("1234567").unwrap();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.as_str(), "1234567");
    }

    #[test]
    fn test_fill_from_exact_capacity_grows() {
        // The terminator needs a byte, so 8 bytes do not fit in capacity 8.
        let mut buf = StringBuffer::with_capacity(8).unwrap();
        buf.fill_from("12345678").unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.as_str(), "12345678");
    }

    #[test]
    fn test_fill_from_grows_repeatedly() {
        let text = "x|y\n".repeat(100);
        let mut buf = StringBuffer::with_capacity(4).unwrap();
        buf.fill_from(&text).unwrap();
        assert_eq!(buf.capacity(), 512);
        assert_eq!(buf.as_str(), text);
    }

    #[test]
    fn test_limit_refuses_growth() {
        let mut buf = StringBuffer::with_limit(4, Some(8)).unwrap();
        buf.fill_from("abcdef").unwrap();
        assert_eq!(buf.capacity(), 8);

        let err = buf.fill_from("abcdefghij").unwrap_err();
        assert_eq!(err, Error::OutOfMemory { requested: 16 });
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_initial_capacity_over_limit() {
        let err = StringBuffer::with_limit(32, Some(16)).unwrap_err();
        assert!(err.is_out_of_memory());
    }

    #[test]
    fn test_render_with_reports_required_length() {
        let mut buf = StringBuffer::with_capacity(4).unwrap();
        let required = buf.render_with(|w| {
            w.write_str("hello").unwrap();
            Ok(())
        });
        assert_eq!(required, Ok(5));
        assert_eq!(buf.as_str(), "hel");
    }

    #[test]
    fn test_render_with_fits() {
        let mut buf = StringBuffer::with_capacity(16).unwrap();
        let required = buf
            .render_with(|w| {
                write!(w, "{}|{}", 5, "x").unwrap();
                Ok(())
            })
            .unwrap();
        assert_eq!(required, 3);
        assert_eq!(buf.as_str(), "5|x");
    }

    #[test]
    fn test_bounded_writer_respects_char_boundary() {
        let mut buf = StringBuffer::with_capacity(3).unwrap();
        let required = buf
            .render_with(|w| {
                w.write_str("aé").unwrap();
                Ok(())
            })
            .unwrap();
        assert_eq!(required, 3);
        // Only "a" fits; the two-byte 'é' would cross the limit.
        assert_eq!(buf.as_str(), "a");
    }

    #[test]
    fn test_render_error_propagates() {
        let mut buf = StringBuffer::with_capacity(8).unwrap();
        let err = buf
            .render_with(|_| {
                Err(Error::EncodingFailure {
                    offset: 0,
                    reason: "test",
                })
            })
            .unwrap_err();
        assert!(matches!(err, Error::EncodingFailure { .. }));
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut a = StringBuffer::with_capacity(4).unwrap();
        let mut b = StringBuffer::with_capacity(64).unwrap();
        a.fill_from("ab").unwrap();
        b.fill_from("ab").unwrap();
        assert_eq!(a, b);
    }
}
