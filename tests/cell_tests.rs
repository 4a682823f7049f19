//! Unit tests for cells and the buffers behind them.
//!
//! Tests cover cell creation, size hints, content replacement across buffer
//! growth, and allocation limits.

use fort::cell::{Cell, CellOptions};
use fort::{Error, Row, StringBuffer, TableOptions};
use fort_rust as fort;

// =============================================================================
// Cell Creation Tests
// =============================================================================

#[test]
fn test_cell_default() {
    let cell = Cell::new().unwrap();
    assert_eq!(cell.content(), "");
    assert_eq!(cell.line_count(), 0);
    assert_eq!(cell.options(), CellOptions::default());
    assert_eq!(cell.buffer().capacity(), 1024);
}

#[test]
fn test_cell_from_options_uses_padding() {
    let padding = CellOptions {
        padding_top: 0,
        padding_bottom: 3,
        padding_left: 2,
        padding_right: 1,
    };
    let opts = TableOptions::default().with_cell_options(padding);
    let cell = Cell::with_options(&opts).unwrap();
    assert_eq!(cell.options(), padding);
    assert_eq!(cell.width_hint(), 3);
    assert_eq!(cell.height_hint(), 3);
}

// =============================================================================
// Size Hint Tests
// =============================================================================

#[test]
fn test_height_hint_counts_lines() {
    let row = Row::from_literal("one|two\nlines|three\nfull\nlines").unwrap();
    let heights: Vec<_> = row.cells().map(Cell::height_hint).collect();
    assert_eq!(heights, [3, 4, 5]);
}

#[test]
fn test_width_hint_is_plain_length() {
    // The whole content counts, newlines included, not the longest line.
    let row = Row::from_literal("abc|ab\ncd").unwrap();
    let widths: Vec<_> = row.cells().map(Cell::width_hint).collect();
    assert_eq!(widths, [5, 7]);
}

#[test]
fn test_hints_update_with_content() {
    let mut cell = Cell::new().unwrap();
    cell.set_content("x").unwrap();
    assert_eq!((cell.width_hint(), cell.height_hint()), (3, 3));
    cell.set_content("").unwrap();
    assert_eq!((cell.width_hint(), cell.height_hint()), (2, 2));
}

// =============================================================================
// Buffer Edge Cases
// =============================================================================

#[test]
fn test_content_replacement_across_growth() {
    let mut cell = Cell::new().unwrap();
    let big = "|\n".repeat(1500);
    cell.set_content(&big).unwrap();
    assert_eq!(cell.content(), big);
    assert_eq!(cell.buffer().capacity(), 4096);

    // Shrinking content keeps the grown capacity.
    cell.set_content("small").unwrap();
    assert_eq!(cell.content(), "small");
    assert_eq!(cell.buffer().capacity(), 4096);
}

#[test]
fn test_fill_from_at_capacity_boundary() {
    for len in [1023usize, 1024, 1025, 2047, 2048] {
        let text = "a".repeat(len);
        let mut buffer = StringBuffer::with_capacity(1024).unwrap();
        buffer.fill_from(&text).unwrap();
        assert!(buffer.capacity() > len, "capacity must exceed {len}");
        assert_eq!(buffer.len(), len);
    }
}

#[test]
fn test_grow_without_copy_overflow() {
    let mut buffer = StringBuffer::with_limit(1, Some(1)).unwrap();
    assert_eq!(
        buffer.grow_without_copy(),
        Err(Error::OutOfMemory { requested: 2 })
    );
    assert_eq!(buffer.capacity(), 1);
}

#[test]
fn test_cell_equality_ignores_capacity() {
    let small = TableOptions::default().with_cell_capacity(2);
    let mut a = Cell::with_options(&small).unwrap();
    let mut b = Cell::new().unwrap();
    a.set_content("same").unwrap();
    b.set_content("same").unwrap();
    assert_eq!(a, b);

    b.set_options(CellOptions::uniform(0));
    assert_ne!(a, b);
}
