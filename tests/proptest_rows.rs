//! Property-based tests for row splitting and the growable containers.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use fort::format::{Arg, render_string};
use fort::{Error, GrowableVec, Row, StringBuffer, Table, count_columns};
use fort_rust as fort;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Segments that never contain the column separator.
fn segment() -> impl Strategy<Value = String> {
    "[^|]{0,12}"
}

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment(), 1..8)
}

/// A mix of push and erase operations on a small array.
#[derive(Clone, Debug)]
enum VecOp {
    Push(u16),
    Erase(usize),
}

fn vec_ops() -> impl Strategy<Value = Vec<VecOp>> {
    prop::collection::vec(
        prop_oneof![
            any::<u16>().prop_map(VecOp::Push),
            (0usize..40).prop_map(VecOp::Erase),
        ],
        0..120,
    )
}

// ============================================================================
// Row Splitting Properties
// ============================================================================

proptest! {
    /// Joining separator-free segments and splitting them again is lossless.
    #[test]
    fn literal_split_round_trips(parts in segments()) {
        let joined = parts.join("|");
        let row = Row::from_literal(joined.as_str()).unwrap();
        prop_assert_eq!(row.contents(), parts.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// A row always has exactly as many cells as its text has columns.
    #[test]
    fn literal_column_count_matches(text in "[a-c|]{0,30}") {
        let row = Row::from_literal(text.as_str()).unwrap();
        prop_assert_eq!(row.column_count(), count_columns(&text));
    }

    /// `%s` arguments without separators never change the column count.
    #[test]
    fn format_with_clean_arguments_succeeds(parts in segments()) {
        let template = vec!["%s"; parts.len()].join("|");
        let args: Vec<Arg<'_>> = parts.iter().map(|p| Arg::from(p.as_str())).collect();
        let row = Row::from_format(&template, &args).unwrap();
        prop_assert_eq!(row.contents(), parts.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Any separator smuggled in through an argument is rejected.
    #[test]
    fn format_with_separator_argument_fails(
        prefix in segment(),
        suffix in segment(),
        extra in 1usize..4,
    ) {
        let smuggled = format!("{prefix}{}{suffix}", "|".repeat(extra));
        let err = Row::from_format("%s|end", &[Arg::from(smuggled.as_str())]).unwrap_err();
        prop_assert_eq!(err, Error::ColumnCountMismatch { expected: 2, actual: 2 + extra });
    }

    /// Integer directives render exactly like Rust's own formatting.
    #[test]
    fn signed_directive_matches_display(v in any::<i64>(), width in 0usize..24) {
        let text = render_string(&format!("%{width}d"), &[Arg::from(v)]).unwrap();
        prop_assert_eq!(text, format!("{v:>width$}"));
    }

    /// Fixed-point directives match Rust's precision formatting.
    #[test]
    fn fixed_directive_matches_display(v in -1.0e9f64..1.0e9, precision in 0usize..10) {
        let text = render_string(&format!("%.{precision}f"), &[Arg::from(v)]).unwrap();
        prop_assert_eq!(text, format!("{v:.precision$}"));
    }
}

// ============================================================================
// Container Properties
// ============================================================================

proptest! {
    /// The array behaves like a Vec, and capacity never shrinks.
    #[test]
    fn growable_vec_matches_model(ops in vec_ops()) {
        let mut vec = GrowableVec::with_capacity(1).unwrap();
        let mut model: Vec<u16> = Vec::new();
        let mut last_capacity = vec.capacity();

        for op in ops {
            match op {
                VecOp::Push(v) => {
                    vec.push(v).unwrap();
                    model.push(v);
                }
                VecOp::Erase(i) => {
                    let before = vec.len();
                    match vec.erase(i) {
                        Ok(removed) => {
                            prop_assert_eq!(removed, model.remove(i));
                            prop_assert_eq!(vec.len(), before - 1);
                        }
                        Err(err) => {
                            prop_assert!(i >= model.len());
                            prop_assert_eq!(err, Error::IndexOutOfRange { index: i, len: before });
                            prop_assert_eq!(vec.len(), before);
                        }
                    }
                }
            }
            prop_assert!(vec.capacity() >= last_capacity);
            prop_assert!(vec.len() <= vec.capacity());
            last_capacity = vec.capacity();
            prop_assert_eq!(vec.as_slice(), model.as_slice());
        }
    }

    /// Filling a buffer always leaves room for the terminator.
    #[test]
    fn fill_from_leaves_room(text in "\\PC{0,300}", initial in 1usize..64) {
        let mut buffer = StringBuffer::with_capacity(initial).unwrap();
        buffer.fill_from(&text).unwrap();
        prop_assert!(buffer.capacity() > text.len());
        prop_assert_eq!(buffer.as_str(), text.as_str());
    }

    /// A failed row write never changes what the table renders.
    #[test]
    fn failed_set_row_is_invisible(index in 0usize..30, filled in 0usize..10) {
        let mut table = Table::new().unwrap();
        for i in 0..filled {
            table.set_row(i, "%d|x", &[Arg::from(i)]).unwrap();
        }
        let before = table.to_text().unwrap();
        prop_assert!(table.set_row(index, "%s", &[Arg::from("a|b")]).is_err());
        prop_assert_eq!(table.to_text().unwrap(), before);
        prop_assert_eq!(table.row_count(), filled);
    }
}
