//! Fuzz target for literal row splitting and table rendering.
//!
//! Splits arbitrary text into a row, installs it in a table through a `%s`
//! template when possible, and checks that rendering reproduces every cell.

#![no_main]

use fort_rust::{Row, Table, args, count_columns};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let row = Row::from_literal(text).expect("literal rows only fail on allocation");
    assert_eq!(row.column_count(), count_columns(text));
    assert_eq!(row.contents().join("|"), text);

    let mut table = Table::new().expect("empty table");
    if table.set_row(3, "%s", args![text]).is_ok() {
        let rendered = table.to_text().expect("render");
        assert!(rendered.starts_with("\n\n\n| "));
        assert!(rendered.ends_with('\n'));
    }
});
