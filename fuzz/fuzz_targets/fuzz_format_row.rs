//! Fuzz target for the format row builder.
//!
//! Feeds arbitrary templates and argument lists through `Row::from_format_with`.
//! Whatever the input, the builder must either return a row whose column count
//! matches the template or one of the documented errors, and never panic.

#![no_main]

use arbitrary::Arbitrary;
use fort_rust::format::Arg;
use fort_rust::{Error, Row, TableOptions, count_columns};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzArg {
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
}

#[derive(Arbitrary, Debug)]
struct Input {
    template: String,
    args: Vec<FuzzArg>,
}

fuzz_target!(|input: Input| {
    let args: Vec<Arg<'_>> = input
        .args
        .iter()
        .map(|arg| match arg {
            FuzzArg::Int(v) => Arg::Int(*v),
            FuzzArg::UInt(v) => Arg::UInt(*v),
            FuzzArg::Float(v) => Arg::Float(*v),
            FuzzArg::Char(c) => Arg::Char(*c),
            FuzzArg::Str(s) => Arg::Str(s),
        })
        .collect();

    // Keep huge field widths from turning into huge allocations.
    let options = TableOptions::default().with_max_buffer_capacity(1 << 20);

    match Row::from_format_with(&input.template, &args, &options) {
        Ok(row) => assert_eq!(row.column_count(), count_columns(&input.template)),
        Err(Error::ColumnCountMismatch { expected, actual }) => assert_ne!(expected, actual),
        Err(Error::EncodingFailure { offset, .. }) => assert!(offset < input.template.len()),
        Err(Error::OutOfMemory { .. }) => {}
        Err(err @ Error::IndexOutOfRange { .. }) => panic!("unexpected error: {err}"),
    }
});
