//! Variadic-style helpers for building argument lists.

/// Build a `&[Arg]` slice from a list of expressions.
///
/// Each expression is converted with [`Arg::from`](crate::format::Arg).
///
/// ```
/// use fort_rust::args;
/// use fort_rust::format::Arg;
///
/// let list = args![1, "two", 3.0, 'f'];
/// assert_eq!(list[1], Arg::Str("two"));
/// assert_eq!(list.len(), 4);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        &[] as &[$crate::format::Arg<'_>]
    };
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::format::Arg::from($arg)),+]
    };
}

/// Set a table's header from a template and inline arguments.
///
/// ```
/// use fort_rust::{Table, set_header};
///
/// let mut table = Table::new().unwrap();
/// assert_eq!(set_header!(table, "%s|%s|%s", "n", "sq", "cube"), Ok(3));
/// ```
#[macro_export]
macro_rules! set_header {
    ($table:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $table.set_header($template, $crate::args![$($arg),*])
    };
}

/// Set a table's body row from a template and inline arguments.
///
/// ```
/// use fort_rust::{Table, set_row};
///
/// let mut table = Table::new().unwrap();
/// for n in 1..=3i64 {
///     set_row!(table, (n - 1) as usize, "%d|%d|%d", n, n * n, n * n * n).unwrap();
/// }
/// assert_eq!(table.row(2).unwrap().contents(), ["3", "9", "27"]);
/// ```
#[macro_export]
macro_rules! set_row {
    ($table:expr, $index:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $table.set_row($index, $template, $crate::args![$($arg),*])
    };
}
