//! printf-style templates.
//!
//! A template is literal text with `%` directives, rendered against a slice
//! of [`Arg`] values. The column rule of a formatted row is defined on the
//! literal template text, so templates are kept as strings and interpreted
//! at runtime rather than checked at compile time like `format!`.
//!
//! Supported directives follow C's `printf`:
//! `%[flags][width][.precision][length]conversion` with flags `-+ #0`,
//! `*` widths and precisions, ignored length modifiers, and the conversions
//! `d i u o x X c s f F e E g G` plus `%%`. Malformed directives, missing
//! arguments and arguments of the wrong kind are reported as
//! [`Error::EncodingFailure`](crate::Error::EncodingFailure). Surplus
//! arguments are ignored.
//!
//! # Examples
//!
//! ```
//! use fort_rust::args;
//! use fort_rust::format::render_string;
//!
//! let text = render_string("%-4s|%03d|%.1f", args!["ab", 7, 2.5]).unwrap();
//! assert_eq!(text, "ab  |007|2.5");
//! ```

mod arg;
mod directive;

pub use arg::Arg;
pub use directive::{Conversion, Count, Directive, Flags, MAX_FIELD};

use crate::buffer::StringBuffer;
use crate::error::{Error, Result};
use directive::ArgCursor;
use std::fmt::Write;

/// One parsed piece of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece<'t> {
    Literal(&'t str),
    Directive(Directive),
}

/// A parsed template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template<'t> {
    source: &'t str,
    pieces: Vec<Piece<'t>>,
}

impl<'t> Template<'t> {
    /// Parse `source`, rejecting malformed directives.
    pub fn parse(source: &'t str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;

        while let Some(found) = source[pos..].find('%') {
            let at = pos + found;
            if at > literal_start {
                pieces.push(Piece::Literal(&source[literal_start..at]));
            }
            if source.as_bytes().get(at + 1) == Some(&b'%') {
                pieces.push(Piece::Literal(&source[at + 1..at + 2]));
                pos = at + 2;
            } else {
                let (directive, end) = Directive::parse(source, at)?;
                pieces.push(Piece::Directive(directive));
                pos = end;
            }
            literal_start = pos;
        }
        if literal_start < source.len() {
            pieces.push(Piece::Literal(&source[literal_start..]));
        }

        Ok(Self { source, pieces })
    }

    /// The unparsed template text.
    #[must_use]
    pub fn source(&self) -> &'t str {
        self.source
    }

    /// Parsed pieces in order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece<'t>] {
        &self.pieces
    }

    /// Number of arguments a render consumes, counting `*` widths and
    /// precisions.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(_) => 0,
                Piece::Directive(d) => {
                    1 + usize::from(d.width == Some(Count::Star))
                        + usize::from(d.precision == Some(Count::Star))
                }
            })
            .sum()
    }

    /// Render the template into `out`.
    pub fn render<W: Write>(&self, out: &mut W, args: &[Arg<'_>]) -> Result<()> {
        let mut cursor = ArgCursor::new(args);
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.write_str(text).map_err(|_| Error::EncodingFailure {
                    offset: text.as_ptr() as usize - self.source.as_ptr() as usize,
                    reason: "rendered text too long",
                })?,
                Piece::Directive(directive) => directive.write(out, &mut cursor)?,
            }
        }
        if cursor.consumed() < args.len() {
            tracing::trace!(
                used = cursor.consumed(),
                supplied = args.len(),
                "surplus template arguments ignored"
            );
        }
        Ok(())
    }
}

/// Render `template` into `buffer`, doubling the buffer until the whole
/// text fits.
///
/// Each attempt renders from scratch at the buffer's current capacity. On
/// success the buffer holds the complete rendered text. Text longer than
/// [`MAX_FIELD`] bytes is an encoding failure.
pub fn render_to_buffer(
    buffer: &mut StringBuffer,
    template: &Template<'_>,
    args: &[Arg<'_>],
) -> Result<()> {
    loop {
        let required = buffer.render_with(|w| template.render(w, args))?;
        if required > MAX_FIELD {
            return Err(Error::EncodingFailure {
                offset: 0,
                reason: "rendered text too long",
            });
        }
        if required < buffer.capacity() {
            return Ok(());
        }
        tracing::trace!(
            required,
            capacity = buffer.capacity(),
            "rendered text does not fit, growing"
        );
        buffer.grow_without_copy()?;
    }
}

/// Render a template straight into a new `String`.
pub fn render_string(template: &str, args: &[Arg<'_>]) -> Result<String> {
    let template = Template::parse(template)?;
    let mut out = String::new();
    template.render(&mut out, args)?;
    Ok(out)
}
