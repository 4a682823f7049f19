//! Conversion directives: `%[flags][width][.precision][length]conversion`.
//!
//! Field widths and string precisions count bytes, as C does. A precision
//! that would split a character is cut back to the previous character
//! boundary.

use super::arg::Arg;
use crate::error::{Error, Result};
use bitflags::bitflags;
use std::borrow::Cow;
use std::fmt::Write;

/// Largest width or precision a directive may request.
///
/// Anything larger would make the rendered length unrepresentable as a C
/// `int`, which is treated as an encoding failure.
pub const MAX_FIELD: usize = i32::MAX as usize;

bitflags! {
    /// Directive flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// `-`: left-justify within the field.
        const LEFT = 1 << 0;
        /// `+`: always print a sign for signed conversions.
        const PLUS = 1 << 1;
        /// ` `: print a blank where a plus sign would go.
        const SPACE = 1 << 2;
        /// `#`: alternate form.
        const ALT = 1 << 3;
        /// `0`: pad numbers with zeros instead of blanks.
        const ZERO = 1 << 4;
    }
}

/// A width or precision, either literal or taken from the argument list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Count {
    Fixed(usize),
    Star,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Signed,
    Unsigned,
    Octal,
    Hex { upper: bool },
    Char,
    Str,
    Fixed { upper: bool },
    Exp { upper: bool },
    General { upper: bool },
}

impl Conversion {
    fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            b'd' | b'i' => Self::Signed,
            b'u' => Self::Unsigned,
            b'o' => Self::Octal,
            b'x' => Self::Hex { upper: false },
            b'X' => Self::Hex { upper: true },
            b'c' => Self::Char,
            b's' => Self::Str,
            b'f' => Self::Fixed { upper: false },
            b'F' => Self::Fixed { upper: true },
            b'e' => Self::Exp { upper: false },
            b'E' => Self::Exp { upper: true },
            b'g' => Self::General { upper: false },
            b'G' => Self::General { upper: true },
            _ => return None,
        })
    }

    fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Signed | Self::Unsigned | Self::Octal | Self::Hex { .. }
        )
    }

    fn is_float(self) -> bool {
        matches!(
            self,
            Self::Fixed { .. } | Self::Exp { .. } | Self::General { .. }
        )
    }
}

/// A parsed directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Byte offset of the `%` in the template.
    pub offset: usize,
    pub flags: Flags,
    pub width: Option<Count>,
    pub precision: Option<Count>,
    pub conversion: Conversion,
}

impl Directive {
    /// Parse the directive whose `%` sits at `offset` in `source`.
    ///
    /// Returns the directive and the byte offset just past it. `%%` is not a
    /// directive and must be handled by the caller.
    pub fn parse(source: &str, offset: usize) -> Result<(Self, usize)> {
        let bytes = source.as_bytes();
        let fail = |reason| Error::EncodingFailure { offset, reason };
        let mut pos = offset + 1;

        let mut flags = Flags::empty();
        while let Some(&b) = bytes.get(pos) {
            let flag = match b {
                b'-' => Flags::LEFT,
                b'+' => Flags::PLUS,
                b' ' => Flags::SPACE,
                b'#' => Flags::ALT,
                b'0' => Flags::ZERO,
                _ => break,
            };
            flags |= flag;
            pos += 1;
        }

        let width = parse_count(bytes, &mut pos).ok_or_else(|| fail("field width too large"))?;

        let precision = if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            // A bare '.' means precision zero.
            Some(
                parse_count(bytes, &mut pos)
                    .ok_or_else(|| fail("precision too large"))?
                    .unwrap_or(Count::Fixed(0)),
            )
        } else {
            None
        };

        while matches!(
            bytes.get(pos),
            Some(b'h' | b'l' | b'j' | b'z' | b't' | b'L' | b'q')
        ) {
            pos += 1;
        }

        let Some(&b) = bytes.get(pos) else {
            return Err(fail("incomplete directive"));
        };
        let conversion = Conversion::from_byte(b).ok_or_else(|| fail("unsupported conversion"))?;

        // Every byte consumed above is ASCII, so pos + 1 is a char boundary.
        Ok((
            Self {
                offset,
                flags,
                width,
                precision,
                conversion,
            },
            pos + 1,
        ))
    }

    /// Render the directive, pulling arguments from `args`.
    pub fn write<W: Write>(&self, out: &mut W, args: &mut ArgCursor<'_, '_>) -> Result<()> {
        let mut flags = self.flags;

        let width = match self.width {
            None => 0,
            Some(Count::Fixed(w)) => w,
            Some(Count::Star) => {
                let w = self.int_arg(args, "width argument is not an integer")?;
                if w < 0 {
                    flags |= Flags::LEFT;
                }
                self.field(w.unsigned_abs())?
            }
        };

        let precision = match self.precision {
            None => None,
            Some(Count::Fixed(p)) => Some(p),
            Some(Count::Star) => {
                let p = self.int_arg(args, "precision argument is not an integer")?;
                // A negative precision is taken as if it were omitted.
                if p < 0 { None } else { Some(self.field(p.unsigned_abs())?) }
            }
        };

        let arg = args.next().ok_or_else(|| self.fail("missing argument"))?;
        let mismatch = || self.fail("argument does not match conversion");

        let field = match self.conversion {
            Conversion::Signed => {
                let v = arg.as_signed().ok_or_else(mismatch)?;
                let sign = if v < 0 { "-" } else { positive_sign(flags) };
                Field::number(sign, "", v.unsigned_abs().to_string(), v == 0, precision)
            }
            Conversion::Unsigned => {
                let v = arg.as_unsigned().ok_or_else(mismatch)?;
                Field::number("", "", v.to_string(), v == 0, precision)
            }
            Conversion::Octal => {
                let v = arg.as_unsigned().ok_or_else(mismatch)?;
                let mut field = Field::number("", "", format!("{v:o}"), v == 0, precision);
                if flags.contains(Flags::ALT) && field.leading_zeros == 0 && !field.body.starts_with('0') {
                    field.leading_zeros = 1;
                }
                field
            }
            Conversion::Hex { upper } => {
                let v = arg.as_unsigned().ok_or_else(mismatch)?;
                let digits = if upper { format!("{v:X}") } else { format!("{v:x}") };
                let prefix = match (flags.contains(Flags::ALT) && v != 0, upper) {
                    (false, _) => "",
                    (true, false) => "0x",
                    (true, true) => "0X",
                };
                Field::number("", prefix, digits, v == 0, precision)
            }
            Conversion::Char => {
                Field::text(Cow::Owned(arg.as_char().ok_or_else(mismatch)?.to_string()))
            }
            Conversion::Str => {
                let s = arg.as_str().ok_or_else(mismatch)?;
                Field::text(Cow::Borrowed(match precision {
                    Some(p) => truncate_bytes(s, p),
                    None => s,
                }))
            }
            conversion => {
                debug_assert!(conversion.is_float());
                let v = arg.as_float().ok_or_else(mismatch)?;
                let mut field = float_field(v.abs(), conversion, precision.unwrap_or(6), flags);
                field.sign = if v.is_sign_negative() && !v.is_nan() {
                    "-"
                } else {
                    positive_sign(flags)
                };
                field
            }
        };

        // Zero padding is ignored for integers when a precision is given.
        let zero_pad = field.zero_pad
            && flags.contains(Flags::ZERO)
            && !flags.contains(Flags::LEFT)
            && !(self.conversion.is_integer() && precision.is_some());

        field
            .write(out, width, flags.contains(Flags::LEFT), zero_pad)
            .map_err(|_| self.fail("rendered text too long"))
    }

    fn int_arg(&self, args: &mut ArgCursor<'_, '_>, reason: &'static str) -> Result<i64> {
        let arg = args.next().ok_or_else(|| self.fail("missing argument"))?;
        match arg {
            Arg::Int(_) | Arg::UInt(_) => arg.as_signed().ok_or_else(|| self.fail(reason)),
            _ => Err(self.fail(reason)),
        }
    }

    fn field(&self, n: u64) -> Result<usize> {
        usize::try_from(n)
            .ok()
            .filter(|&n| n <= MAX_FIELD)
            .ok_or_else(|| self.fail("field width too large"))
    }

    fn fail(&self, reason: &'static str) -> Error {
        Error::EncodingFailure {
            offset: self.offset,
            reason,
        }
    }
}

/// Sequential view over the argument list.
#[derive(Debug)]
pub struct ArgCursor<'s, 'a> {
    args: &'s [Arg<'a>],
    next: usize,
}

impl<'s, 'a> ArgCursor<'s, 'a> {
    pub fn new(args: &'s [Arg<'a>]) -> Self {
        Self { args, next: 0 }
    }

    /// Number of arguments consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl<'a> Iterator for ArgCursor<'_, 'a> {
    type Item = Arg<'a>;

    fn next(&mut self) -> Option<Arg<'a>> {
        let arg = self.args.get(self.next).copied()?;
        self.next += 1;
        Some(arg)
    }
}

/// Parse a decimal count or `*`. `None` on overflow.
fn parse_count(bytes: &[u8], pos: &mut usize) -> Option<Option<Count>> {
    if bytes.get(*pos) == Some(&b'*') {
        *pos += 1;
        return Some(Some(Count::Star));
    }
    let start = *pos;
    let mut n: usize = 0;
    while let Some(&b) = bytes.get(*pos) {
        if !b.is_ascii_digit() {
            break;
        }
        n = n.checked_mul(10)?.checked_add(usize::from(b - b'0'))?;
        if n > MAX_FIELD {
            return None;
        }
        *pos += 1;
    }
    Some((*pos > start).then_some(Count::Fixed(n)))
}

fn positive_sign(flags: Flags) -> &'static str {
    if flags.contains(Flags::PLUS) {
        "+"
    } else if flags.contains(Flags::SPACE) {
        " "
    } else {
        ""
    }
}

/// Longest prefix of `s` of at most `max` bytes that ends on a char
/// boundary.
fn truncate_bytes(s: &str, max: usize) -> &str {
    if max >= s.len() {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Fraction digits past this are always zero for an `f64`: the smallest
/// subnormal has 1074 of them.
const FLOAT_DIGITS: usize = 1100;

fn float_field(v: f64, conversion: Conversion, precision: usize, flags: Flags) -> Field<'static> {
    let alt = flags.contains(Flags::ALT);
    let mut field = if v.is_nan() {
        Field::text(Cow::Borrowed("nan"))
    } else if v.is_infinite() {
        Field::text(Cow::Borrowed("inf"))
    } else {
        match conversion {
            Conversion::Fixed { .. } => fixed(v, precision, alt),
            Conversion::Exp { .. } => exponent(v, precision, alt),
            _ => general(v, precision, alt),
        }
    };
    if matches!(
        conversion,
        Conversion::Fixed { upper: true } | Conversion::Exp { upper: true } | Conversion::General { upper: true }
    ) {
        field.body = Cow::Owned(field.body.to_ascii_uppercase());
        field.suffix.make_ascii_uppercase();
    }
    field
}

fn fixed(v: f64, precision: usize, alt: bool) -> Field<'static> {
    let shown = precision.min(FLOAT_DIGITS);
    let mut body = format!("{v:.shown$}");
    if alt && precision == 0 {
        body.push('.');
    }
    Field::float(body, precision - shown, String::new())
}

/// `%e` style: one digit, fraction, then a signed exponent of at least two
/// digits.
fn exponent(v: f64, precision: usize, alt: bool) -> Field<'static> {
    let (mut mantissa, exp) = split_exponent(v, precision);
    if alt && precision == 0 {
        mantissa.push('.');
    }
    let sign = if exp < 0 { '-' } else { '+' };
    let suffix = format!("e{sign}{:02}", exp.unsigned_abs());
    Field::float(mantissa, precision - precision.min(FLOAT_DIGITS), suffix)
}

fn split_exponent(v: f64, precision: usize) -> (String, i32) {
    let shown = precision.min(FLOAT_DIGITS);
    let s = format!("{v:.shown$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_owned(), exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// `%g` style: the shorter of fixed and exponent notation, decided by the
/// exponent, with trailing zeros removed unless `#` is given.
fn general(v: f64, precision: usize, alt: bool) -> Field<'static> {
    let p = precision.max(1);
    let exp = if v == 0.0 { 0 } else { split_exponent(v, p - 1).1 };

    // Fixed notation when -4 <= exp < p.
    let mut field = match usize::try_from(exp) {
        Ok(e) if e < p => fixed(v, p - 1 - e, alt),
        Err(_) if exp >= -4 => fixed(v, p - 1 + exp.unsigned_abs() as usize, alt),
        _ => exponent(v, p - 1, alt),
    };

    if !alt {
        field.trailing_zeros = 0;
        if field.body.contains('.') {
            let trimmed = field.body.trim_end_matches('0').trim_end_matches('.').len();
            field.body.to_mut().truncate(trimmed);
        }
    }
    field
}

/// A rendered directive before field-width padding.
///
/// Runs of zeros are kept as counts so a large precision never builds the
/// zeros in memory.
struct Field<'a> {
    sign: &'static str,
    prefix: &'static str,
    zero_pad: bool,
    leading_zeros: usize,
    body: Cow<'a, str>,
    trailing_zeros: usize,
    suffix: String,
}

impl<'a> Field<'a> {
    /// Integer digits with a minimum digit count from `precision`, and no
    /// digits at all for a zero value with precision zero.
    fn number(
        sign: &'static str,
        prefix: &'static str,
        digits: String,
        is_zero: bool,
        precision: Option<usize>,
    ) -> Self {
        let (digits, leading_zeros) = match precision {
            Some(0) if is_zero => (String::new(), 0),
            Some(p) => {
                let zeros = p.saturating_sub(digits.len());
                (digits, zeros)
            }
            None => (digits, 0),
        };
        Self {
            sign,
            prefix,
            zero_pad: true,
            leading_zeros,
            body: Cow::Owned(digits),
            trailing_zeros: 0,
            suffix: String::new(),
        }
    }

    fn float(body: String, trailing_zeros: usize, suffix: String) -> Self {
        Self {
            sign: "",
            prefix: "",
            zero_pad: true,
            leading_zeros: 0,
            body: Cow::Owned(body),
            trailing_zeros,
            suffix,
        }
    }

    fn text(body: Cow<'a, str>) -> Self {
        Self {
            sign: "",
            prefix: "",
            zero_pad: false,
            leading_zeros: 0,
            body,
            trailing_zeros: 0,
            suffix: String::new(),
        }
    }

    /// Length in bytes, before padding.
    fn len(&self) -> usize {
        [
            self.sign.len(),
            self.prefix.len(),
            self.leading_zeros,
            self.body.len(),
            self.trailing_zeros,
            self.suffix.len(),
        ]
        .into_iter()
        .fold(0, usize::saturating_add)
    }

    fn write<W: Write>(&self, out: &mut W, width: usize, left: bool, zero_pad: bool) -> std::fmt::Result {
        let fill = width.saturating_sub(self.len());

        if left {
            out.write_str(self.sign)?;
            out.write_str(self.prefix)?;
            self.write_digits(out)?;
            write_repeated(out, ' ', fill)
        } else if zero_pad {
            out.write_str(self.sign)?;
            out.write_str(self.prefix)?;
            write_repeated(out, '0', fill)?;
            self.write_digits(out)
        } else {
            write_repeated(out, ' ', fill)?;
            out.write_str(self.sign)?;
            out.write_str(self.prefix)?;
            self.write_digits(out)
        }
    }

    fn write_digits<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        write_repeated(out, '0', self.leading_zeros)?;
        out.write_str(&self.body)?;
        write_repeated(out, '0', self.trailing_zeros)?;
        out.write_str(&self.suffix)
    }
}

fn write_repeated<W: Write>(out: &mut W, ch: char, count: usize) -> std::fmt::Result {
    const SPACES: &str = "                                                                ";
    const ZEROS: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    let chunk = if ch == '0' { ZEROS } else { SPACES };
    let mut left = count;
    while left > 0 {
        let n = left.min(chunk.len());
        out.write_str(&chunk[..n])?;
        left -= n;
    }
    Ok(())
}
