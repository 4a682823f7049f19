//! Template arguments.

/// One argument substituted into a template directive.
///
/// Integer directives accept both signed and unsigned arguments (and chars,
/// which promote to their code point). Everything else must match its
/// directive exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(&'a str),
}

impl Arg<'_> {
    /// Value as a signed integer. Unsigned values wrap.
    #[must_use]
    pub fn as_signed(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => Some(v as i64),
            Self::Char(c) => Some(i64::from(u32::from(c))),
            Self::Float(_) | Self::Str(_) => None,
        }
    }

    /// Value as an unsigned integer. Negative values wrap.
    #[must_use]
    pub fn as_unsigned(&self) -> Option<u64> {
        match *self {
            Self::Int(v) => Some(v as u64),
            Self::UInt(v) => Some(v),
            Self::Char(c) => Some(u64::from(u32::from(c))),
            Self::Float(_) | Self::Str(_) => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Value as a character. Integers are accepted when they are a valid
    /// Unicode scalar value.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match *self {
            Self::Char(c) => Some(c),
            Self::Int(v) => u32::try_from(v).ok().and_then(char::from_u32),
            Self::UInt(v) => u32::try_from(v).ok().and_then(char::from_u32),
            Self::Float(_) | Self::Str(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Self::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64: u8, u16, u32, u64, usize);

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(s.as_str())
    }
}
