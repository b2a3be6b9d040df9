use std::fmt;
use std::str::FromStr;

use super::{classify, split_sign, trim_leading_zeros, Shape};
use crate::{Error, ErrorKind};

/// An arbitrary-precision integer kept as canonical decimal text.
///
/// Canonical means no redundant leading zeros and no negative zero, so two
/// integers are numerically equal exactly when their text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    repr: String,
}

impl Integer {
    /// Parses an integer literal. Fractions and exponents are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        match classify(text)? {
            Shape::Integer => Some(Self::from_literal(text)),
            Shape::Real => None,
        }
    }

    /// Builds from a literal that already matched the integer grammar.
    pub(crate) fn from_literal(text: &str) -> Self {
        let (negative, digits) = split_sign(text);
        let digits = trim_leading_zeros(digits);
        let repr = if negative && digits != "0" {
            format!("-{digits}")
        } else {
            digits.to_string()
        };
        Self { repr }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    pub fn is_negative(&self) -> bool {
        self.repr.starts_with('-')
    }

    pub fn is_zero(&self) -> bool {
        self.repr == "0"
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.repr.parse().ok()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.repr.parse().ok()
    }

    /// Nearest `f64`; magnitudes beyond `f64::MAX` become infinite.
    pub fn as_f64(&self) -> Option<f64> {
        self.repr.parse().ok()
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for Integer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidNumberFormat,
                format!("{s:?} is not an integer literal"),
            )
        })
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Integer {
                fn from(n: $ty) -> Self {
                    let mut buffer = itoa::Buffer::new();
                    Self {
                        repr: buffer.format(n).to_string(),
                    }
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);
