use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::{classify, split_sign, trim_leading_zeros, Shape};
use crate::{Error, ErrorKind};

/// An arbitrary-precision decimal that keeps its literal text.
///
/// Only redundant leading zeros of the integer part are dropped, so fraction
/// digits, the exponent marker and the exponent sign survive a round trip.
/// Equality compares numeric value: `1.50`, `15e-1` and `0.15E1` are equal, and
/// so are `0.0` and `-0.0`.
#[derive(Debug, Clone)]
pub struct Real {
    repr: String,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Decimal {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Real {
    /// Parses a literal with a fraction, an exponent, or both.
    pub fn parse(text: &str) -> Option<Self> {
        match classify(text)? {
            Shape::Real => Some(Self::from_literal(text)),
            Shape::Integer => None,
        }
    }

    /// Formats a finite float with `ryu`; `NaN` and infinities have no JSON form.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let mut buffer = ryu::Buffer::new();
        Self::parse(buffer.format_finite(value))
    }

    pub(crate) fn from_literal(text: &str) -> Self {
        let (negative, rest) = split_sign(text);
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let int_part = trim_leading_zeros(&rest[..int_len]);
        let sign = if negative { "-" } else { "" };
        Self {
            repr: format!("{sign}{int_part}{}", &rest[int_len..]),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    pub fn is_negative(&self) -> bool {
        self.decimal().negative
    }

    /// Nearest `f64`; out-of-range exponents saturate to zero or infinity.
    pub fn as_f64(&self) -> Option<f64> {
        self.repr.parse().ok()
    }

    fn decimal(&self) -> Decimal {
        let (negative, rest) = split_sign(&self.repr);
        let (mantissa, exponent) = match rest.find(|ch| ch == 'e' || ch == 'E') {
            Some(idx) => (&rest[..idx], parse_exponent(&rest[idx + 1..])),
            None => (rest, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = format!("{int_part}{frac_part}");
        let leading_trimmed = all_digits.trim_start_matches('0');
        let significant = leading_trimmed.trim_end_matches('0');
        if significant.is_empty() {
            return Decimal {
                negative: false,
                digits: String::new(),
                exponent: 0,
            };
        }

        let trailing_zeros = leading_trimmed.len() - significant.len();
        let exponent = exponent
            .saturating_sub(frac_part.len() as i64)
            .saturating_add(trailing_zeros as i64);
        Decimal {
            negative,
            digits: significant.to_string(),
            exponent,
        }
    }
}

fn parse_exponent(text: &str) -> i64 {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits.bytes().fold(0i64, |acc, byte| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'))
    });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr || self.decimal() == other.decimal()
    }
}

impl Eq for Real {}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.decimal().hash(state);
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for Real {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidNumberFormat,
                format!("{s:?} is not a real literal"),
            )
        })
    }
}
