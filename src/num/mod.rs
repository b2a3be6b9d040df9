pub mod integer;
pub mod real;

pub use integer::Integer;
pub use real::Real;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Integer,
    Real,
}

/// Checks `text` against the number grammar and reports which variant it
/// denotes. Rejects literals whose first two digits are both `0`.
pub(crate) fn classify(text: &str) -> Option<Shape> {
    let bytes = text.as_bytes();
    let mut idx = usize::from(bytes.first() == Some(&b'-'));

    let int_start = idx;
    idx = skip_digits(bytes, idx);
    if idx == int_start || bytes[int_start..idx].starts_with(b"00") {
        return None;
    }

    let mut shape = Shape::Integer;
    if bytes.get(idx) == Some(&b'.') {
        let frac_start = idx + 1;
        idx = skip_digits(bytes, frac_start);
        if idx == frac_start {
            return None;
        }
        shape = Shape::Real;
    }

    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        idx += 1;
        if matches!(bytes.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }
        let exp_start = idx;
        idx = skip_digits(bytes, exp_start);
        if idx == exp_start {
            return None;
        }
        shape = Shape::Real;
    }

    (idx == bytes.len()).then_some(shape)
}

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
    while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
        idx += 1;
    }
    idx
}

/// Splits a validated literal into its sign and the remainder.
pub(crate) fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}

/// Drops redundant leading zeros from a run of digits, keeping at least one.
pub(crate) fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        &digits[digits.len() - 1..]
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(Shape::Integer))]
    #[case("42", Some(Shape::Integer))]
    #[case("-17", Some(Shape::Integer))]
    #[case("07", Some(Shape::Integer))]
    #[case("0.5", Some(Shape::Real))]
    #[case("-0.5e10", Some(Shape::Real))]
    #[case("1E+3", Some(Shape::Real))]
    #[case("1e-3", Some(Shape::Real))]
    #[case("1e3", Some(Shape::Real))]
    #[case("00", None)]
    #[case("-007", None)]
    #[case("007.5", None)]
    #[case("-", None)]
    #[case("", None)]
    #[case("1.", None)]
    #[case(".5", None)]
    #[case("1e", None)]
    #[case("1e+", None)]
    #[case("+1", None)]
    #[case("1 ", None)]
    #[case("0x10", None)]
    fn classify_literals(#[case] text: &str, #[case] expected: Option<Shape>) {
        assert_eq!(classify(text), expected);
    }

    #[rstest]
    #[case("000", "0")]
    #[case("0", "0")]
    #[case("07", "7")]
    #[case("120", "120")]
    #[case("", "")]
    fn trims_leading_zeros(#[case] digits: &str, #[case] expected: &str) {
        assert_eq!(trim_leading_zeros(digits), expected);
    }
}
