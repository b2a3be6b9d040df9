use crate::constants::is_json_whitespace;
use crate::num::{Integer, Real};
use crate::value::{Object, Value};
use crate::{ErrorKind, ParseOptions, Result};

use super::source::{CharSource, Cursor};

/// Recursive-descent parser over a position-tracked source.
///
/// The source offers no pushback. Numbers are the only construct whose end is
/// known one character late; that character is parked in `lookahead` and
/// handed to whatever rule runs next.
pub(crate) struct Parser<S> {
    cursor: Cursor<S>,
    lookahead: Option<Option<char>>,
    depth: usize,
    max_depth: Option<usize>,
    object_capacity: usize,
}

impl<S: CharSource> Parser<S> {
    pub(crate) fn new(source: S, options: &ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            lookahead: None,
            depth: 0,
            max_depth: options.max_depth,
            object_capacity: options.object_capacity,
        }
    }

    pub(crate) fn parse_document(mut self) -> Result<Value> {
        let first = self.significant()?;
        let value = self.parse_value(first)?;
        match self.significant()? {
            None => {
                log::trace!("parsed document spanning {} reads", self.cursor.position());
                Ok(value)
            }
            Some(ch) => Err(self.cursor.error(
                ErrorKind::TrailingCharacters,
                format!("expected end of input, found {ch:?}"),
            )),
        }
    }

    fn significant(&mut self) -> Result<Option<char>> {
        match self.lookahead.take() {
            Some(Some(ch)) if is_json_whitespace(ch) => self.cursor.next_significant(),
            Some(pending) => Ok(pending),
            None => self.cursor.next_significant(),
        }
    }

    fn parse_value(&mut self, first: Option<char>) -> Result<Value> {
        match first {
            None => Err(self.unexpected_end()),
            Some(ch @ ('-' | '0'..='9')) => self.parse_number(ch),
            Some('"') => self.parse_string().map(Value::String),
            Some('{') => self.nested(Self::parse_object),
            Some('[') => self.nested(Self::parse_array),
            Some('t') => self.parse_constant("true", Value::Boolean(true)),
            Some('f') => self.parse_constant("false", Value::Boolean(false)),
            Some('n') => self.parse_constant("null", Value::Null),
            Some(ch) => Err(self.cursor.error(
                ErrorKind::InvalidInitialCharacter,
                format!("no value starts with {ch:?}"),
            )),
        }
    }

    fn unexpected_end(&self) -> crate::Error {
        self.cursor
            .error(ErrorKind::UnexpectedEndOfInput, "input ended inside a value")
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        self.depth += 1;
        if let Some(max_depth) = self.max_depth {
            if self.depth > max_depth {
                return Err(self.cursor.error(
                    ErrorKind::DepthLimitExceeded,
                    format!("nesting deeper than {max_depth} levels"),
                ));
            }
        }
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        let mut next = self.significant()?;
        if next == Some(']') {
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value(next)?);
            match self.significant()? {
                Some(',') => next = self.significant()?,
                Some(']') => return Ok(Value::Array(items)),
                None => return Err(self.unexpected_end()),
                Some(ch) => {
                    return Err(self.cursor.error(
                        ErrorKind::InvalidObjectOrArrayFormat,
                        format!("expected ',' or ']' in array, found {ch:?}"),
                    ))
                }
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        let mut object = Object::with_capacity(self.object_capacity);
        let mut next = self.significant()?;
        if next == Some('}') {
            return Ok(Value::Object(object));
        }

        loop {
            let key = match self.parse_value(next)? {
                Value::String(key) => key,
                other => {
                    return Err(self.cursor.error(
                        ErrorKind::InvalidHashKey,
                        format!("object keys must be strings, found {}", other.type_name()),
                    ))
                }
            };

            match self.significant()? {
                Some(':') => {}
                None => return Err(self.unexpected_end()),
                Some(ch) => {
                    return Err(self.cursor.error(
                        ErrorKind::InvalidObjectOrArrayFormat,
                        format!("expected ':' after object key, found {ch:?}"),
                    ))
                }
            }

            let first = self.significant()?;
            let value = self.parse_value(first)?;
            object.set(key, value);

            match self.significant()? {
                Some(',') => next = self.significant()?,
                Some('}') => return Ok(Value::Object(object)),
                None => return Err(self.unexpected_end()),
                Some(ch) => {
                    return Err(self.cursor.error(
                        ErrorKind::InvalidObjectOrArrayFormat,
                        format!("expected ',' or '}}' in object, found {ch:?}"),
                    ))
                }
            }
        }
    }

    fn parse_constant(&mut self, word: &'static str, value: Value) -> Result<Value> {
        for expected in word.chars().skip(1) {
            match self.cursor.next()? {
                Some(ch) if ch == expected => {}
                Some(ch) => {
                    return Err(self.cursor.error(
                        ErrorKind::InvalidConstant,
                        format!("expected {expected:?} while reading `{word}`, found {ch:?}"),
                    ))
                }
                None => return Err(self.unexpected_end()),
            }
        }
        Ok(value)
    }

    /// Reads the body of a string whose opening quote was already consumed.
    fn parse_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.cursor.next()? {
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.parse_escape()?),
                Some(ch) => out.push(ch),
                None => return Err(self.unexpected_end()),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let ch = match self.cursor.next()? {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{08}',
            Some('f') => '\u{0c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.parse_unicode_escape(),
            Some(other) => {
                return Err(self.cursor.error(
                    ErrorKind::InvalidEscape,
                    format!("unknown escape sequence \\{other}"),
                ))
            }
            None => return Err(self.unexpected_end()),
        };
        Ok(ch)
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let unit = self.read_hex_unit()?;
        let code = match unit {
            0xd800..=0xdbff => {
                for expected in ['\\', 'u'] {
                    match self.cursor.next()? {
                        Some(ch) if ch == expected => {}
                        Some(_) => {
                            return Err(self.cursor.error(
                                ErrorKind::InvalidEscape,
                                "high surrogate must be followed by a \\u low surrogate",
                            ))
                        }
                        None => return Err(self.unexpected_end()),
                    }
                }
                let low = self.read_hex_unit()?;
                if !(0xdc00..=0xdfff).contains(&low) {
                    return Err(self.cursor.error(
                        ErrorKind::InvalidEscape,
                        format!("\\u{low:04x} is not a low surrogate"),
                    ));
                }
                0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00)
            }
            0xdc00..=0xdfff => {
                return Err(self.cursor.error(
                    ErrorKind::InvalidEscape,
                    format!("unpaired low surrogate \\u{unit:04x}"),
                ))
            }
            _ => unit,
        };
        char::from_u32(code).ok_or_else(|| {
            self.cursor
                .error(ErrorKind::InvalidEscape, format!("invalid code point {code:#x}"))
        })
    }

    fn read_hex_unit(&mut self) -> Result<u32> {
        let mut unit = 0;
        for _ in 0..4 {
            let digit = match self.cursor.next()? {
                Some(ch) => ch.to_digit(16).ok_or_else(|| {
                    self.cursor.error(
                        ErrorKind::InvalidEscape,
                        format!("{ch:?} is not a hex digit"),
                    )
                })?,
                None => return Err(self.unexpected_end()),
            };
            unit = unit * 16 + digit;
        }
        Ok(unit)
    }

    /// Reads `-? digits (. digits)? ([eE] [+-]? digits)?` starting at `first`.
    ///
    /// The character that ends the literal is left in `lookahead`.
    fn parse_number(&mut self, first: char) -> Result<Value> {
        let mut literal = String::new();
        let mut current = Some(first);
        if first == '-' {
            literal.push('-');
            current = self.cursor.next()?;
        }

        let int_offset = self.cursor.position();
        let int_start = literal.len();
        current = self.read_digits(&mut literal, current)?;
        if literal.len() == int_start {
            return Err(self.cursor.error(
                ErrorKind::InvalidNumberFormat,
                "expected a digit in number",
            ));
        }
        if literal[int_start..].starts_with("00") {
            return Err(crate::Error::at(
                ErrorKind::InvalidNumberFormat,
                int_offset + 1,
                format!("leading zeros in number {literal}"),
            ));
        }

        let mut is_real = false;
        if current == Some('.') {
            literal.push('.');
            current = self.required_digits(&mut literal, "fraction")?;
            is_real = true;
        }

        if let Some(marker @ ('e' | 'E')) = current {
            literal.push(marker);
            current = self.cursor.next()?;
            if let Some(sign @ ('+' | '-')) = current {
                literal.push(sign);
                current = self.cursor.next()?;
            }
            let exp_start = literal.len();
            current = self.read_digits(&mut literal, current)?;
            if literal.len() == exp_start {
                return Err(self.cursor.error(
                    ErrorKind::InvalidNumberFormat,
                    "expected a digit in exponent",
                ));
            }
            is_real = true;
        }

        self.lookahead = Some(current);
        Ok(if is_real {
            Value::Real(Real::from_literal(&literal))
        } else {
            Value::Integer(Integer::from_literal(&literal))
        })
    }

    fn required_digits(&mut self, literal: &mut String, part: &str) -> Result<Option<char>> {
        let first = self.cursor.next()?;
        let start = literal.len();
        let current = self.read_digits(literal, first)?;
        if literal.len() == start {
            return Err(self.cursor.error(
                ErrorKind::InvalidNumberFormat,
                format!("expected a digit in {part}"),
            ));
        }
        Ok(current)
    }

    fn read_digits(
        &mut self,
        literal: &mut String,
        mut current: Option<char>,
    ) -> Result<Option<char>> {
        while let Some(ch @ '0'..='9') = current {
            literal.push(ch);
            current = self.cursor.next()?;
        }
        Ok(current)
    }
}
