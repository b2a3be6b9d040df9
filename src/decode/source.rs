use std::io::{self, BufReader, Bytes, Read};
use std::str::Chars;

use crate::constants::is_json_whitespace;
use crate::{Error, ErrorKind, Result};

/// A stream of code points. `Ok(None)` marks the end of input.
pub trait CharSource {
    fn read_char(&mut self) -> Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> Result<Option<char>> {
        (**self).read_char()
    }
}

pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Decodes UTF-8 from a byte reader one code point at a time.
pub struct ReaderSource<R: Read> {
    bytes: Bytes<BufReader<R>>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        self.bytes.next().transpose().map_err(Error::io)
    }
}

fn invalid_utf8() -> Error {
    Error::io(io::Error::new(
        io::ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    ))
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        let width = match lead {
            0x00..=0x7f => return Ok(Some(char::from(lead))),
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(invalid_utf8()),
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(invalid_utf8)?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|text| text.chars().next())
            .map(Some)
            .ok_or_else(invalid_utf8)
    }
}

/// Wraps a [`CharSource`] and counts every read.
///
/// The position starts at 0 and grows by one per call to [`next`](Self::next),
/// end-of-input reads included, so after a read it names the 1-based offset of
/// the character just returned.
pub struct Cursor<S> {
    source: S,
    position: usize,
}

impl<S: CharSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    pub fn next(&mut self) -> Result<Option<char>> {
        self.position += 1;
        let position = self.position;
        self.source
            .read_char()
            .map_err(|err| err.with_offset(position))
    }

    /// Reads past JSON whitespace and returns the first other character.
    pub fn next_significant(&mut self) -> Result<Option<char>> {
        loop {
            match self.next()? {
                Some(ch) if is_json_whitespace(ch) => continue,
                other => return Ok(other),
            }
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::at(kind, self.position, message)
    }
}
