pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod map;
pub mod num;
pub mod options;
pub mod text;
pub mod value;

use std::io::{Read, Write};
use std::path::Path;

pub use crate::decode::source::{CharSource, Cursor, ReaderSource, StrSource};
pub use crate::error::{Error, ErrorKind};
pub use crate::map::ChainedMap;
pub use crate::num::{Integer, Real};
pub use crate::options::ParseOptions;
pub use crate::value::{Object, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    decode::from_str(input, options)
}

pub fn parse_source<S: CharSource>(source: S) -> Result<Value> {
    parse_source_with_options(source, &ParseOptions::default())
}

pub fn parse_source_with_options<S: CharSource>(source: S, options: &ParseOptions) -> Result<Value> {
    decode::from_source(source, options)
}

pub fn parse_reader<R: Read>(reader: R) -> Result<Value> {
    parse_reader_with_options(reader, &ParseOptions::default())
}

pub fn parse_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Value> {
    decode::from_reader(reader, options)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    parse_file_with_options(path, &ParseOptions::default())
}

pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Value> {
    decode::from_file(path.as_ref(), options)
}

pub fn serialize(value: &Value) -> String {
    encode::to_string(value)
}

pub fn to_writer<W: Write>(writer: W, value: &Value) -> Result<()> {
    encode::to_writer(writer, value)
}
