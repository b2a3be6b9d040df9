mod parser;
pub mod source;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::value::Value;
use crate::{Error, ParseOptions, Result};

use parser::Parser;
use source::{CharSource, ReaderSource, StrSource};

pub fn from_str(input: &str, options: &ParseOptions) -> Result<Value> {
    from_source(StrSource::new(input), options)
}

pub fn from_source<S: CharSource>(source: S, options: &ParseOptions) -> Result<Value> {
    Parser::new(source, options).parse_document()
}

pub fn from_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Value> {
    from_source(ReaderSource::new(reader), options)
}

/// Opens `path` and parses it. The file handle is dropped before returning,
/// on success and on every error path.
pub fn from_file(path: &Path, options: &ParseOptions) -> Result<Value> {
    log::debug!("parsing {}", path.display());
    let file = File::open(path).map_err(|err| Error::io(err).with_context(path.display()))?;
    from_reader(file, options)
}
