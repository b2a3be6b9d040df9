mod writer;

use std::io::Write;

use crate::value::Value;
use crate::{Error, Result};

use writer::Writer;

pub fn to_string(value: &Value) -> String {
    let mut writer = Writer::new();
    writer.write_value(value);
    writer.finish()
}

pub fn to_writer<W: Write>(mut writer: W, value: &Value) -> Result<()> {
    let text = to_string(value);
    writer.write_all(text.as_bytes()).map_err(Error::io)?;
    writer.flush().map_err(Error::io)
}
