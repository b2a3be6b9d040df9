use crate::text::write_quoted_into;
use crate::value::Value;

/// Renders a value tree as canonical JSON text.
///
/// Arrays separate elements with `", "`, objects separate members with `", "`
/// and keys from values with `": "`. Object members come out in table
/// iteration order.
pub(crate) struct Writer {
    buffer: String,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.buffer.push_str("null"),
            Value::Boolean(true) => self.buffer.push_str("true"),
            Value::Boolean(false) => self.buffer.push_str("false"),
            Value::Integer(integer) => self.buffer.push_str(integer.as_str()),
            Value::Real(real) => self.buffer.push_str(real.as_str()),
            Value::String(text) => write_quoted_into(&mut self.buffer, text),
            Value::Array(items) => self.write_array(items),
            Value::Object(object) => self.write_object(object),
        }
    }

    fn write_array(&mut self, items: &[Value]) {
        self.buffer.push('[');
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.buffer.push_str(", ");
            }
            self.write_value(item);
        }
        self.buffer.push(']');
    }

    fn write_object(&mut self, object: &crate::value::Object) {
        self.buffer.push('{');
        for (idx, (key, value)) in object.iter().enumerate() {
            if idx > 0 {
                self.buffer.push_str(", ");
            }
            write_quoted_into(&mut self.buffer, key);
            self.buffer.push_str(": ");
            self.write_value(value);
        }
        self.buffer.push('}');
    }
}
