use memchr::memchr3;

/// Characters written as a backslash escape; everything else goes out verbatim.
pub(crate) fn escape_for(byte: u8) -> Option<&'static str> {
    match byte {
        b'\n' => Some("\\n"),
        b'\t' => Some("\\t"),
        b'\r' => Some("\\r"),
        b'"' => Some("\\\""),
        b'\\' => Some("\\\\"),
        0x0c => Some("\\f"),
        _ => None,
    }
}

fn needs_escape(value: &str) -> bool {
    let bytes = value.as_bytes();
    memchr3(b'"', b'\\', b'\n', bytes).is_some() || memchr3(b'\t', b'\r', 0x0c, bytes).is_some()
}

pub fn escape_string_into(out: &mut String, value: &str) {
    if !needs_escape(value) {
        out.push_str(value);
        return;
    }

    let bytes = value.as_bytes();
    let mut start = 0;
    for (idx, byte) in bytes.iter().enumerate() {
        let Some(escaped) = escape_for(*byte) else {
            continue;
        };
        if start < idx {
            out.push_str(&value[start..idx]);
        }
        out.push_str(escaped);
        start = idx + 1;
    }
    if start < value.len() {
        out.push_str(&value[start..]);
    }
}

pub fn write_quoted_into(out: &mut String, value: &str) {
    out.push('"');
    escape_string_into(out, value);
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("a\nb", "a\\nb")]
    #[case("tab\there", "tab\\there")]
    #[case("cr\r", "cr\\r")]
    #[case("say \"hi\"", "say \\\"hi\\\"")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("form\u{0c}feed", "form\\ffeed")]
    #[case("bell\u{07} and backspace\u{08}", "bell\u{07} and backspace\u{08}")]
    #[case("slash / stays", "slash / stays")]
    #[case("é€😀", "é€😀")]
    #[case("", "")]
    fn escape_table(#[case] input: &str, #[case] expected: &str) {
        let mut out = String::new();
        escape_string_into(&mut out, input);
        assert_eq!(out, expected);
    }

    #[rstest]
    fn quotes_wrap_escaped_text() {
        let mut out = String::new();
        write_quoted_into(&mut out, "a\"b");
        assert_eq!(out, "\"a\\\"b\"");
    }
}
