use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::errors::{GenerationError, Result};

/// Render `value` as compact JSON containing only ASCII characters.
///
/// Non-ASCII characters are written as `\uXXXX` escapes (UTF-16 code units),
/// so the text can be embedded in SQL and JavaScript sources verbatim.
pub fn to_ascii_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, AsciiFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| GenerationError::Encoding(err.to_string()))
}

struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ascii_text_is_unchanged_and_keys_keep_insertion_order() {
        let text = to_ascii_json(&json!({"title": "Teatown", "stars": 4})).expect("encode");
        assert_eq!(text, r#"{"title":"Teatown","stars":4}"#);
    }

    #[test]
    fn non_ascii_is_escaped() {
        let text = to_ascii_json(&json!("Z\u{fc}rich")).expect("encode");
        assert_eq!(text, r#""Z\u00fcrich""#);
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        let text = to_ascii_json(&json!("\u{2708}\u{1f6eb}")).expect("encode");
        assert_eq!(text, r#""\u2708\ud83d\udeeb""#);
    }

    #[test]
    fn line_separators_cannot_leak() {
        let text = to_ascii_json(&json!("a\u{2028}b\u{2029}c\nd")).expect("encode");
        assert_eq!(text, r#""a\u2028b\u2029c\nd""#);
        assert!(text.is_ascii());
    }

    #[test]
    fn escaped_text_decodes_to_the_original() {
        let original = json!({
            "name": "Krak\u{f3}w \"G\u{142}\u{f3}wny\"",
            "tags": ["\u{e9}", "\u{df}"]
        });
        let text = to_ascii_json(&original).expect("encode");
        let decoded: serde_json::Value = serde_json::from_str(&text).expect("decode");
        assert_eq!(decoded, original);
    }
}
