//! String literal quoting for keys and string values.

use std::fmt::{self, Write};

/// Write `s` as a double-quoted string literal.
///
/// Only `"`, `\` and control characters are escaped; everything else, including
/// non-ASCII text, is written as is (output is UTF-8).
pub(crate) fn write_quoted<W: Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    // Copy unescaped runs in one call instead of char by char.
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        let escape = match ch {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{8}' => "\\b",
            '\u{c}' => "\\f",
            c if (c as u32) < 0x20 || c == '\u{7f}' => "",
            _ => continue,
        };
        out.write_str(&s[start..i])?;
        if escape.is_empty() {
            write!(out, "\\u{:04x}", ch as u32)?;
        } else {
            out.write_str(escape)?;
        }
        start = i + ch.len_utf8();
    }
    out.write_str(&s[start..])?;
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::write_quoted;

    fn quoted(s: &str) -> String {
        let mut out = String::new();
        write_quoted(&mut out, s).unwrap();
        out
    }

    #[test]
    fn plain_text_is_wrapped() {
        assert_eq!(quoted("hello"), "\"hello\"");
        assert_eq!(quoted(""), "\"\"");
        assert_eq!(quoted("grüße 🌍"), "\"grüße 🌍\"");
    }

    #[test]
    fn structural_characters_are_escaped() {
        assert_eq!(quoted("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(quoted(r"C:\tmp"), r#""C:\\tmp""#);
        assert_eq!(quoted("a\nb\tc"), r#""a\nb\tc""#);
    }

    #[test]
    fn other_controls_use_unicode_escapes() {
        assert_eq!(quoted("\u{1}x\u{1f}"), r#""\u0001x\u001f""#);
        assert_eq!(quoted("\u{7f}"), r#""\u007f""#);
    }
}
