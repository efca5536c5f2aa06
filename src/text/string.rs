use std::fmt::Write as _;

/// `true` when `value` can be placed between quotes in Rust source unchanged.
pub fn is_plain_literal(value: &str) -> bool {
    let bytes = value.as_bytes();
    if memchr::memchr2(b'"', b'\\', bytes).is_some() {
        return false;
    }
    if bytes.iter().any(|b| b.is_ascii_control()) {
        return false;
    }
    // Multi-byte sequences are checked per char only when present.
    !bytes.iter().any(|b| *b >= 0x80) || !value.chars().any(needs_unicode_escape)
}

/// Code points rustc rejects or silently reorders inside literals.
fn needs_unicode_escape(ch: char) -> bool {
    matches!(
        ch,
        '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{200E}' | '\u{200F}' | '\u{FEFF}'
    )
}

/// Writes `value` as a quoted Rust string literal.
pub fn write_str_literal(out: &mut String, value: &str) {
    out.push('"');
    if is_plain_literal(value) {
        out.push_str(value);
    } else {
        escape_str_into(out, value);
    }
    out.push('"');
}

pub fn escape_str_into(out: &mut String, value: &str) {
    let mut start = 0;
    for (idx, ch) in value.char_indices() {
        let escaped = match ch {
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\0' => "\\0",
            '"' => "\\\"",
            '\\' => "\\\\",
            _ if ch.is_ascii_control() || needs_unicode_escape(ch) => {
                out.push_str(&value[start..idx]);
                let _ = write!(out, "\\u{{{:x}}}", ch as u32);
                start = idx + ch.len_utf8();
                continue;
            }
            _ => continue,
        };
        out.push_str(&value[start..idx]);
        out.push_str(escaped);
        start = idx + ch.len_utf8();
    }
    out.push_str(&value[start..]);
}
