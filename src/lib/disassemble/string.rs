use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\A(?:[a-zA-Z_$\(<]|\[[A-Z\[])[a-zA-Z0-9_$;/\[\(\)<>*+-]*\z").unwrap();
}

fn is_word(s: &str) -> bool {
    WORD_RE.is_match(s)
}

/// Render a string constant, leaving identifier-like strings bare and quoting
/// and escaping everything else.
pub(super) fn escape(s: &str) -> Cow<str> {
    if is_word(s) {
        return Cow::from(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.encode_utf16() {
        match c {
            34 => out.push_str("\\\""),
            92 => out.push_str("\\\\"),
            32..=126 => out.push(char::from(c as u8)),
            _ => write!(&mut out, "\\u{:04X}", c).unwrap(),
        }
    }
    out.push('"');
    Cow::from(out)
}
