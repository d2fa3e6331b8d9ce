//! Entity escaping for HTML text and attribute values.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>` and `"` as HTML entities.
///
/// Single quotes are left alone: attribute values are always emitted with
/// double quotes. Returns the input unchanged (borrowed) when nothing needs
/// escaping.
///
/// ```rust
/// use htmlgrid_markup::escape_html;
///
/// assert_eq!(escape_html("Fish & Chips"), "Fish &amp; Chips");
/// assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
/// assert_eq!(escape_html("it's"), "it's");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let first = match text.find(['&', '<', '>', '"']) {
        Some(pos) => pos,
        None => return Cow::Borrowed(text),
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
