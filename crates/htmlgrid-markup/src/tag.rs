//! Start/end tag rendering.

use crate::attributes::Attributes;

/// Renders `<tag attrs>inner</tag>`.
///
/// `inner` is inserted verbatim; callers escape text content themselves.
///
/// ```rust
/// use htmlgrid_markup::{render_tag, Attributes};
///
/// assert_eq!(render_tag("tbody", &Attributes::new(), ""), "<tbody></tbody>");
/// ```
pub fn render_tag(tag: &str, attrs: &Attributes, inner: &str) -> String {
    let rendered = attrs.render();
    let mut out = String::with_capacity(tag.len() * 2 + rendered.len() + inner.len() + 5);
    out.push('<');
    out.push_str(tag);
    out.push_str(&rendered);
    out.push('>');
    out.push_str(inner);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

/// Renders a void element such as `<col span="2">` (no end tag).
pub fn render_void_tag(tag: &str, attrs: &Attributes) -> String {
    format!("<{}{}>", tag, attrs.render())
}
