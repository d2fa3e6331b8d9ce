//! # htmlgrid-markup - HTML Building Blocks
//!
//! Small, dependency-light helpers used by `htmlgrid` to emit markup:
//!
//! - [`Attributes`]: an insertion-ordered attribute map. Inserting an existing
//!   key overwrites the value in place, so merge order decides which value
//!   wins while the rendered attribute order stays stable.
//! - [`render_tag`] / [`render_void_tag`]: emit `<tag attr="..">inner</tag>`
//!   and `<tag attr="..">`.
//! - [`escape_html`]: entity-escape text for element content and attribute
//!   values.
//!
//! ## Example
//!
//! ```rust
//! use htmlgrid_markup::{escape_html, render_tag, Attributes};
//!
//! let attrs = Attributes::new().with("class", "odd").with("id", "row-1");
//! let html = render_tag("tr", &attrs, &format!("<td>{}</td>", escape_html("a < b")));
//! assert_eq!(html, r#"<tr class="odd" id="row-1"><td>a &lt; b</td></tr>"#);
//! ```

mod attributes;
mod escape;
mod tag;

pub use attributes::Attributes;
pub use escape::escape_html;
pub use tag::{render_tag, render_void_tag};
