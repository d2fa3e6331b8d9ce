//! Column contract and the built-in column variants.
//!
//! A column is a strategy object: it knows how to pull one value out of a
//! row item and how to wrap it in markup. The table only sees the
//! [`Column`] trait, so downstream crates can add their own variants.
//!
//! | Variant | Reads the cell from |
//! |---------|---------------------|
//! | [`IndexedColumn`] | an array position or map key of the serialized row |
//! | [`PropertyColumn`] | a dot-separated property path (`"author.name"`) |
//! | [`CallableColumn`] | a closure |
//! | [`LinkColumn`] | text/destination/query sources, rendered as `<a>` |
//! | [`VirtualAttributeColumn`] | a named attribute exposed by [`VirtualAttributes`] |
//! | [`TemplateColumn`] | a minijinja template |
//! | [`CheckboxColumn`] | a key path; remembers which boxes were posted checked |
//!
//! Shared presentation state (name, id, visibility, span, css classes) lives
//! in [`ColumnCore`], which every variant embeds.

mod callable;
mod checkbox;
mod extract;
mod indexed;
mod link;
mod property;
mod template;
mod virtual_attr;

use std::fmt;
use std::num::NonZeroUsize;

use htmlgrid_markup::{escape_html, render_tag, render_void_tag, Attributes};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TableError;
use crate::owner::{TableId, TableOwner};
use crate::post::PostData;

pub use callable::CallableColumn;
pub use checkbox::CheckboxColumn;
pub use extract::{lookup_path, value_to_text};
pub use indexed::{ColumnKey, IndexedColumn};
pub use link::{CellSource, LinkColumn};
pub use property::PropertyColumn;
pub use template::TemplateColumn;
pub use virtual_attr::{VirtualAttributeColumn, VirtualAttributes};

/// Presentation state shared by every column variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCore {
    name: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "default_span")]
    span: NonZeroUsize,
    #[serde(default)]
    css_class: Option<String>,
    #[serde(default)]
    header_css_class: Option<String>,
    #[serde(default = "default_true")]
    html_entities: bool,
    #[serde(default)]
    render_as_header: bool,
    #[serde(skip)]
    parent: Option<TableId>,
}

fn default_true() -> bool {
    true
}

fn default_span() -> NonZeroUsize {
    NonZeroUsize::MIN
}

impl ColumnCore {
    pub fn new(name: impl Into<String>) -> Self {
        ColumnCore {
            name: name.into(),
            id: None,
            visible: true,
            span: NonZeroUsize::MIN,
            css_class: None,
            header_css_class: None,
            html_entities: true,
            render_as_header: false,
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn span(&self) -> usize {
        self.span.get()
    }

    /// Sets how many `<col>` slots this column covers. Zero is rejected.
    pub fn set_span(&mut self, span: usize) -> Result<(), TableError> {
        self.span = NonZeroUsize::new(span).ok_or_else(|| TableError::InvalidValue {
            property: "span",
            reason: "span must be at least 1".to_string(),
        })?;
        Ok(())
    }

    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    pub fn set_css_class(&mut self, class: Option<String>) {
        self.css_class = class;
    }

    pub fn header_css_class(&self) -> Option<&str> {
        self.header_css_class.as_deref()
    }

    pub fn set_header_css_class(&mut self, class: Option<String>) {
        self.header_css_class = class;
    }

    /// Whether cell text is entity-escaped before it is wrapped in `<td>`.
    pub fn html_entities(&self) -> bool {
        self.html_entities
    }

    pub fn set_html_entities(&mut self, escape: bool) {
        self.html_entities = escape;
    }

    /// Whether body cells are emitted as `<th>` (row headers).
    pub fn render_as_header(&self) -> bool {
        self.render_as_header
    }

    pub fn set_render_as_header(&mut self, as_header: bool) {
        self.render_as_header = as_header;
    }

    /// The table this column is attached to, if any.
    pub fn parent(&self) -> Option<TableId> {
        self.parent
    }

    pub(crate) fn attach(&mut self, table: TableId) {
        self.parent = Some(table);
    }

    pub(crate) fn detach(&mut self) {
        self.parent = None;
    }
}

/// State visible to a column while its header cell is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderContext {
    /// 0-based index of the header row being drawn.
    pub header_row_index: usize,
    pub header_row_count: usize,
}

/// State visible to a column while a body cell is rendered.
///
/// Holds the serialized form of the current row so columns that read the
/// row through serde share one serialization per row.
#[derive(Debug)]
pub struct CellContext {
    /// Visual index of the row being drawn.
    pub row_index: usize,
    json: OnceCell<Value>,
}

impl CellContext {
    pub fn new(row_index: usize) -> Self {
        CellContext {
            row_index,
            json: OnceCell::new(),
        }
    }

    /// The row serialized to JSON, computed on first use.
    pub fn json_of<R: Serialize>(&self, item: &R, column: &str) -> Result<&Value, TableError> {
        self.json.get_or_try_init(|| {
            serde_json::to_value(item)
                .map_err(|err| TableError::cell(column, format!("row is not serializable: {}", err)))
        })
    }
}

/// The capability set every column variant provides.
///
/// Only [`core`](Column::core), [`core_mut`](Column::core_mut) and
/// [`fetch_cell_value`](Column::fetch_cell_value) are required. The render
/// methods have defaults that follow the usual `<th>`/`<td>`/`<col>` shapes
/// and honor the [`ColumnCore`] settings; hidden columns render nothing.
pub trait Column<R>: fmt::Debug {
    fn core(&self) -> &ColumnCore;

    fn core_mut(&mut self) -> &mut ColumnCore;

    /// The raw (unescaped) content of this column's cell for `item`.
    fn fetch_cell_value(&self, item: &R, ctx: &CellContext) -> Result<String, TableError>;

    fn name(&self) -> &str {
        self.core().name()
    }

    fn id(&self) -> Option<&str> {
        self.core().id()
    }

    fn visible(&self) -> bool {
        self.core().visible()
    }

    fn span(&self) -> usize {
        self.core().span()
    }

    /// Markup placed inside the header cell. Defaults to the escaped name.
    fn header_cell_content(&self, _ctx: &HeaderContext) -> String {
        escape_html(self.name()).into_owned()
    }

    fn render_header_cell(&self, ctx: &HeaderContext) -> Result<String, TableError> {
        if !self.visible() {
            return Ok(String::new());
        }
        let attrs = Attributes::new().with_opt("class", self.core().header_css_class());
        Ok(render_tag("th", &attrs, &self.header_cell_content(ctx)))
    }

    /// Attributes of the body cell tag.
    fn cell_params(&self, _item: &R, _ctx: &CellContext) -> Attributes {
        Attributes::new().with_opt("class", self.core().css_class())
    }

    fn render_cell(&self, item: &R, ctx: &CellContext) -> Result<String, TableError> {
        if !self.visible() {
            return Ok(String::new());
        }
        let value = self.fetch_cell_value(item, ctx)?;
        let content = if self.core().html_entities() {
            escape_html(&value).into_owned()
        } else {
            value
        };
        let tag = if self.core().render_as_header() {
            "th"
        } else {
            "td"
        };
        Ok(render_tag(tag, &self.cell_params(item, ctx), &content))
    }

    fn render_col_tag(&self) -> String {
        let core = self.core();
        let mut attrs = Attributes::new()
            .with_opt("id", core.id())
            .with_opt("class", core.css_class());
        if self.span() > 1 {
            attrs.insert("span", self.span().to_string());
        }
        render_void_tag("col", &attrs)
    }

    /// Consumes posted form data. Stateless columns ignore it.
    fn parse_post_data(&mut self, _post: &PostData) {}

    /// Drops references to the hosting page before its state is persisted.
    fn sleep(&mut self) {}

    /// Restores references dropped by [`sleep`](Column::sleep).
    fn wakeup(&mut self, _owner: &dyn TableOwner<R>) -> Result<(), TableError> {
        Ok(())
    }
}

/// Fluent setters over [`ColumnCore`], shared by every built-in variant.
macro_rules! column_builders {
    () => {
        /// Sets the column id (unique within a table by convention).
        pub fn with_id(mut self, id: impl Into<String>) -> Self {
            self.core.set_id(Some(id.into()));
            self
        }

        /// Sets the css class of body cells and the `<col>` tag.
        pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
            self.core.set_css_class(Some(class.into()));
            self
        }

        pub fn with_header_css_class(mut self, class: impl Into<String>) -> Self {
            self.core.set_header_css_class(Some(class.into()));
            self
        }

        pub fn hidden(mut self) -> Self {
            self.core.set_visible(false);
            self
        }

        /// Sets the number of `<col>` slots this column covers.
        pub fn with_span(mut self, span: std::num::NonZeroUsize) -> Self {
            self.core.span = span;
            self
        }

        /// Emits cell content without entity escaping.
        pub fn raw_html(mut self) -> Self {
            self.core.set_html_entities(false);
            self
        }

        /// Emits body cells as `<th>`.
        pub fn as_row_header(mut self) -> Self {
            self.core.set_render_as_header(true);
            self
        }
    };
}

pub(crate) use column_builders;
