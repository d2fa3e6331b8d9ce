use std::fmt;
use std::rc::Rc;

use htmlgrid_markup::{escape_html, render_tag, Attributes};
use serde::Serialize;

use super::extract::{lookup_path, value_to_text};
use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;
use crate::owner::CellFn;

/// Where a piece of a [`LinkColumn`] comes from.
pub enum CellSource<R> {
    /// The same text for every row.
    Literal(String),
    /// A property path into the serialized row.
    Path(String),
    /// A closure over the row.
    Callback(CellFn<R>),
}

impl<R> CellSource<R> {
    pub fn literal(text: impl Into<String>) -> Self {
        CellSource::Literal(text.into())
    }

    pub fn path(path: impl Into<String>) -> Self {
        CellSource::Path(path.into())
    }

    pub fn callback(func: impl Fn(&R) -> Result<String, TableError> + 'static) -> Self {
        let func: CellFn<R> = Rc::new(func);
        CellSource::Callback(func)
    }
}

impl<R: Serialize> CellSource<R> {
    fn resolve(&self, item: &R, ctx: &CellContext, column: &str) -> Result<String, TableError> {
        match self {
            CellSource::Literal(text) => Ok(text.clone()),
            CellSource::Path(path) => {
                let data = ctx.json_of(item, column)?;
                let value = lookup_path(data, path, true)
                    .map_err(|reason| TableError::cell(column, reason))?;
                Ok(value.map(value_to_text).unwrap_or_default())
            }
            CellSource::Callback(func) => func(item),
        }
    }
}

impl<R> Clone for CellSource<R> {
    fn clone(&self) -> Self {
        match self {
            CellSource::Literal(text) => CellSource::Literal(text.clone()),
            CellSource::Path(path) => CellSource::Path(path.clone()),
            CellSource::Callback(func) => CellSource::Callback(Rc::clone(func)),
        }
    }
}

impl<R> fmt::Debug for CellSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellSource::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            CellSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            CellSource::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A column that renders an anchor per row.
///
/// The link text, destination and each query variable are independent
/// [`CellSource`]s. Query values are form-urlencoded and appended to the
/// destination. Without a destination only the (escaped) text is emitted.
///
/// ```rust
/// use htmlgrid::{CellContext, CellSource, Column, LinkColumn};
/// use serde_json::json;
///
/// let col = LinkColumn::new("Title", CellSource::path("title"))
///     .to(CellSource::literal("/books"))
///     .query_var("id", CellSource::path("id"));
/// let row = json!({"id": 7, "title": "Dune"});
/// assert_eq!(
///     col.fetch_cell_value(&row, &CellContext::new(0)).unwrap(),
///     r#"<a href="/books?id=7">Dune</a>"#
/// );
/// ```
pub struct LinkColumn<R> {
    core: ColumnCore,
    text: CellSource<R>,
    destination: Option<CellSource<R>>,
    query: Vec<(String, CellSource<R>)>,
    attributes: Attributes,
}

impl<R> LinkColumn<R> {
    pub fn new(name: impl Into<String>, text: CellSource<R>) -> Self {
        let mut core = ColumnCore::new(name);
        core.set_html_entities(false);
        LinkColumn {
            core,
            text,
            destination: None,
            query: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Sets the link destination.
    pub fn to(mut self, destination: CellSource<R>) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Adds a query variable appended to the destination.
    pub fn query_var(mut self, name: impl Into<String>, value: CellSource<R>) -> Self {
        self.query.push((name.into(), value));
        self
    }

    /// Adds an attribute to every `<a>` tag.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    column_builders!();
}

impl<R> Clone for LinkColumn<R> {
    fn clone(&self) -> Self {
        LinkColumn {
            core: self.core.clone(),
            text: self.text.clone(),
            destination: self.destination.clone(),
            query: self.query.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl<R> fmt::Debug for LinkColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkColumn")
            .field("core", &self.core)
            .field("text", &self.text)
            .field("destination", &self.destination)
            .field("query", &self.query)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl<R: Serialize> Column<R> for LinkColumn<R> {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, ctx: &CellContext) -> Result<String, TableError> {
        let name = self.core.name();
        let text = self.text.resolve(item, ctx, name)?;
        let text = escape_html(&text);

        let Some(destination) = &self.destination else {
            return Ok(text.into_owned());
        };
        let mut href = destination.resolve(item, ctx, name)?;
        if !self.query.is_empty() {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for (var, source) in &self.query {
                query.append_pair(var, &source.resolve(item, ctx, name)?);
            }
            href.push(if href.contains('?') { '&' } else { '?' });
            href.push_str(&query.finish());
        }

        let mut attrs = Attributes::new().with("href", href);
        attrs.merge(self.attributes.clone());
        Ok(render_tag("a", &attrs, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fetch(col: &LinkColumn<Value>, row: &Value) -> Result<String, TableError> {
        col.fetch_cell_value(row, &CellContext::new(0))
    }

    #[test]
    fn text_only_without_destination() {
        let col = LinkColumn::new("Name", CellSource::path("name"));
        assert_eq!(fetch(&col, &json!({"name": "R&D"})).unwrap(), "R&amp;D");
    }

    #[test]
    fn query_values_are_encoded() {
        let col = LinkColumn::new("Search", CellSource::literal("find"))
            .to(CellSource::literal("/search?lang=en"))
            .query_var("q", CellSource::path("term"));
        let html = fetch(&col, &json!({"term": "a b&c"})).unwrap();
        assert_eq!(html, r#"<a href="/search?lang=en&amp;q=a+b%26c">find</a>"#);
    }

    #[test]
    fn callback_destination_and_attributes() {
        let col = LinkColumn::new("Edit", CellSource::literal("edit"))
            .to(CellSource::callback(|row: &Value| {
                Ok(format!("/items/{}", row["id"]))
            }))
            .with_attribute("class", "btn")
            .with_attribute("target", "_blank");
        let html = fetch(&col, &json!({"id": 3})).unwrap();
        assert_eq!(html, r#"<a href="/items/3" class="btn" target="_blank">edit</a>"#);
    }

    #[test]
    fn link_markup_is_not_double_escaped() {
        let col = LinkColumn::new("Go", CellSource::literal("<go>")).to(CellSource::literal("/"));
        let html = col.render_cell(&json!({}), &CellContext::new(0)).unwrap();
        assert_eq!(html, r#"<td><a href="/">&lt;go&gt;</a></td>"#);
    }

    #[test]
    fn missing_path_fails() {
        let col = LinkColumn::new("Name", CellSource::path("missing"));
        assert!(fetch(&col, &json!({})).is_err());
    }
}
