use std::fmt;

use minijinja::{context, AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;

const CELL_TEMPLATE: &str = "cell.html";

/// A column whose cell markup comes from a minijinja template.
///
/// The template sees the serialized row as `item` and the visual row index
/// as `row_index`. Output is HTML auto-escaped by the template engine, so
/// the column itself does not escape again.
///
/// ```rust
/// use htmlgrid::{CellContext, Column, TemplateColumn};
/// use serde_json::json;
///
/// let col = TemplateColumn::new("Who", "<b>{{ item.name }}</b> #{{ row_index + 1 }}").unwrap();
/// let html = col.fetch_cell_value(&json!({"name": "A&B"}), &CellContext::new(0)).unwrap();
/// assert_eq!(html, "<b>A&amp;B</b> #1");
/// ```
#[derive(Clone)]
pub struct TemplateColumn {
    core: ColumnCore,
    source: String,
    env: Environment<'static>,
}

impl TemplateColumn {
    /// Compiles `source`. Syntax errors are reported here, not at render time.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self, TableError> {
        let source = source.into();
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(CELL_TEMPLATE, source.clone())?;

        let mut core = ColumnCore::new(name);
        core.set_html_entities(false);
        Ok(TemplateColumn { core, source, env })
    }

    /// Makes references to undefined row fields an error instead of empty
    /// output.
    pub fn strict(mut self) -> Self {
        self.env.set_undefined_behavior(UndefinedBehavior::Strict);
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    column_builders!();
}

impl fmt::Debug for TemplateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateColumn")
            .field("core", &self.core)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<R: Serialize> Column<R> for TemplateColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, ctx: &CellContext) -> Result<String, TableError> {
        let name = self.core.name();
        let data = ctx.json_of(item, name)?;
        let template = self.env.get_template(CELL_TEMPLATE)?;
        template
            .render(context! { item => data, row_index => ctx.row_index })
            .map_err(|err| TableError::cell(name, err.to_string()))
    }
}
