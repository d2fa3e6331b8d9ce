//! The table renderer.
//!
//! [`Table`] owns an ordered list of columns, a [`TableConfig`], optional
//! [`TableHooks`] and, for the duration of one render pass, a row source.
//! Column management lives in `columns.rs`, the render pipeline in
//! `render.rs`.

mod columns;
mod hooks;
mod render;

use std::fmt;
use std::rc::Rc;

use htmlgrid_markup::Attributes;

use crate::column::Column;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::owner::{KeyedCallback, RowParamsCallback, RowParamsFn, TableId, TableOwner};
use crate::post::PostData;

pub use hooks::{DefaultHooks, TableHooks};

type DataBinder<R> = Box<dyn FnMut() -> Result<Vec<R>, TableError>>;

/// A data-bound HTML table.
///
/// ```rust
/// use htmlgrid::Table;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Book { title: String, year: u16 }
///
/// let mut table = Table::new();
/// table.create_property_column("Title", "title", -1).unwrap();
/// table.create_property_column("Year", "year", -1).unwrap();
/// table.config_mut().set_row_css_class(Some("book".into()));
///
/// let html = table.render_with(vec![
///     Book { title: "Dune".into(), year: 1965 },
/// ]).unwrap();
/// assert_eq!(
///     html,
///     "<table><thead><tr><th>Title</th><th>Year</th></tr></thead>\
///      <tbody><tr class=\"book\"><td>Dune</td><td>1965</td></tr></tbody></table>"
/// );
/// ```
pub struct Table<R> {
    id: TableId,
    control_id: Option<String>,
    columns: Vec<Box<dyn Column<R>>>,
    config: TableConfig,
    row_params_callback: Option<RowParamsCallback<R>>,
    hooks: Box<dyn TableHooks<R>>,
    data_source: Option<Vec<R>>,
    data_binder: Option<DataBinder<R>>,
    current_header_row_index: Option<usize>,
    current_row_index: Option<usize>,
    modified: bool,
    owner_id: Option<String>,
}

impl<R> Table<R> {
    /// Creates an empty table with [`DefaultHooks`].
    pub fn new() -> Self {
        Self::with_hooks(DefaultHooks)
    }

    /// Creates a table whose row attributes, footer and insertion
    /// notifications come from `hooks`.
    pub fn with_hooks(hooks: impl TableHooks<R> + 'static) -> Self {
        Table {
            id: TableId::next(),
            control_id: None,
            columns: Vec::new(),
            config: TableConfig::default(),
            row_params_callback: None,
            hooks: Box::new(hooks),
            data_source: None,
            data_binder: None,
            current_header_row_index: None,
            current_row_index: None,
            modified: false,
            owner_id: None,
        }
    }

    /// Identity held by the columns this table owns.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// The `id` attribute of the `<table>` tag.
    pub fn control_id(&self) -> Option<&str> {
        self.control_id.as_deref()
    }

    /// Sets or clears the `<table>` tag's `id` attribute.
    pub fn set_control_id(&mut self, control_id: Option<String>) {
        self.control_id = control_id;
    }

    /// Display settings.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Mutable display settings.
    pub fn config_mut(&mut self) -> &mut TableConfig {
        &mut self.config
    }

    /// Replaces the display settings.
    pub fn set_config(&mut self, config: TableConfig) {
        self.config = config;
    }

    /// Sets a closure that supplies base `<tr>` attributes for each body row.
    ///
    /// The computed `class`, `id` and `style` attributes are applied on top
    /// and win on collision.
    pub fn set_row_params_callback(&mut self, func: impl Fn(&R, usize) -> Attributes + 'static) {
        let func: RowParamsFn<R> = Rc::new(func);
        self.row_params_callback = Some(KeyedCallback::new(func));
    }

    /// Like [`set_row_params_callback`](Self::set_row_params_callback), but
    /// the closure is dropped on [`sleep`](Self::sleep) and resolved by `key`
    /// on [`wakeup`](Self::wakeup).
    pub fn set_keyed_row_params_callback(
        &mut self,
        key: impl Into<String>,
        func: impl Fn(&R, usize) -> Attributes + 'static,
    ) {
        let func: RowParamsFn<R> = Rc::new(func);
        self.row_params_callback = Some(KeyedCallback::keyed(key, func));
    }

    /// Removes the row-params callback.
    pub fn clear_row_params_callback(&mut self) {
        self.row_params_callback = None;
    }

    /// The row-params callback, if one is set.
    pub fn row_params_callback(&self) -> Option<&RowParamsCallback<R>> {
        self.row_params_callback.as_ref()
    }

    /// Sets the rows for the next render pass.
    pub fn set_data_source(&mut self, rows: Vec<R>) {
        self.data_source = Some(rows);
    }

    /// Rows waiting for the next render pass, if any.
    pub fn data_source(&self) -> Option<&[R]> {
        self.data_source.as_deref()
    }

    /// Sets a closure that produces fresh rows at the start of every render
    /// pass, replacing any data source set directly.
    pub fn set_data_binder(&mut self, binder: impl FnMut() -> Result<Vec<R>, TableError> + 'static) {
        self.data_binder = Some(Box::new(binder));
    }

    /// Removes the data binder. Rows set directly are used again.
    pub fn clear_data_binder(&mut self) {
        self.data_binder = None;
    }

    /// Visual index of the body row being drawn. `None` outside the body
    /// phase of a render pass.
    pub fn current_row_index(&self) -> Option<usize> {
        self.current_row_index
    }

    /// Index of the header row being drawn. `None` outside the header phase.
    pub fn current_header_row_index(&self) -> Option<usize> {
        self.current_header_row_index
    }

    /// Whether the column list changed since the last
    /// [`mark_clean`](Self::mark_clean).
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clears the modified flag.
    pub fn mark_clean(&mut self) {
        self.modified = false;
    }

    /// Lets every column consume the posted form data.
    pub fn parse_post_data(&mut self, post: &PostData) {
        for column in &mut self.columns {
            column.parse_post_data(post);
        }
    }

    /// Id of the owner the table was last woken up by.
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// Drops references to the hosting page from the columns and the
    /// row-params callback.
    pub fn sleep(&mut self) {
        for column in &mut self.columns {
            column.sleep();
        }
        if let Some(callback) = &mut self.row_params_callback {
            callback.sleep();
        }
        self.owner_id = None;
        tracing::debug!(table = self.id.get(), "table asleep");
    }

    /// Reattaches the row-params callback and every column to `owner`.
    ///
    /// The row-params callback and the owner id change only when every key
    /// resolves. Columns that woke before a failing one stay attached, and
    /// calling `wakeup` again skips them.
    pub fn wakeup(&mut self, owner: &dyn TableOwner<R>) -> Result<(), TableError> {
        let mut row_params_callback = self.row_params_callback.clone();
        if let Some(callback) = &mut row_params_callback {
            callback.wakeup(owner.owner_id(), |key| owner.row_params_callback(key))?;
        }
        for column in &mut self.columns {
            column
                .wakeup(owner)
                .map_err(|err| err.context(format!("wakeup column '{}'", column.name())))?;
        }
        self.row_params_callback = row_params_callback;
        self.owner_id = Some(owner.owner_id().to_string());
        tracing::debug!(table = self.id.get(), owner = owner.owner_id(), "table awake");
        Ok(())
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("control_id", &self.control_id)
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("row_params_callback", &self.row_params_callback)
            .field("rows", &self.data_source.as_ref().map(Vec::len))
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}
