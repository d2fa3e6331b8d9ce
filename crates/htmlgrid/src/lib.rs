//! # htmlgrid - Data-Bound HTML Tables
//!
//! `htmlgrid` renders HTML `<table>` markup from an ordered list of column
//! objects and a list of row items. Each column knows how to pull one value
//! out of a row; the table handles layout, row attributes and the render
//! pass itself.
//!
//! ## Core Concepts
//!
//! - [`Table`]: owns the columns, the [`TableConfig`] and, for one render
//!   pass at a time, the rows
//! - [`Column`]: the capability contract every column variant implements
//! - [`TableHooks`]: override points for row classes, ids, styles, header
//!   row attributes and the footer
//! - [`TableOwner`]: the page hosting a table, used to restore keyed
//!   callbacks after [`Table::sleep`]
//! - [`TableError`]: every failure, annotated with where it happened
//!
//! ## Quick Start
//!
//! ```rust
//! use htmlgrid::{CellSource, Table};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Order { id: u32, customer: String, total: f64 }
//!
//! let mut table = Table::new();
//! table.create_property_column("Customer", "customer", -1)?;
//! table.create_callable_column("Total", |o: &Order| Ok(format!("{:.2}", o.total)), -1)?;
//! table.create_link_column(
//!     "",
//!     CellSource::literal("edit"),
//!     Some(CellSource::path("id")),
//!     -1,
//! )?;
//!
//! table.config_mut().set_row_css_class(Some("row".into()));
//! table.config_mut().set_alternate_row_css_class(Some("row alt".into()));
//!
//! let html = table.render_with(vec![
//!     Order { id: 7, customer: "Ada".into(), total: 12.5 },
//!     Order { id: 9, customer: "Grace".into(), total: 3.0 },
//! ])?;
//! assert!(html.contains("<tr class=\"row alt\"><td>Grace</td><td>3.00</td>"));
//! assert!(html.contains("<a href=\"9\">edit</a>"));
//! # Ok::<(), htmlgrid::TableError>(())
//! ```
//!
//! ## Configuration Files
//!
//! Table presentation can be kept out of code:
//!
//! ```rust
//! use htmlgrid::TableConfig;
//!
//! let config = TableConfig::from_yaml(r#"
//! caption: Open orders
//! row_css_class: row
//! render_column_tags: true
//! header_row_count: 2
//! "#)?;
//! assert_eq!(config.header_row_count(), 2);
//! # Ok::<(), htmlgrid::TableError>(())
//! ```
//!
//! ## Logging
//!
//! Column mutations and render passes emit [`tracing`] events at `debug`
//! and `trace` level. Install a subscriber in the application to see them.

pub mod cast;
pub mod column;
mod config;
mod error;
mod owner;
mod post;
pub mod prelude;
mod table;

// Error type
pub use error::TableError;

// Columns
pub use column::{
    CallableColumn, CellContext, CellSource, CheckboxColumn, Column, ColumnCore, ColumnKey,
    HeaderContext, IndexedColumn, LinkColumn, PropertyColumn, TemplateColumn,
    VirtualAttributeColumn, VirtualAttributes,
};

// Table
pub use table::{DefaultHooks, Table, TableHooks};

// Configuration
pub use config::{ConfigParam, ParamKind, TableConfig};

// Owner lifecycle
pub use owner::{
    CallbackRegistry, CellFn, KeyedCallback, RowParamsCallback, RowParamsFn, TableId, TableOwner,
};

// Posted form data
pub use post::PostData;

pub use cast::IntoColumnIndex;

// Markup helpers
pub use htmlgrid_markup::{escape_html, Attributes};
