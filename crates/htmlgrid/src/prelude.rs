//! Commonly used types in one import.
//!
//! ```rust
//! use htmlgrid::prelude::*;
//!
//! let mut table: Table<serde_json::Value> = Table::new();
//! table.add_column(PropertyColumn::new("Name", "name"))?;
//! # Ok::<(), TableError>(())
//! ```

pub use crate::column::{
    CallableColumn, CellSource, CheckboxColumn, Column, ColumnKey, IndexedColumn, LinkColumn,
    PropertyColumn, TemplateColumn, VirtualAttributeColumn, VirtualAttributes,
};
pub use crate::config::TableConfig;
pub use crate::error::TableError;
pub use crate::owner::{CallbackRegistry, TableOwner};
pub use crate::post::PostData;
pub use crate::table::{Table, TableHooks};
pub use htmlgrid_markup::Attributes;
