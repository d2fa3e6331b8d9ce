use serde::Serialize;

use super::extract::{lookup_path, value_to_text};
use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;

/// A column that reads a property path from each serialized row.
///
/// Paths use dot notation for nested fields (`"customer.address.city"`).
/// With `null_safe` (the default) a `null` part-way down the path yields an
/// empty cell instead of an error; a property that does not exist at all is
/// always an error.
#[derive(Clone, Debug)]
pub struct PropertyColumn {
    core: ColumnCore,
    path: String,
    null_safe: bool,
}

impl PropertyColumn {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        PropertyColumn {
            core: ColumnCore::new(name),
            path: path.into(),
            null_safe: true,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn null_safe(&self) -> bool {
        self.null_safe
    }

    pub fn with_null_safe(mut self, null_safe: bool) -> Self {
        self.null_safe = null_safe;
        self
    }

    column_builders!();
}

impl<R: Serialize> Column<R> for PropertyColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, ctx: &CellContext) -> Result<String, TableError> {
        let data = ctx.json_of(item, self.core.name())?;
        let value = lookup_path(data, &self.path, self.null_safe)
            .map_err(|reason| TableError::cell(self.core.name(), reason))?;
        Ok(value.map(value_to_text).unwrap_or_default())
    }
}
