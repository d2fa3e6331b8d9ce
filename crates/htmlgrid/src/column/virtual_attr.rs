use std::collections::{BTreeMap, HashMap};

use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;

/// Row types that expose computed attributes by name, e.g. aliased
/// expressions attached to a query result.
pub trait VirtualAttributes {
    fn virtual_attribute(&self, name: &str) -> Option<String>;
}

impl VirtualAttributes for HashMap<String, String> {
    fn virtual_attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl VirtualAttributes for BTreeMap<String, String> {
    fn virtual_attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A column that displays one virtual attribute of each row.
#[derive(Clone, Debug)]
pub struct VirtualAttributeColumn {
    core: ColumnCore,
    attribute: String,
}

impl VirtualAttributeColumn {
    pub fn new(name: impl Into<String>, attribute: impl Into<String>) -> Self {
        VirtualAttributeColumn {
            core: ColumnCore::new(name),
            attribute: attribute.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    column_builders!();
}

impl<R: VirtualAttributes> Column<R> for VirtualAttributeColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, _ctx: &CellContext) -> Result<String, TableError> {
        item.virtual_attribute(&self.attribute).ok_or_else(|| {
            TableError::cell(
                self.core.name(),
                format!("row has no virtual attribute '{}'", self.attribute),
            )
        })
    }
}
