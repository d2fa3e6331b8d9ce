use serde::Serialize;
use serde_json::Value;

use super::extract::{json_type_name, value_to_text};
use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;

/// Where an [`IndexedColumn`] looks in each row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnKey {
    /// Array position. Also matches a map key spelled as the number.
    Position(usize),
    /// Map key.
    Key(String),
}

impl From<usize> for ColumnKey {
    fn from(position: usize) -> Self {
        ColumnKey::Position(position)
    }
}

impl From<&str> for ColumnKey {
    fn from(key: &str) -> Self {
        ColumnKey::Key(key.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(key: String) -> Self {
        ColumnKey::Key(key)
    }
}

/// A column over rows that serialize to arrays or maps.
///
/// ```rust
/// use htmlgrid::{CellContext, Column, IndexedColumn};
///
/// let col = IndexedColumn::new("Qty", 1);
/// let row = vec!["apples".to_string(), "12".to_string()];
/// assert_eq!(col.render_cell(&row, &CellContext::new(0)).unwrap(), "<td>12</td>");
/// ```
#[derive(Clone, Debug)]
pub struct IndexedColumn {
    core: ColumnCore,
    index: ColumnKey,
}

impl IndexedColumn {
    pub fn new(name: impl Into<String>, index: impl Into<ColumnKey>) -> Self {
        IndexedColumn {
            core: ColumnCore::new(name),
            index: index.into(),
        }
    }

    pub fn index(&self) -> &ColumnKey {
        &self.index
    }

    column_builders!();

    fn lookup<'v>(&self, data: &'v Value) -> Option<&'v Value> {
        match (&self.index, data) {
            (ColumnKey::Position(i), Value::Array(items)) => items.get(*i),
            (ColumnKey::Position(i), Value::Object(map)) => map.get(&i.to_string()),
            (ColumnKey::Key(k), Value::Object(map)) => map.get(k),
            (ColumnKey::Key(k), Value::Array(items)) => {
                k.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        }
    }
}

impl<R: Serialize> Column<R> for IndexedColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, ctx: &CellContext) -> Result<String, TableError> {
        let data = ctx.json_of(item, self.core.name())?;
        if !matches!(data, Value::Array(_) | Value::Object(_)) {
            return Err(TableError::cell(
                self.core.name(),
                format!("cannot index into {}", json_type_name(data)),
            ));
        }
        self.lookup(data).map(value_to_text).ok_or_else(|| {
            let missing = match &self.index {
                ColumnKey::Position(i) => i.to_string(),
                ColumnKey::Key(k) => format!("'{}'", k),
            };
            TableError::cell(self.core.name(), format!("missing index {}", missing))
        })
    }
}
