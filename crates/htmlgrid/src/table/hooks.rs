//! Override points of the render pipeline.

use htmlgrid_markup::Attributes;

use super::Table;
use crate::column::Column;
use crate::error::TableError;

/// Per-table customization of row attributes, the footer and column
/// insertion.
///
/// Every method has a default; implement only what differs. Hooks receive
/// the table itself, so they can read the configuration and the transient
/// [`current_row_index`](Table::current_row_index) /
/// [`current_header_row_index`](Table::current_header_row_index).
///
/// ```rust
/// use htmlgrid::{Table, TableHooks};
///
/// struct Highlight;
///
/// impl TableHooks<u32> for Highlight {
///     fn row_style(&self, _table: &Table<u32>, item: &u32, _row_index: usize) -> Option<String> {
///         (*item > 100).then(|| "font-weight: bold".to_string())
///     }
/// }
///
/// let table: Table<u32> = Table::with_hooks(Highlight);
/// ```
pub trait TableHooks<R> {
    /// Css class of a body row. The default alternates between the row and
    /// alternate-row classes on even and odd visual indices.
    fn row_class(&self, table: &Table<R>, _item: &R, row_index: usize) -> Option<String> {
        let config = table.config();
        let alternate = config.alternate_row_css_class().filter(|c| !c.is_empty());
        match alternate {
            Some(class) if row_index % 2 == 1 => Some(class.to_string()),
            _ => config
                .row_css_class()
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    fn row_id(&self, _table: &Table<R>, _item: &R, _row_index: usize) -> Option<String> {
        None
    }

    fn row_style(&self, _table: &Table<R>, _item: &R, _row_index: usize) -> Option<String> {
        None
    }

    /// Attributes of the `<tr>` of header row `header_row_index`.
    fn header_row_params(&self, table: &Table<R>, _header_row_index: usize) -> Attributes {
        Attributes::new().with_opt(
            "class",
            table.config().header_row_css_class().filter(|c| !c.is_empty()),
        )
    }

    /// Rows placed inside `<tfoot>` when the footer is shown.
    fn footer_row_html(&self, _table: &Table<R>) -> Result<String, TableError> {
        Ok(String::new())
    }

    /// Called after a column lands at `index`, on every insertion path.
    fn column_inserted(&self, _index: usize, _column: &dyn Column<R>) {}
}

/// Hooks with every default in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl<R> TableHooks<R> for DefaultHooks {}
