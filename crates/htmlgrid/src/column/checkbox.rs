use std::collections::BTreeSet;

use htmlgrid_markup::{render_void_tag, Attributes};
use serde::Serialize;

use super::extract::{lookup_path, value_to_text};
use super::{column_builders, CellContext, Column, ColumnCore};
use crate::error::TableError;
use crate::post::PostData;

/// A column of checkboxes, one per row, that remembers which rows were
/// checked when the page was last posted.
///
/// Each checkbox carries the row's key (read from `key_path`) as its value.
/// The form field is named after the column id, or its name when no id is
/// set, with a `[]` suffix.
#[derive(Clone, Debug)]
pub struct CheckboxColumn {
    core: ColumnCore,
    key_path: String,
    checked: BTreeSet<String>,
}

impl CheckboxColumn {
    pub fn new(name: impl Into<String>, key_path: impl Into<String>) -> Self {
        let mut core = ColumnCore::new(name);
        core.set_html_entities(false);
        CheckboxColumn {
            core,
            key_path: key_path.into(),
            checked: BTreeSet::new(),
        }
    }

    /// The name of the posted form field.
    pub fn field_name(&self) -> String {
        format!("{}[]", self.core.id().unwrap_or(self.core.name()))
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.checked.contains(key)
    }

    pub fn set_checked(&mut self, key: impl Into<String>, checked: bool) {
        let key = key.into();
        if checked {
            self.checked.insert(key);
        } else {
            self.checked.remove(&key);
        }
    }

    /// Checked row keys, in sorted order.
    pub fn checked_keys(&self) -> impl Iterator<Item = &str> {
        self.checked.iter().map(String::as_str)
    }

    column_builders!();
}

impl<R: Serialize> Column<R> for CheckboxColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColumnCore {
        &mut self.core
    }

    fn fetch_cell_value(&self, item: &R, ctx: &CellContext) -> Result<String, TableError> {
        let data = ctx.json_of(item, self.core.name())?;
        let key = lookup_path(data, &self.key_path, false)
            .map_err(|reason| TableError::cell(self.core.name(), reason))?
            .map(value_to_text)
            .unwrap_or_default();

        let mut attrs = Attributes::new()
            .with("type", "checkbox")
            .with("name", self.field_name());
        if self.checked.contains(&key) {
            attrs.insert("checked", "checked");
        }
        attrs.insert("value", key);
        Ok(render_void_tag("input", &attrs))
    }

    fn parse_post_data(&mut self, post: &PostData) {
        self.checked = post
            .get_all(&self.field_name())
            .iter()
            .cloned()
            .collect();
        tracing::trace!(
            column = self.core.name(),
            checked = self.checked.len(),
            "parsed checkbox selection"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_unchecked_box() {
        let col = CheckboxColumn::new("Pick", "id");
        let html = col
            .fetch_cell_value(&json!({"id": 4}), &CellContext::new(0))
            .unwrap();
        assert_eq!(html, r#"<input type="checkbox" name="Pick[]" value="4">"#);
    }

    #[test]
    fn posted_keys_become_checked() {
        let mut col = CheckboxColumn::new("Pick", "id").with_id("sel");
        let post = PostData::from_urlencoded("sel%5B%5D=4&sel%5B%5D=9&other=1");
        Column::<serde_json::Value>::parse_post_data(&mut col, &post);

        assert!(col.is_checked("4"));
        assert!(col.is_checked("9"));
        assert!(!col.is_checked("1"));
        assert_eq!(col.checked_keys().collect::<Vec<_>>(), vec!["4", "9"]);

        let html = col
            .fetch_cell_value(&json!({"id": 4}), &CellContext::new(0))
            .unwrap();
        assert_eq!(
            html,
            r#"<input type="checkbox" name="sel[]" checked="checked" value="4">"#
        );
    }

    #[test]
    fn empty_post_clears_selection() {
        let mut col = CheckboxColumn::new("Pick", "id");
        col.set_checked("1", true);
        Column::<serde_json::Value>::parse_post_data(&mut col, &PostData::new());
        assert_eq!(col.checked_keys().count(), 0);
    }

    #[test]
    fn missing_key_fails() {
        let col = CheckboxColumn::new("Pick", "id");
        assert!(col
            .fetch_cell_value(&json!({"name": "x"}), &CellContext::new(0))
            .is_err());
    }
}
