//! Column management: insertion, removal, reordering and lookup.
//!
//! [`Table::insert_at`] is the only place a column enters the list.
//! [`Table::add_column`] and every `create_*_column` factory call it, so the
//! back-reference, the modified flag and the
//! [`column_inserted`](super::TableHooks::column_inserted) hook apply to every
//! insertion path.

use serde::Serialize;

use super::Table;
use crate::cast::IntoColumnIndex;
use crate::column::{
    CallableColumn, CellSource, Column, ColumnKey, IndexedColumn, LinkColumn, PropertyColumn,
    VirtualAttributeColumn, VirtualAttributes,
};
use crate::error::TableError;

impl<R> Table<R> {
    /// Inserts `column` at `index`.
    ///
    /// A negative index, or one past the end, appends. The index may be any
    /// [`IntoColumnIndex`] value; one that is not an integer fails with
    /// [`TableError::InvalidCast`] and leaves the table untouched.
    pub fn insert_at(
        &mut self,
        index: impl IntoColumnIndex,
        mut column: Box<dyn Column<R>>,
    ) -> Result<&mut dyn Column<R>, TableError> {
        let index = index.into_column_index()?;
        let len = self.columns.len();
        let at = match usize::try_from(index) {
            Ok(at) if at <= len => at,
            _ => len,
        };

        column.core_mut().attach(self.id);
        self.columns.insert(at, column);
        self.modified = true;

        let inserted = &*self.columns[at];
        tracing::debug!(
            table = self.id.get(),
            column = inserted.name(),
            index = at,
            "column inserted"
        );
        self.hooks.column_inserted(at, inserted);
        Ok(&mut *self.columns[at])
    }

    /// Appends `column`.
    pub fn add_column<C>(&mut self, column: C) -> Result<&mut dyn Column<R>, TableError>
    where
        C: Column<R> + 'static,
    {
        self.insert_at(-1, Box::new(column))
    }

    /// Creates an [`IndexedColumn`] at `index`. Without a `key`, the column
    /// reads the row position equal to the current column count.
    pub fn create_indexed_column(
        &mut self,
        name: impl Into<String>,
        key: Option<ColumnKey>,
        index: impl IntoColumnIndex,
    ) -> Result<&mut dyn Column<R>, TableError>
    where
        R: Serialize,
    {
        let key = key.unwrap_or(ColumnKey::Position(self.columns.len()));
        self.insert_at(index, Box::new(IndexedColumn::new(name, key)))
    }

    /// Creates a [`PropertyColumn`] reading `path` at `index`.
    pub fn create_property_column(
        &mut self,
        name: impl Into<String>,
        path: impl Into<String>,
        index: impl IntoColumnIndex,
    ) -> Result<&mut dyn Column<R>, TableError>
    where
        R: Serialize,
    {
        self.insert_at(index, Box::new(PropertyColumn::new(name, path)))
    }

    /// Creates a [`CallableColumn`] computing cells with `func` at `index`.
    pub fn create_callable_column(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&R) -> Result<String, TableError> + 'static,
        index: impl IntoColumnIndex,
    ) -> Result<&mut dyn Column<R>, TableError>
    where
        R: 'static,
    {
        self.insert_at(index, Box::new(CallableColumn::new(name, func)))
    }

    /// Creates a [`LinkColumn`]. Query variables and extra tag attributes
    /// are set by building the column directly and passing it to
    /// [`add_column`](Self::add_column).
    pub fn create_link_column(
        &mut self,
        name: impl Into<String>,
        text: CellSource<R>,
        destination: Option<CellSource<R>>,
        index: impl IntoColumnIndex,
    ) -> Result<&mut dyn Column<R>, TableError>
    where
        R: Serialize + 'static,
    {
        let mut column = LinkColumn::new(name, text);
        if let Some(destination) = destination {
            column = column.to(destination);
        }
        self.insert_at(index, Box::new(column))
    }

    /// Creates a [`VirtualAttributeColumn`] reading `attribute` at `index`.
    pub fn create_virtual_attribute_column(
        &mut self,
        name: impl Into<String>,
        attribute: impl Into<String>,
        index: impl IntoColumnIndex,
    ) -> Result<&mut dyn Column<R>, TableError>
    where
        R: VirtualAttributes,
    {
        self.insert_at(index, Box::new(VirtualAttributeColumn::new(name, attribute)))
    }

    /// Removes and returns the column at `index`.
    ///
    /// Fails with [`TableError::IndexOutOfRange`] unless `0 <= index < len`.
    pub fn remove_at(&mut self, index: impl IntoColumnIndex) -> Result<Box<dyn Column<R>>, TableError> {
        self.modified = true;
        let index = index.into_column_index()?;
        let len = self.columns.len();
        match usize::try_from(index) {
            Ok(at) if at < len => Ok(self.take(at)),
            _ => Err(TableError::IndexOutOfRange {
                index,
                len,
                operation: "remove_at",
            }),
        }
    }

    /// Removes the first column whose id is `id`. Absent ids are ignored.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Box<dyn Column<R>>> {
        let at = self.columns.iter().position(|c| c.id() == Some(id))?;
        self.modified = true;
        Some(self.take(at))
    }

    /// Removes the first column named `name`.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Box<dyn Column<R>>> {
        self.modified = true;
        let at = self.position(name)?;
        Some(self.take(at))
    }

    /// Removes every column whose name is in `names`, returning them in
    /// table order.
    pub fn remove_by_names<I, S>(&mut self, names: I) -> Vec<Box<dyn Column<R>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.modified = true;
        let names: Vec<S> = names.into_iter().collect();
        let (mut removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.columns)
            .into_iter()
            .partition(|c| names.iter().any(|n| n.as_ref() == c.name()));
        self.columns = kept;
        for column in &mut removed {
            column.core_mut().detach();
        }
        tracing::debug!(table = self.id.get(), removed = removed.len(), "columns removed");
        removed
    }

    /// Removes every column.
    pub fn remove_all(&mut self) {
        self.modified = true;
        for column in &mut self.columns {
            column.core_mut().detach();
        }
        self.columns.clear();
        tracing::debug!(table = self.id.get(), "all columns removed");
    }

    /// Moves the first column named `name` to `index`, renaming it to
    /// `new_name` when given.
    ///
    /// `index` is interpreted against the list with the column already
    /// removed.
    pub fn move_column(
        &mut self,
        name: &str,
        index: impl IntoColumnIndex,
        new_name: Option<&str>,
    ) -> Result<&mut dyn Column<R>, TableError> {
        let index = index.into_column_index()?;
        let mut column = self
            .remove_by_name(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))?;
        if let Some(new_name) = new_name {
            column.core_mut().set_name(new_name);
        }
        self.insert_at(index, column)
    }

    /// Renames the first column named `old`.
    pub fn rename_column(&mut self, old: &str, new: &str) -> Result<&mut dyn Column<R>, TableError> {
        let at = self
            .position(old)
            .ok_or_else(|| TableError::ColumnNotFound(old.to_string()))?;
        self.modified = true;
        let column = &mut *self.columns[at];
        column.core_mut().set_name(new);
        Ok(column)
    }

    /// The column at `index`, counting only visible columns when
    /// `visible_only` is set.
    pub fn column(&self, index: usize, visible_only: bool) -> Option<&dyn Column<R>> {
        if visible_only {
            self.columns.iter().filter(|c| c.visible()).nth(index).map(|c| &**c)
        } else {
            self.columns.get(index).map(|c| &**c)
        }
    }

    /// Mutable counterpart of [`column`](Self::column).
    pub fn column_mut(&mut self, index: usize, visible_only: bool) -> Option<&mut dyn Column<R>> {
        if visible_only {
            self.columns
                .iter_mut()
                .filter(|c| c.visible())
                .nth(index)
                .map(as_dyn_mut)
        } else {
            self.columns.get_mut(index).map(as_dyn_mut)
        }
    }

    /// The first column named `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&dyn Column<R>> {
        self.columns.iter().find(|c| c.name() == name).map(|c| &**c)
    }

    /// The first column named `name`, mutably.
    pub fn column_by_name_mut(&mut self, name: &str) -> Option<&mut dyn Column<R>> {
        self.columns
            .iter_mut()
            .find(|c| c.name() == name)
            .map(as_dyn_mut)
    }

    /// The first column whose id is `id`.
    pub fn column_by_id(&self, id: &str) -> Option<&dyn Column<R>> {
        self.columns.iter().find(|c| c.id() == Some(id)).map(|c| &**c)
    }

    /// The first column whose id is `id`, mutably.
    pub fn column_by_id_mut(&mut self, id: &str) -> Option<&mut dyn Column<R>> {
        self.columns
            .iter_mut()
            .find(|c| c.id() == Some(id))
            .map(as_dyn_mut)
    }

    /// Every column named `name`, in table order.
    pub fn columns_by_name(&self, name: &str) -> Vec<&dyn Column<R>> {
        self.columns
            .iter()
            .filter(|c| c.name() == name)
            .map(|c| &**c)
            .collect()
    }

    /// Index of the first column named `name`, or `-1`.
    ///
    /// Prefer [`position`](Self::position) in new code.
    pub fn column_index(&self, name: &str) -> isize {
        self.position(name)
            .and_then(|at| isize::try_from(at).ok())
            .unwrap_or(-1)
    }

    /// Index of the first column named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Every column in table order, hidden ones included.
    pub fn all_columns(&self) -> impl Iterator<Item = &dyn Column<R>> {
        self.columns.iter().map(|c| &**c)
    }

    /// Number of columns, hidden ones included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Hides every column.
    pub fn hide_all(&mut self) {
        for column in &mut self.columns {
            column.core_mut().set_visible(false);
        }
        self.modified = true;
    }

    /// Shows every column.
    pub fn show_all(&mut self) {
        for column in &mut self.columns {
            column.core_mut().set_visible(true);
        }
        self.modified = true;
    }

    fn take(&mut self, at: usize) -> Box<dyn Column<R>> {
        let mut column = self.columns.remove(at);
        column.core_mut().detach();
        tracing::debug!(
            table = self.id.get(),
            column = column.name(),
            index = at,
            "column removed"
        );
        column
    }
}

fn as_dyn_mut<R>(column: &mut Box<dyn Column<R>>) -> &mut dyn Column<R> {
    &mut **column
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;
    use serde_json::{json, Value};

    use super::*;
    use crate::table::TableHooks;

    fn names<R>(table: &Table<R>) -> Vec<String> {
        table.all_columns().map(|c| c.name().to_string()).collect()
    }

    fn abc() -> Table<Value> {
        let mut table = Table::new();
        for name in ["a", "b", "c"] {
            table.create_property_column(name, name, -1).unwrap();
        }
        table.mark_clean();
        table
    }

    #[test]
    fn insert_positions() {
        let mut table = abc();
        table.create_property_column("first", "x", 0).unwrap();
        table.create_property_column("mid", "x", 2).unwrap();
        table.create_property_column("last", "x", 99).unwrap();
        table.create_property_column("end", "x", -5).unwrap();
        assert_eq!(names(&table), ["first", "a", "mid", "b", "c", "last", "end"]);
        assert!(table.is_modified());
    }

    #[test]
    fn insert_sets_back_reference() {
        let mut table = abc();
        let id = table.id();
        let column = table.create_property_column("d", "d", -1).unwrap();
        assert_eq!(column.core().parent(), Some(id));
    }

    #[test]
    fn insert_coerces_index() {
        let mut table = abc();
        table
            .insert_at("1", Box::new(PropertyColumn::new("x", "x")))
            .unwrap();
        table
            .insert_at(json!(0), Box::new(PropertyColumn::new("y", "y")))
            .unwrap();
        assert_eq!(names(&table), ["y", "a", "x", "b", "c"]);
    }

    #[test]
    fn bad_index_aborts_insert() {
        let mut table = abc();
        let err = table
            .insert_at("first", Box::new(PropertyColumn::new("x", "x")))
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidCast { .. }));
        assert_eq!(table.column_count(), 3);
        assert!(!table.is_modified());
    }

    #[test]
    fn indexed_factory_defaults_key_to_count() {
        let mut table: Table<Value> = Table::new();
        table.create_indexed_column("zero", None, -1).unwrap();
        table.create_indexed_column("one", None, -1).unwrap();
        table.config_mut().set_show_header(false);
        let html = table.render_with(vec![json!(["x", "y"])]).unwrap();
        assert_eq!(html, "<table><tbody><tr><td>x</td><td>y</td></tr></tbody></table>");
    }

    #[test]
    fn hooks_see_every_insertion() {
        struct Recorder(Rc<RefCell<Vec<(usize, String)>>>);

        impl TableHooks<Value> for Recorder {
            fn column_inserted(&self, index: usize, column: &dyn Column<Value>) {
                self.0.borrow_mut().push((index, column.name().to_string()));
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut table: Table<Value> = Table::with_hooks(Recorder(Rc::clone(&seen)));
        table.add_column(PropertyColumn::new("a", "a")).unwrap();
        table.create_property_column("b", "b", 0).unwrap();
        table
            .create_callable_column("c", |_: &Value| Ok(String::new()), 1)
            .unwrap();
        table.move_column("a", 0, None).unwrap();
        assert_eq!(
            *seen.borrow(),
            [
                (0, "a".to_string()),
                (0, "b".to_string()),
                (1, "c".to_string()),
                (0, "a".to_string()),
            ]
        );
    }

    #[test]
    fn remove_at_bounds() {
        let mut table = abc();
        assert!(matches!(
            table.remove_at(-1),
            Err(TableError::IndexOutOfRange { index: -1, len: 3, .. })
        ));
        assert!(table.remove_at(3).is_err());
        let removed = table.remove_at(1).unwrap();
        assert_eq!(removed.name(), "b");
        assert_eq!(removed.core().parent(), None);
        assert_eq!(names(&table), ["a", "c"]);
    }

    #[test]
    fn remove_by_id_is_silent_when_absent() {
        let mut table = abc();
        assert!(table.remove_by_id("nope").is_none());
        assert!(!table.is_modified());

        table
            .add_column(PropertyColumn::new("d", "d").with_id("col-d"))
            .unwrap();
        let removed = table.remove_by_id("col-d").unwrap();
        assert_eq!(removed.name(), "d");
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn remove_by_name_takes_first_match() {
        let mut table = abc();
        table
            .add_column(PropertyColumn::new("a", "other").with_id("second-a"))
            .unwrap();
        let removed = table.remove_by_name("a").unwrap();
        assert_eq!(removed.id(), None);
        assert_eq!(table.column_by_name("a").and_then(|c| c.id()), Some("second-a"));
        assert!(table.remove_by_name("zzz").is_none());
    }

    #[test]
    fn remove_by_names_removes_all_matches() {
        let mut table = abc();
        table.create_property_column("a", "again", -1).unwrap();
        let removed = table.remove_by_names(["a", "c", "missing"]);
        let removed: Vec<_> = removed.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(removed, ["a", "c", "a"]);
        assert_eq!(names(&table), ["b"]);
        assert!(table.remove_by_names(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn remove_all_clears() {
        let mut table = abc();
        table.remove_all();
        assert_eq!(table.column_count(), 0);
        assert!(table.is_modified());
    }

    #[test]
    fn move_and_rename() {
        let mut table = abc();
        table.move_column("b", 0, None).unwrap();
        assert_eq!(names(&table), ["b", "a", "c"]);

        table.move_column("b", -1, Some("bee")).unwrap();
        assert_eq!(names(&table), ["a", "c", "bee"]);

        let err = table.move_column("b", 0, None).unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound(name) if name == "b"));
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn move_with_bad_index_keeps_column() {
        let mut table = abc();
        assert!(table.move_column("b", "x", None).is_err());
        assert_eq!(names(&table), ["a", "b", "c"]);
    }

    #[test]
    fn rename() {
        let mut table = abc();
        table.rename_column("c", "see").unwrap();
        assert_eq!(names(&table), ["a", "b", "see"]);
        assert!(table.is_modified());
        assert!(table.rename_column("c", "x").is_err());
    }

    #[test]
    fn lookups() {
        let mut table = abc();
        table.column_mut(1, false).unwrap().core_mut().set_visible(false);
        assert_eq!(table.column(1, false).unwrap().name(), "b");
        assert_eq!(table.column(1, true).unwrap().name(), "c");
        assert!(table.column(2, true).is_none());
        assert!(table.column(3, false).is_none());

        assert_eq!(table.column_index("c"), 2);
        assert_eq!(table.column_index("zzz"), -1);
        assert_eq!(table.position("a"), Some(0));
        assert_eq!(table.columns_by_name("a").len(), 1);
        assert!(table.column_by_id("x").is_none());
    }

    #[test]
    fn hide_and_show_all() {
        let mut table = abc();
        table.hide_all();
        table.hide_all();
        assert!(table.all_columns().all(|c| !c.visible()));
        table.show_all();
        assert!(table.all_columns().all(|c| c.visible()));
        assert!(table.is_modified());
    }

    proptest! {
        #[test]
        fn inserted_column_is_found_at_index(len in 0usize..8, at in 0usize..9) {
            let at = at.min(len);
            let mut table: Table<Value> = Table::new();
            for i in 0..len {
                table.create_property_column(format!("c{i}"), "x", -1).unwrap();
            }
            table.create_property_column("new", "x", at).unwrap();
            prop_assert_eq!(table.column(at, false).unwrap().name(), "new");
            prop_assert_eq!(table.column_count(), len + 1);
        }

        #[test]
        fn remove_at_returns_column_at_position(len in 1usize..8, at in 0usize..8) {
            let mut table: Table<Value> = Table::new();
            for i in 0..len {
                table.create_property_column(format!("c{i}"), "x", -1).unwrap();
            }
            let result = table.remove_at(at);
            if at < len {
                let removed = result.unwrap();
                prop_assert_eq!(removed.name(), format!("c{at}"));
                prop_assert_eq!(table.column_count(), len - 1);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(table.column_count(), len);
            }
        }

        #[test]
        fn column_index_is_minus_one_iff_absent(
            present in proptest::collection::vec("[a-d]", 0..6),
            probe in "[a-f]",
        ) {
            let mut table: Table<Value> = Table::new();
            for name in &present {
                table.create_property_column(name.as_str(), "x", -1).unwrap();
            }
            let absent = !present.contains(&probe);
            prop_assert_eq!(table.column_index(&probe) == -1, absent);
        }
    }
}
