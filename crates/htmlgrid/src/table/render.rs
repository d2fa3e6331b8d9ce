//! The render pass.
//!
//! Output order is caption, column tags, `<thead>`, `<tfoot>`, `<tbody>`,
//! all inside one `<table>`. The row source is taken out of the table at
//! the start of the pass and dropped when the pass ends, however it ends.

use htmlgrid_markup::{escape_html, render_tag, Attributes};

use super::Table;
use crate::column::{CellContext, HeaderContext};
use crate::error::TableError;

impl<R> Table<R> {
    /// Renders the table and releases the row source.
    ///
    /// A data binder, when set, runs first and replaces the row source.
    /// With no rows and [`hide_if_empty`](crate::TableConfig::hide_if_empty)
    /// set, the result is the empty string.
    pub fn render(&mut self) -> Result<String, TableError> {
        if let Some(binder) = &mut self.data_binder {
            match binder() {
                Ok(rows) => self.data_source = Some(rows),
                Err(err) => {
                    self.data_source = None;
                    return Err(err.context("data bind").context("render"));
                }
            }
        }
        let rows = self.data_source.take().unwrap_or_default();

        tracing::debug!(
            table = self.id.get(),
            rows = rows.len(),
            columns = self.columns.len(),
            "render start"
        );
        let result = self.render_rows(&rows);
        self.current_header_row_index = None;
        self.current_row_index = None;
        result.map_err(|err| err.context("render"))
    }

    /// Sets `rows` as the row source and renders.
    pub fn render_with(&mut self, rows: Vec<R>) -> Result<String, TableError> {
        self.data_source = Some(rows);
        self.render()
    }

    /// Attributes of the `<tr>` for `item` at visual index `row_index`.
    ///
    /// The row-params callback supplies the base map. The `class`, `id` and
    /// `style` hooks are applied after it, in that order, and overwrite its
    /// keys. Empty hook results are skipped.
    pub fn row_params(&self, item: &R, row_index: usize) -> Result<Attributes, TableError> {
        let mut attrs = match &self.row_params_callback {
            None => Attributes::new(),
            Some(callback) => match callback.get() {
                Some(func) => func(item, row_index),
                None => {
                    return Err(TableError::InvalidValue {
                        property: "row_params_callback",
                        reason: format!(
                            "keyed callback '{}' is detached; wake the table up first",
                            callback.key().unwrap_or_default()
                        ),
                    })
                }
            },
        };

        let computed = [
            ("class", self.hooks.row_class(self, item, row_index)),
            ("id", self.hooks.row_id(self, item, row_index)),
            ("style", self.hooks.row_style(self, item, row_index)),
        ];
        for (name, value) in computed {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                attrs.insert(name, value);
            }
        }
        Ok(attrs)
    }

    fn render_rows(&mut self, rows: &[R]) -> Result<String, TableError> {
        if rows.is_empty() && self.config.hide_if_empty() {
            tracing::debug!(table = self.id.get(), "empty table hidden");
            return Ok(String::new());
        }

        let mut html = self.caption_html();
        if self.config.render_column_tags() {
            html.push_str(&self.column_tags_html());
        }
        if self.config.show_header() {
            let header = self.header_html()?;
            html.push_str(&render_tag("thead", &Attributes::new(), &header));
        }
        if self.config.show_footer() {
            let footer = self
                .hooks
                .footer_row_html(self)
                .map_err(|err| err.context("footer"))?;
            html.push_str(&render_tag("tfoot", &Attributes::new(), &footer));
        }

        let mut body = String::new();
        self.current_row_index = Some(0);
        for (row_index, item) in rows.iter().enumerate() {
            self.current_row_index = Some(row_index);
            let row = self
                .row_html(item, row_index)
                .map_err(|err| err.context(format!("row {row_index}")))?;
            body.push_str(&row);
        }
        html.push_str(&render_tag("tbody", &Attributes::new(), &body));

        let table_attrs = Attributes::new()
            .with_opt("id", self.control_id.as_deref())
            .with_opt("class", self.config.css_class().filter(|c| !c.is_empty()));
        Ok(render_tag("table", &table_attrs, &html))
    }

    fn caption_html(&self) -> String {
        match self.config.caption().filter(|c| !c.is_empty()) {
            Some(caption) => format!("<caption>{}</caption>\n", escape_html(caption)),
            None => String::new(),
        }
    }

    /// A `<col>` per visible column. A column spanning `n` covers the next
    /// `n - 1` columns, which emit nothing. A span below 1 counts as 1.
    fn column_tags_html(&self) -> String {
        let mut html = String::new();
        let mut cursor = 0;
        while let Some(column) = self.columns.get(cursor) {
            if column.visible() {
                html.push_str(&column.render_col_tag());
                html.push('\n');
            }
            cursor = cursor.saturating_add(column.span().max(1));
        }
        html
    }

    fn header_html(&mut self) -> Result<String, TableError> {
        let header_row_count = self.config.header_row_count();
        let mut html = String::new();
        for header_row_index in 0..header_row_count {
            self.current_header_row_index = Some(header_row_index);
            let ctx = HeaderContext {
                header_row_index,
                header_row_count,
            };
            let mut cells = String::new();
            for column in &self.columns {
                let cell = column.render_header_cell(&ctx).map_err(|err| {
                    err.context(format!(
                        "header row {header_row_index}, column '{}'",
                        column.name()
                    ))
                })?;
                cells.push_str(&cell);
            }
            let attrs = self.hooks.header_row_params(self, header_row_index);
            html.push_str(&render_tag("tr", &attrs, &cells));
        }
        self.current_header_row_index = None;
        Ok(html)
    }

    fn row_html(&self, item: &R, row_index: usize) -> Result<String, TableError> {
        let ctx = CellContext::new(row_index);
        let mut cells = String::new();
        for column in &self.columns {
            let cell = column
                .render_cell(item, &ctx)
                .map_err(|err| err.context(format!("column '{}'", column.name())))?;
            cells.push_str(&cell);
        }
        let attrs = self.row_params(item, row_index)?;
        tracing::trace!(table = self.id.get(), row = row_index, "row rendered");
        Ok(render_tag("tr", &attrs, &cells))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::column::{CallableColumn, Column, PropertyColumn};
    use crate::table::TableHooks;

    fn people() -> Vec<Value> {
        vec![
            json!({"name": "Ada", "age": 36}),
            json!({"name": "Grace", "age": 85}),
            json!({"name": "Linus", "age": 54}),
        ]
    }

    fn table() -> Table<Value> {
        let mut table = Table::new();
        table.create_property_column("Name", "name", -1).unwrap();
        table.create_property_column("Age", "age", -1).unwrap();
        table
    }

    #[test]
    fn renders_header_and_body() {
        let mut table = table();
        let html = table.render_with(people()[..1].to_vec()).unwrap();
        assert_eq!(
            html,
            "<table><thead><tr><th>Name</th><th>Age</th></tr></thead>\
             <tbody><tr><td>Ada</td><td>36</td></tr></tbody></table>"
        );
    }

    #[test]
    fn data_source_is_released() {
        let mut table = table();
        table.set_data_source(people());
        assert_eq!(table.data_source().map(<[Value]>::len), Some(3));
        table.render().unwrap();
        assert!(table.data_source().is_none());
    }

    #[test]
    fn data_source_is_released_on_error() {
        let mut table = table();
        table.create_property_column("Missing", "nope", -1).unwrap();
        table.set_data_source(people());
        assert!(table.render().is_err());
        assert!(table.data_source().is_none());
        assert_eq!(table.current_row_index(), None);
    }

    #[test]
    fn hide_if_empty() {
        let mut table = table();
        table.config_mut().set_hide_if_empty(true);
        assert_eq!(table.render().unwrap(), "");

        table.config_mut().set_hide_if_empty(false);
        assert_eq!(
            table.render().unwrap(),
            "<table><thead><tr><th>Name</th><th>Age</th></tr></thead><tbody></tbody></table>"
        );
    }

    #[test]
    fn caption_is_escaped_and_followed_by_newline() {
        let mut table = table();
        table.config_mut().set_show_header(false);
        table.config_mut().set_caption(Some("R&D".into()));
        assert_eq!(
            table.render().unwrap(),
            "<table><caption>R&amp;D</caption>\n<tbody></tbody></table>"
        );
    }

    #[test]
    fn empty_caption_is_skipped() {
        let mut table = table();
        table.config_mut().set_show_header(false);
        table.config_mut().set_caption(Some(String::new()));
        assert_eq!(table.render().unwrap(), "<table><tbody></tbody></table>");
    }

    #[test]
    fn row_classes_alternate() {
        let mut table = table();
        table.config_mut().set_row_css_class(Some("base".into()));
        table.config_mut().set_alternate_row_css_class(Some("alt".into()));
        let rows = people();
        let classes: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| table.row_params(row, i).unwrap().get("class").map(str::to_string))
            .collect();
        assert_eq!(
            classes,
            [
                Some("base".to_string()),
                Some("alt".to_string()),
                Some("base".to_string()),
            ]
        );
    }

    #[test]
    fn hooks_override_callback_keys() {
        struct Ids;

        impl TableHooks<Value> for Ids {
            fn row_id(&self, _table: &Table<Value>, item: &Value, _row_index: usize) -> Option<String> {
                item["name"].as_str().map(|n| format!("person-{n}"))
            }

            fn row_style(&self, _table: &Table<Value>, _item: &Value, _row_index: usize) -> Option<String> {
                Some(String::new())
            }
        }

        let mut table: Table<Value> = Table::with_hooks(Ids);
        table.config_mut().set_row_css_class(Some("row".into()));
        table.set_row_params_callback(|_, i| {
            Attributes::new()
                .with("data-index", i.to_string())
                .with("id", "overwritten")
                .with("style", "kept")
        });
        let attrs = table.row_params(&json!({"name": "Ada"}), 4).unwrap();
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(
            pairs,
            [
                ("data-index", "4"),
                ("id", "person-Ada"),
                ("style", "kept"),
                ("class", "row"),
            ]
        );
    }

    #[test]
    fn detached_keyed_callback_fails_render() {
        let mut table = table();
        table.set_keyed_row_params_callback("rows", |_, _| Attributes::new());
        table.sleep();
        let err = table.render_with(people()).unwrap_err();
        assert_eq!(err.frames(), ["render", "row 0"]);
        assert!(matches!(
            err.root(),
            TableError::InvalidValue { property: "row_params_callback", .. }
        ));
    }

    #[test]
    fn cell_errors_carry_frames() {
        let mut table = table();
        table.create_property_column("Email", "email", 1).unwrap();
        let err = table.render_with(people()).unwrap_err();
        assert_eq!(err.frames(), ["render", "row 0", "column 'Email'"]);
        assert!(matches!(err.root(), TableError::CellExtraction { column, .. } if column == "Email"));
    }

    #[test]
    fn binder_runs_each_pass() {
        let mut table = table();
        let mut calls = 0;
        table.set_data_binder(move || {
            calls += 1;
            Ok(vec![json!({"name": format!("call {calls}"), "age": 0})])
        });
        assert!(table.render().unwrap().contains("call 1"));
        assert!(table.render().unwrap().contains("call 2"));
    }

    #[test]
    fn binder_errors_are_annotated() {
        let mut table = table();
        table.set_data_source(people());
        table.set_data_binder(|| Err(TableError::Config("database down".into())));
        let err = table.render().unwrap_err();
        assert_eq!(err.frames(), ["render", "data bind"]);
        assert!(table.data_source().is_none());
    }

    #[test]
    fn column_tags_follow_span_cursor() {
        let mut table: Table<Value> = Table::new();
        table.create_property_column("a", "a", -1).unwrap();
        table
            .create_property_column("b", "b", -1)
            .unwrap()
            .core_mut()
            .set_span(2)
            .unwrap();
        table.create_property_column("c", "c", -1).unwrap();
        table.config_mut().set_render_column_tags(true);
        table.config_mut().set_show_header(false);
        assert_eq!(
            table.render().unwrap(),
            "<table><col>\n<col span=\"2\">\n<tbody></tbody></table>"
        );
    }

    #[derive(Debug)]
    struct FixedSpan {
        core: crate::column::ColumnCore,
        span: usize,
    }

    impl Column<Value> for FixedSpan {
        fn core(&self) -> &crate::column::ColumnCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut crate::column::ColumnCore {
            &mut self.core
        }

        fn fetch_cell_value(&self, _item: &Value, _ctx: &CellContext) -> Result<String, TableError> {
            Ok(String::new())
        }

        fn span(&self) -> usize {
            self.span
        }
    }

    fn fixed_span(name: &str, span: usize) -> FixedSpan {
        FixedSpan {
            core: crate::column::ColumnCore::new(name),
            span,
        }
    }

    #[test]
    fn zero_span_counts_as_one() {
        let mut table: Table<Value> = Table::new();
        table.add_column(fixed_span("a", 0)).unwrap();
        table.add_column(fixed_span("b", 0)).unwrap();
        table.config_mut().set_render_column_tags(true);
        table.config_mut().set_show_header(false);
        assert_eq!(
            table.render().unwrap(),
            "<table><col>\n<col>\n<tbody></tbody></table>"
        );
    }

    #[test]
    fn huge_span_ends_the_cursor() {
        let mut table: Table<Value> = Table::new();
        table.add_column(fixed_span("a", 1)).unwrap();
        table.add_column(fixed_span("b", usize::MAX)).unwrap();
        table.add_column(fixed_span("c", 1)).unwrap();
        table.config_mut().set_render_column_tags(true);
        table.config_mut().set_show_header(false);
        let html = table.render().unwrap();
        assert_eq!(html.matches("<col").count(), 2);
    }

    #[test]
    fn hidden_columns_advance_the_cursor() {
        let mut table: Table<Value> = Table::new();
        table
            .add_column(PropertyColumn::new("a", "a").hidden())
            .unwrap();
        table.add_column(PropertyColumn::new("b", "b").with_id("b")).unwrap();
        table.config_mut().set_render_column_tags(true);
        table.config_mut().set_show_header(false);
        assert_eq!(
            table.render().unwrap(),
            "<table><col id=\"b\">\n<tbody></tbody></table>"
        );
    }

    #[test]
    fn footer_hook_fills_tfoot() {
        struct Totals;

        impl TableHooks<Value> for Totals {
            fn footer_row_html(&self, table: &Table<Value>) -> Result<String, TableError> {
                Ok(format!("<tr><td colspan=\"{}\">end</td></tr>", table.column_count()))
            }
        }

        let mut table: Table<Value> = Table::with_hooks(Totals);
        table.create_property_column("a", "a", -1).unwrap();
        table.create_property_column("b", "b", -1).unwrap();
        table.config_mut().set_show_header(false);
        table.config_mut().set_show_footer(true);
        assert_eq!(
            table.render().unwrap(),
            "<table><tfoot><tr><td colspan=\"2\">end</td></tr></tfoot><tbody></tbody></table>"
        );
    }

    #[test]
    fn empty_footer_by_default() {
        let mut table = table();
        table.config_mut().set_show_header(false);
        table.config_mut().set_show_footer(true);
        assert_eq!(
            table.render().unwrap(),
            "<table><tfoot></tfoot><tbody></tbody></table>"
        );
    }

    #[test]
    fn table_tag_attributes() {
        let mut table = table();
        table.set_control_id(Some("people".into()));
        table.config_mut().set_css_class(Some("grid".into()));
        table.config_mut().set_show_header(false);
        assert_eq!(
            table.render().unwrap(),
            "<table id=\"people\" class=\"grid\"><tbody></tbody></table>"
        );
    }

    #[test]
    fn header_row_class() {
        let mut table = table();
        table.config_mut().set_header_row_css_class(Some("head".into()));
        let html = table.render().unwrap();
        assert!(html.starts_with("<table><thead><tr class=\"head\"><th>Name</th>"));
    }

    #[test]
    fn transient_indices_reset_after_render() {
        let mut table: Table<Value> = Table::new();
        table
            .add_column(CallableColumn::new("n", |item: &Value| {
                Ok(item.as_str().unwrap_or_default().to_uppercase())
            }))
            .unwrap();
        assert_eq!(table.current_row_index(), None);
        let html = table.render_with(vec![json!("a"), json!("b")]).unwrap();
        assert!(html.contains("<tbody><tr><td>A</td></tr><tr><td>B</td></tr></tbody>"));
        assert_eq!(table.current_row_index(), None);
        assert_eq!(table.current_header_row_index(), None);
    }

    #[test]
    fn cell_class_and_row_header() {
        let mut table: Table<Value> = Table::new();
        let column: &mut dyn Column<Value> = table.create_property_column("n", "n", -1).unwrap();
        column.core_mut().set_css_class(Some("num".into()));
        column.core_mut().set_render_as_header(true);
        table.config_mut().set_show_header(false);
        let html = table.render_with(vec![json!({"n": "<1>"})]).unwrap();
        assert_eq!(
            html,
            "<table><tbody><tr><th class=\"num\">&lt;1&gt;</th></tr></tbody></table>"
        );
    }
}
