//! Display configuration for a table.
//!
//! [`TableConfig`] holds every setting that changes how a table renders. It
//! can be built in code, loaded from YAML or JSON, or edited property by
//! property through [`TableConfig::set_param`], which is what designer
//! tooling uses: each configurable property is described by a
//! [`ConfigParam`] in [`TableConfig::params`].
//!
//! ```rust
//! use htmlgrid::TableConfig;
//!
//! let config = TableConfig::from_yaml(r#"
//! caption: Open orders
//! row_css_class: row
//! alternate_row_css_class: row-alt
//! header_row_count: 2
//! "#).unwrap();
//!
//! assert_eq!(config.caption(), Some("Open orders"));
//! assert_eq!(config.header_row_count(), 2);
//! assert!(config.show_header());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cast::{cast_bool, cast_integer, cast_opt_string};
use crate::error::TableError;

/// Settings that control table markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableConfigRaw", into = "TableConfigRaw")]
pub struct TableConfig {
    caption: Option<String>,
    css_class: Option<String>,
    row_css_class: Option<String>,
    alternate_row_css_class: Option<String>,
    header_row_css_class: Option<String>,
    show_header: bool,
    show_footer: bool,
    render_column_tags: bool,
    hide_if_empty: bool,
    header_row_count: usize,
}

#[derive(Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TableConfigRaw {
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    css_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    row_css_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternate_row_css_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_row_css_class: Option<String>,
    show_header: bool,
    show_footer: bool,
    render_column_tags: bool,
    hide_if_empty: bool,
    header_row_count: usize,
}

impl Default for TableConfigRaw {
    fn default() -> Self {
        TableConfig::default().into()
    }
}

impl From<TableConfig> for TableConfigRaw {
    fn from(config: TableConfig) -> Self {
        TableConfigRaw {
            caption: config.caption,
            css_class: config.css_class,
            row_css_class: config.row_css_class,
            alternate_row_css_class: config.alternate_row_css_class,
            header_row_css_class: config.header_row_css_class,
            show_header: config.show_header,
            show_footer: config.show_footer,
            render_column_tags: config.render_column_tags,
            hide_if_empty: config.hide_if_empty,
            header_row_count: config.header_row_count,
        }
    }
}

impl TryFrom<TableConfigRaw> for TableConfig {
    type Error = String;

    fn try_from(raw: TableConfigRaw) -> Result<Self, Self::Error> {
        if raw.header_row_count == 0 {
            return Err("header_row_count must be at least 1".to_string());
        }
        Ok(TableConfig {
            caption: raw.caption,
            css_class: raw.css_class,
            row_css_class: raw.row_css_class,
            alternate_row_css_class: raw.alternate_row_css_class,
            header_row_css_class: raw.header_row_css_class,
            show_header: raw.show_header,
            show_footer: raw.show_footer,
            render_column_tags: raw.render_column_tags,
            hide_if_empty: raw.hide_if_empty,
            header_row_count: raw.header_row_count,
        })
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            caption: None,
            css_class: None,
            row_css_class: None,
            alternate_row_css_class: None,
            header_row_css_class: None,
            show_header: true,
            show_footer: false,
            render_column_tags: false,
            hide_if_empty: false,
            header_row_count: 1,
        }
    }
}

/// The value type a configurable property accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Boolean,
    Integer,
}

/// Designer-facing description of one configurable property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigParam {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
}

const PARAMS: &[ConfigParam] = &[
    ConfigParam {
        name: "caption",
        description: "Text to print in the caption tag of the table",
        kind: ParamKind::String,
    },
    ConfigParam {
        name: "css_class",
        description: "Css class given to the table tag",
        kind: ParamKind::String,
    },
    ConfigParam {
        name: "row_css_class",
        description: "Css class given to each row",
        kind: ParamKind::String,
    },
    ConfigParam {
        name: "alternate_row_css_class",
        description: "Css class given to every other row",
        kind: ParamKind::String,
    },
    ConfigParam {
        name: "header_row_css_class",
        description: "Css class given to the header rows",
        kind: ParamKind::String,
    },
    ConfigParam {
        name: "show_header",
        description: "Whether or not to show the header. Default is true",
        kind: ParamKind::Boolean,
    },
    ConfigParam {
        name: "show_footer",
        description: "Whether or not to show the footer. Default is false",
        kind: ParamKind::Boolean,
    },
    ConfigParam {
        name: "render_column_tags",
        description: "Whether or not to render col tags for the columns. Default is false",
        kind: ParamKind::Boolean,
    },
    ConfigParam {
        name: "hide_if_empty",
        description: "Draw nothing when there is no data, instead of an empty table. Default is false",
        kind: ParamKind::Boolean,
    },
    ConfigParam {
        name: "header_row_count",
        description: "Number of header rows to draw. Default is 1",
        kind: ParamKind::Integer,
    },
];

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, TableError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(TableError::Config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    pub fn to_yaml(&self) -> Result<String, TableError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Every property [`set_param`](Self::set_param) accepts.
    pub fn params() -> &'static [ConfigParam] {
        PARAMS
    }

    /// Sets a property by name from a loosely-typed value.
    ///
    /// Strings such as `"2"` or `"yes"` are coerced to the property's type.
    /// Unknown names, failed coercions and out-of-domain values leave the
    /// configuration unchanged.
    pub fn set_param(&mut self, name: &str, value: &Value) -> Result<(), TableError> {
        match name {
            "caption" => self.caption = cast_opt_string(value)?,
            "css_class" => self.css_class = cast_opt_string(value)?,
            "row_css_class" => self.row_css_class = cast_opt_string(value)?,
            "alternate_row_css_class" => self.alternate_row_css_class = cast_opt_string(value)?,
            "header_row_css_class" => self.header_row_css_class = cast_opt_string(value)?,
            "show_header" => self.show_header = cast_bool(value)?,
            "show_footer" => self.show_footer = cast_bool(value)?,
            "render_column_tags" => self.render_column_tags = cast_bool(value)?,
            "hide_if_empty" => self.hide_if_empty = cast_bool(value)?,
            "header_row_count" => {
                let count = cast_integer(value)?;
                let count = usize::try_from(count).map_err(|_| TableError::InvalidValue {
                    property: "header_row_count",
                    reason: format!("{} is negative", count),
                })?;
                self.set_header_row_count(count)?;
            }
            other => return Err(TableError::UnknownProperty(other.to_string())),
        }
        Ok(())
    }

    /// Reads a property by name as a JSON value.
    pub fn param(&self, name: &str) -> Result<Value, TableError> {
        let opt = |s: &Option<String>| s.clone().map(Value::String).unwrap_or(Value::Null);
        Ok(match name {
            "caption" => opt(&self.caption),
            "css_class" => opt(&self.css_class),
            "row_css_class" => opt(&self.row_css_class),
            "alternate_row_css_class" => opt(&self.alternate_row_css_class),
            "header_row_css_class" => opt(&self.header_row_css_class),
            "show_header" => Value::Bool(self.show_header),
            "show_footer" => Value::Bool(self.show_footer),
            "render_column_tags" => Value::Bool(self.render_column_tags),
            "hide_if_empty" => Value::Bool(self.hide_if_empty),
            "header_row_count" => Value::from(self.header_row_count),
            other => return Err(TableError::UnknownProperty(other.to_string())),
        })
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn set_caption(&mut self, caption: Option<String>) {
        self.caption = caption;
    }

    /// Css class of the `<table>` tag.
    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    pub fn set_css_class(&mut self, class: Option<String>) {
        self.css_class = class;
    }

    pub fn row_css_class(&self) -> Option<&str> {
        self.row_css_class.as_deref()
    }

    pub fn set_row_css_class(&mut self, class: Option<String>) {
        self.row_css_class = class;
    }

    pub fn alternate_row_css_class(&self) -> Option<&str> {
        self.alternate_row_css_class.as_deref()
    }

    pub fn set_alternate_row_css_class(&mut self, class: Option<String>) {
        self.alternate_row_css_class = class;
    }

    pub fn header_row_css_class(&self) -> Option<&str> {
        self.header_row_css_class.as_deref()
    }

    pub fn set_header_row_css_class(&mut self, class: Option<String>) {
        self.header_row_css_class = class;
    }

    pub fn show_header(&self) -> bool {
        self.show_header
    }

    pub fn set_show_header(&mut self, show: bool) {
        self.show_header = show;
    }

    pub fn show_footer(&self) -> bool {
        self.show_footer
    }

    pub fn set_show_footer(&mut self, show: bool) {
        self.show_footer = show;
    }

    pub fn render_column_tags(&self) -> bool {
        self.render_column_tags
    }

    pub fn set_render_column_tags(&mut self, render: bool) {
        self.render_column_tags = render;
    }

    pub fn hide_if_empty(&self) -> bool {
        self.hide_if_empty
    }

    pub fn set_hide_if_empty(&mut self, hide: bool) {
        self.hide_if_empty = hide;
    }

    pub fn header_row_count(&self) -> usize {
        self.header_row_count
    }

    /// Sets the number of header rows. Zero is rejected.
    pub fn set_header_row_count(&mut self, count: usize) -> Result<(), TableError> {
        if count == 0 {
            return Err(TableError::InvalidValue {
                property: "header_row_count",
                reason: "must be at least 1".to_string(),
            });
        }
        self.header_row_count = count;
        Ok(())
    }
}
