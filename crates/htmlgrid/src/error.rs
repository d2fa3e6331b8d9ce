//! Error types for column management and rendering.
//!
//! [`TableError`] covers the four failure families a table can hit:
//! bad positional indices, values that cannot be coerced to the expected
//! type, cells whose value cannot be extracted from a row, and
//! configuration problems. Name and id lookups never fail; they return
//! `None`, `-1` or an empty vector instead.
//!
//! Errors pick up one [`TableError::Context`] frame for every level of the
//! render pipeline they unwind through (cell, row, pass), so the final error
//! reads like a short trace of where it came from.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// A positional column operation addressed a slot that does not exist.
    #[error("index {index} is out of range for {operation} (column count {len})")]
    IndexOutOfRange {
        index: i64,
        len: usize,
        operation: &'static str,
    },

    /// A loosely-typed value could not be coerced to the required type.
    #[error("cannot cast {value:?} to {target}")]
    InvalidCast { value: String, target: &'static str },

    /// A column could not resolve its value from a row item.
    #[error("column '{column}' cannot render cell: {reason}")]
    CellExtraction { column: String, reason: String },

    /// A move or rename named a column that is not in the table.
    #[error("no column named '{0}'")]
    ColumnNotFound(String),

    /// A setter rejected a value of the right type but outside its domain.
    #[error("invalid value for {property}: {reason}")]
    InvalidValue {
        property: &'static str,
        reason: String,
    },

    /// A by-name setter was given a property the table does not have.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// Wakeup could not find a keyed callback on the new owner.
    #[error("callback '{key}' could not be restored from owner '{owner}'")]
    UnresolvedCallback { key: String, owner: String },

    #[error("template error: {0}")]
    Template(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error annotated with the pipeline frame it passed through.
    #[error("{frame}: {source}")]
    Context {
        frame: String,
        #[source]
        source: Box<TableError>,
    },
}

impl TableError {
    pub(crate) fn cell(column: &str, reason: impl Into<String>) -> Self {
        TableError::CellExtraction {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Wraps this error in one more context frame.
    pub fn context(self, frame: impl Into<String>) -> Self {
        TableError::Context {
            frame: frame.into(),
            source: Box::new(self),
        }
    }

    /// The originating error, with every context frame peeled off.
    pub fn root(&self) -> &TableError {
        let mut current = self;
        while let TableError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Context frames, outermost first.
    pub fn frames(&self) -> Vec<&str> {
        let mut frames = Vec::new();
        let mut current = self;
        while let TableError::Context { frame, source } = current {
            frames.push(frame.as_str());
            current = source;
        }
        frames
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for TableError {
    fn from(err: serde_yaml::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

impl From<minijinja::Error> for TableError {
    fn from(err: minijinja::Error) -> Self {
        TableError::Template(err.to_string())
    }
}
