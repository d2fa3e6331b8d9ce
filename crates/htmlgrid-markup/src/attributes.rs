//! Insertion-ordered HTML attribute maps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::escape::escape_html;

/// An ordered set of `name="value"` attributes for a single tag.
///
/// Keys keep the position of their first insertion. Re-inserting a key
/// replaces its value, which is how layered attribute sources (a callback,
/// then computed `class`, `id`, `style`) resolve collisions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    entries: IndexMap<String, String>,
}

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute and returns the map (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds an attribute only when `value` is `Some`.
    pub fn with_opt(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    /// Sets an attribute, returning the previous value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlays `other` on top of this map. Values from `other` win.
    pub fn merge(&mut self, other: Attributes) {
        for (name, value) in other.entries {
            self.entries.insert(name, value);
        }
    }

    /// Renders the attributes as they appear inside a start tag.
    ///
    /// Each attribute is preceded by a single space, so an empty map renders
    /// as the empty string. Values are entity-escaped.
    ///
    /// ```rust
    /// use htmlgrid_markup::Attributes;
    ///
    /// let attrs = Attributes::new().with("class", "a b").with("title", "x\"y");
    /// assert_eq!(attrs.render(), r#" class="a b" title="x&quot;y""#);
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
