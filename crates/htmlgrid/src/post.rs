//! Posted form data consumed by stateful columns.

use std::collections::HashMap;

/// Multi-valued form fields from a submitted page.
///
/// Field names keep the `[]` suffix browsers send for repeated inputs, so a
/// checkbox group named `selected[]` is looked up as `"selected[]"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostData {
    fields: HashMap<String, Vec<String>>,
}

impl PostData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` request body.
    ///
    /// ```rust
    /// use htmlgrid::PostData;
    ///
    /// let post = PostData::from_urlencoded("sel%5B%5D=3&sel%5B%5D=5&note=a+b");
    /// assert_eq!(post.get_all("sel[]"), ["3", "5"]);
    /// assert_eq!(post.get("note"), Some("a b"));
    /// ```
    pub fn from_urlencoded(body: &str) -> Self {
        let mut post = Self::new();
        for (name, value) in url::form_urlencoded::parse(body.as_bytes()) {
            post.insert(name.into_owned(), value.into_owned());
        }
        post
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a value to a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// First value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a field, in submission order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
