//! The resolved record and its export surfaces.

use crate::value::Value;
use serde_json::{Map, Value as Json};
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Default key column width for [`ResolvedValues::prettify`].
pub const PRETTIFY_WIDTH: usize = 38;

/// Insertion-ordered field-name-to-value record produced by a resolver run.
///
/// Every entry is a concrete value; descriptors never leak into the record.
#[derive(Debug, Clone)]
pub struct ResolvedValues {
    name: String,
    entries: Vec<(String, Value)>,
}

impl ResolvedValues {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(idx) => self.entries[idx] = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    pub fn schema_name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Dictionary export of every resolved field.
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), serde_json::to_value(value).unwrap_or(Json::Null));
        }
        Json::Object(map)
    }

    /// Multi-line view: bracketed schema name, then one tab-indented
    /// `key: value` line per field with keys right-aligned to `width`.
    pub fn prettify(&self, width: usize, fill: char) -> String {
        let mut out = format!("[{}]", self.name);
        for (name, value) in &self.entries {
            out.push_str("\n\t");
            for _ in 0..width.saturating_sub(name.width()) {
                out.push(fill);
            }
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&value.to_string());
        }
        out
    }
}

impl fmt::Display for ResolvedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prettify(PRETTIFY_WIDTH, ' '))
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolvedValues, PRETTIFY_WIDTH};
    use crate::value::Value;
    use serde_json::json;
    use similar_asserts::assert_eq;

    fn sample() -> ResolvedValues {
        let mut values = ResolvedValues::new("Conf");
        values.insert("alpha", Value::Int(1));
        values.insert("beta", Value::Str("two".into()));
        values
    }

    #[test]
    fn insert_replaces_existing_entry_in_place() {
        let mut values = sample();
        values.insert("alpha", Value::Int(9));
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("alpha"), Some(&Value::Int(9)));
        assert_eq!(values.iter().next().map(|(n, _)| n), Some("alpha"));
    }

    #[test]
    fn to_json_exports_every_entry() {
        assert_eq!(sample().to_json(), json!({"alpha": 1, "beta": "two"}));
    }

    #[test]
    fn prettify_right_aligns_keys() {
        let expected = format!("[Conf]\n\t{:>w$}: 1\n\t{:>w$}: two", "alpha", "beta", w = 10);
        assert_eq!(sample().prettify(10, ' '), expected);
    }

    #[test]
    fn display_uses_default_width() {
        let rendered = sample().to_string();
        let expected = format!("[Conf]\n\t{:>w$}: 1\n\t{:>w$}: two", "alpha", "beta", w = PRETTIFY_WIDTH);
        assert_eq!(rendered, expected);
    }
}
