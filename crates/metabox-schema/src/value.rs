use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Entry
///
/// One row of a composite field: sub-field id → sub-value. Sub-field order
/// comes from the schema, not the map.
///

pub type Entry = BTreeMap<String, Value>;

///
/// Value
///
/// A field value, either declared as a schema default or stored against a
/// content item. Form submissions arrive as text, so scalars are textual;
/// composite fields carry an ordered sequence of entries.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<String>),
    Entries(Vec<Entry>),
}

impl Value {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    #[must_use]
    pub const fn entries(entries: Vec<Entry>) -> Self {
        Self::Entries(entries)
    }

    /// Empty values never persist; clearing a field deletes its attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Entries(entries) => entries.is_empty(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_entries(&self) -> Option<&Vec<Entry>> {
        match self {
            Self::Entries(entries) => Some(entries),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness_per_variant() {
        assert!(Value::text("").is_empty());
        assert!(!Value::text("x").is_empty());
        assert!(Value::List(vec![]).is_empty());
        assert!(Value::Entries(vec![]).is_empty());
        assert!(!Value::Entries(vec![Entry::new()]).is_empty());
    }

    #[test]
    fn test_equality_is_strict_across_variants() {
        // A scalar never equals a single-element list of the same text.
        assert_ne!(Value::text("1"), Value::List(vec!["1".into()]));
    }

    #[test]
    fn test_untagged_serde_shapes() {
        let v: Value = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(v, Value::text("hello"));

        let v: Value = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(v, Value::List(vec!["a".into(), "b".into()]));

        let v: Value = serde_json::from_str(r#"[{"title":"one"}]"#).unwrap();
        let Value::Entries(entries) = v else {
            panic!("expected entries");
        };
        assert_eq!(entries[0]["title"], Value::text("one"));
    }
}
