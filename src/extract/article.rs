//! Extracted article record.
use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::Field;
use crate::sources::Origin;

/// Value of an extracted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
    Paragraphs(Vec<String>),
}

impl Value {
    /// Flat textual rendering, used for tabular outputs.
    ///
    /// Paragraphs are separated by newlines.
    pub fn to_cell(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Text(t) => t.clone(),
            Value::Paragraphs(p) => p.join("\n"),
        }
    }
}

/// Fields extracted from a single document.
///
/// Only successfully extracted, non-empty fields are present:
/// an absent key carries no value at all.
///
/// The origin of the document is kept along but never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    fields: BTreeMap<Field, Value>,
    origin: Option<Origin>,
}

impl Article {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, value: Value) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Get a textual field. Integers are rendered.
    pub fn text(&self, field: Field) -> Option<String> {
        match self.get(field)? {
            Value::Paragraphs(_) => None,
            v => Some(v.to_cell()),
        }
    }

    /// Get a paragraph field.
    pub fn paragraphs(&self, field: Field) -> Option<&[String]> {
        match self.get(field)? {
            Value::Paragraphs(p) => Some(p.as_slice()),
            _ => None,
        }
    }

    /// Present fields, in [Field] order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn set_origin(&mut self, origin: Option<Origin>) {
        self.origin = origin;
    }

    /// Name of the bundle the article comes from, empty if unknown.
    pub fn source(&self) -> String {
        self.origin
            .as_ref()
            .map(Origin::bundle_name)
            .unwrap_or_default()
    }
}

/// Serializes as an object keyed by field names, sorted by key.
impl Serialize for Article {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&'static str, &Value> = self
            .fields()
            .filter_map(|field| self.get(field).map(|value| (field.name(), value)))
            .collect();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (k, v) in sorted {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let mut article = Article::new();
        assert!(article.is_empty());
        article.insert(Field::Id, Value::Text("123".to_string()));
        article.insert(Field::Year, Value::Int(2019));
        article.insert(
            Field::Body,
            Value::Paragraphs(vec!["a".to_string(), "b".to_string()]),
        );

        assert_eq!(article.len(), 3);
        assert_eq!(article.text(Field::Id).as_deref(), Some("123"));
        assert_eq!(article.text(Field::Year).as_deref(), Some("2019"));
        assert_eq!(article.text(Field::Body), None);
        assert_eq!(article.paragraphs(Field::Body).map(|p| p.len()), Some(2));
        assert!(!article.contains(Field::Title));
    }

    #[test]
    fn serialize_sorted_by_name() {
        let mut article = Article::new();
        article.insert(Field::Year, Value::Int(2020));
        article.insert(Field::Id, Value::Text("1".to_string()));
        article.insert(Field::Body, Value::Paragraphs(vec!["p".to_string()]));

        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(json, r#"{"body":["p"],"id":"1","year":2020}"#);
    }

    #[test]
    fn cells() {
        assert_eq!(Value::Int(3).to_cell(), "3");
        assert_eq!(
            Value::Paragraphs(vec!["a".to_string(), "b".to_string()]).to_cell(),
            "a\nb"
        );
    }
}
