//! Ordered data records.
//!
//! A [`Record`] maps data field names to [`Value`]s. It wraps [`IndexMap`] so
//! that fields iterate in the order they were inserted, which keeps debugging
//! output and serde round-trips predictable. The serializer never relies on
//! this order: rows are always flattened in the schema's declared field order.
//!
//! ## Examples
//!
//! ```rust
//! use opl_text::{Record, Value};
//!
//! let mut record = Record::new();
//! record.insert("cost", 2.49);
//! record.insert("unit", "oz");
//!
//! assert_eq!(record.len(), 2);
//! assert_eq!(record.get("cost"), Some(&Value::from(2.49)));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered map of field names to values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Record(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field value.
    ///
    /// If the record already contained this field, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::Record;
    ///
    /// let mut record = Record::new();
    /// assert!(record.insert("qty", 1).is_none());
    /// assert!(record.insert("qty", 2).is_some());
    /// ```
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the field names, in insertion order.
    pub fn fields(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the field/value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Record(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let mut record = Record::new();
        record.insert("b", 1);
        record.insert("a", 2);
        record.insert("c", 3);
        let fields: Vec<_> = record.fields().cloned().collect();
        assert_eq!(fields, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = vec![
            ("name".to_string(), Value::from("bread")),
            ("cost".to_string(), Value::from(2.0)),
        ]
        .into_iter()
        .collect();
        assert!(record.contains_field("name"));
        assert!(!record.contains_field("qty"));
        assert_eq!(record.get("cost").and_then(Value::as_f64), Some(2.0));
    }

    #[test]
    fn test_serde_transparent() {
        let mut record = Record::new();
        record.insert("min", 0);
        record.insert("label", "protein");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"min":0.0,"label":"protein"}"#);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
