//! Form value snapshots and typed field lookups

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of looking up a field in a form value snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldLookup<'a> {
    /// The snapshot has no entry for the field
    Missing,
    /// The field is present but holds `null` or an empty string
    Empty(&'a Value),
    /// The field holds a value
    Present(&'a Value),
}

impl<'a> FieldLookup<'a> {
    #[cfg(test)]
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldLookup::Missing)
    }

    /// The underlying value, if the field exists at all
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            FieldLookup::Missing => None,
            FieldLookup::Empty(v) | FieldLookup::Present(v) => Some(v),
        }
    }

    /// Whether the field holds exactly this value, with no type coercion
    pub fn equals(&self, expected: &Value) -> bool {
        self.value() == Some(expected)
    }
}

/// Whole-form value snapshot keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValue(Map<String, Value>);

impl FormValue {
    pub fn get(&self, name: &str) -> FieldLookup<'_> {
        match self.0.get(name) {
            None => FieldLookup::Missing,
            Some(v) if v.is_null() || v.as_str().is_some_and(str::is_empty) => {
                FieldLookup::Empty(v)
            }
            Some(v) => FieldLookup::Present(v),
        }
    }

    /// Set a field value, returning the previous one
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

}

impl<K: Into<String>> FromIterator<(K, Value)> for FormValue {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
