//! Normalized form definitions consumed by the form model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Primary key of a form record.
///
/// Directus collections use either integer or string (UUID) keys; both are
/// carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct FormId(String);

impl FormId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for FormId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Key {
            Int(i64),
            Text(String),
        }

        Ok(match Key::deserialize(deserializer)? {
            Key::Int(n) => FormId(n.to_string()),
            Key::Text(s) => FormId(s),
        })
    }
}

/// Listing projection of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: FormId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A declarative validation rule attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub message: Option<String>,
    pub value: Value,
}

/// One editable field of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub label: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub required_text: Option<String>,
    pub props: Value,
    pub validation_rules: Vec<ValidationRule>,
    pub error: String,
    pub classes: Option<String>,
    pub disabled: bool,
}

impl FormField {
    /// Whether the field holds a boolean rather than text
    pub fn is_toggle(&self) -> bool {
        matches!(
            self.field_type.to_ascii_lowercase().as_str(),
            "checkbox" | "boolean" | "toggle" | "switch"
        )
    }
}

/// A complete normalized form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormItem {
    pub name: String,
    pub id: FormId,
    pub description: Option<String>,
    pub css_classes: Option<String>,
    pub submit_endpoint: Option<String>,
    pub fields: Vec<FormField>,
    pub invalid: bool,
    pub disabled: bool,
}

impl FormItem {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}
