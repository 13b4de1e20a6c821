//! Editable form model built from a normalized form definition

use super::model::{FormField, FormId, FormItem};
use super::validators::ValidatorRegistry;
use super::value::FormValue;
use serde_json::Value;
use std::sync::Arc;

/// Error text used when a failing custom rule carries no message
const DEFAULT_RULE_MESSAGE: &str = "Invalid value";

/// Trait for cycling focus through a form's fields
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// A loaded form: definition, current values and the validators it checks against
#[derive(Debug, Clone)]
pub struct FormModel {
    item: FormItem,
    values: FormValue,
    validators: Arc<ValidatorRegistry>,
    active_field_index: usize,
}

impl FormModel {
    /// Build a model; values start from each field's `props.defaultValue`, if any
    pub fn new(item: FormItem, validators: Arc<ValidatorRegistry>) -> Self {
        let values = item
            .fields
            .iter()
            .filter_map(|f| {
                f.props
                    .get("defaultValue")
                    .map(|v| (f.name.clone(), v.clone()))
            })
            .collect();

        Self {
            item,
            values,
            validators,
            active_field_index: 0,
        }
    }

    pub fn id(&self) -> &FormId {
        &self.item.id
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn item(&self) -> &FormItem {
        &self.item
    }

    pub fn fields(&self) -> &[FormField] {
        &self.item.fields
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.item.field(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.item.field_mut(name)
    }

    pub fn is_invalid(&self) -> bool {
        self.item.invalid
    }

    /// Current value snapshot
    pub fn value(&self) -> &FormValue {
        &self.values
    }

    pub fn active_field_ref(&self) -> Option<&FormField> {
        self.item.fields.get(self.active_field_index)
    }

    /// Set a field's value.
    ///
    /// Returns false when the field does not exist or is disabled, or the
    /// whole form is disabled.
    pub fn set_value(&mut self, name: &str, value: Value) -> bool {
        if self.item.disabled {
            return false;
        }
        match self.item.field(name) {
            Some(field) if !field.disabled => {
                self.values.set(name, value);
                true
            }
            _ => false,
        }
    }

    /// Append a character to the active text field
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(field) = self.active_field_ref() else {
            return false;
        };
        if field.is_toggle() {
            return false;
        }
        let name = field.name.clone();
        let mut text = self.text_value(&name);
        text.push(c);
        self.set_value(&name, Value::String(text))
    }

    /// Remove the last character of the active text field
    pub fn backspace(&mut self) -> bool {
        let Some(field) = self.active_field_ref() else {
            return false;
        };
        if field.is_toggle() {
            return false;
        }
        let name = field.name.clone();
        let mut text = self.text_value(&name);
        if text.pop().is_none() {
            return false;
        }
        self.set_value(&name, Value::String(text))
    }

    /// Flip the active boolean field
    pub fn toggle_active(&mut self) -> bool {
        let Some(field) = self.active_field_ref() else {
            return false;
        };
        if !field.is_toggle() {
            return false;
        }
        let name = field.name.clone();
        let current = self.values.get(&name).value().and_then(Value::as_bool);
        self.set_value(&name, Value::Bool(!current.unwrap_or(false)))
    }

    /// Display text for a field's current value
    pub fn display_value(&self, name: &str) -> String {
        match self.values.get(name).value() {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn text_value(&self, name: &str) -> String {
        match self.values.get(name).value() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Evaluate every rule that refers to a registered custom validator.
    ///
    /// Each field's `error` is set to the message of its first failing
    /// custom rule and cleared otherwise; the form's `invalid` flag reflects
    /// whether any field failed. Returns true when the form is valid.
    pub fn run_custom_validators(&mut self) -> bool {
        let mut any_failed = false;

        for field in &mut self.item.fields {
            let field_value = self.values.get(&field.name).value().cloned();
            let field_value = field_value.unwrap_or(Value::Null);

            let failure = field.validation_rules.iter().find(|rule| {
                self.validators
                    .resolve(rule)
                    .is_some_and(|validator| !validator(&field_value, &self.values))
            });

            match failure {
                Some(rule) => {
                    field.error = rule
                        .message
                        .clone()
                        .unwrap_or_else(|| DEFAULT_RULE_MESSAGE.to_string());
                    any_failed = true;
                }
                None => field.error.clear(),
            }
        }

        self.item.invalid = any_failed;
        !any_failed
    }
}

impl Form for FormModel {
    fn field_count(&self) -> usize {
        self.item.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count().saturating_sub(1));
    }
}
