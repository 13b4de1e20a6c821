//! Named cross-field validators
//!
//! A validator is a predicate over the edited field's value and the whole
//! form snapshot. The registry is built once at startup and handed to every
//! form model; registering a name twice replaces the earlier predicate.

use super::model::ValidationRule;
use super::value::FormValue;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Rule type that names a custom validator through its `value`
pub const CUSTOM_RULE_TYPE: &str = "custom";

pub const PASSWORD_MISMATCH: &str = "password_mismatch";

/// Predicate `(field value, whole form value) -> valid`
pub type CustomValidator = Arc<dyn Fn(&Value, &FormValue) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, CustomValidator>,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock validators
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(PASSWORD_MISMATCH, password_mismatch);
        registry
    }

    /// Register a validator, returning the one it replaced
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F) -> Option<CustomValidator>
    where
        F: Fn(&Value, &FormValue) -> bool + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Arc::new(validator))
    }

    pub fn get(&self, name: &str) -> Option<&CustomValidator> {
        self.validators.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The custom validator a rule refers to, if any.
    ///
    /// `{"type": "custom", "value": "<name>"}` names it explicitly; a rule
    /// whose type is itself a registered name refers to that validator.
    pub fn resolve(&self, rule: &ValidationRule) -> Option<&CustomValidator> {
        if rule.rule_type == CUSTOM_RULE_TYPE {
            rule.value.as_str().and_then(|name| self.get(name))
        } else {
            self.get(&rule.rule_type)
        }
    }
}

/// Valid only when `password` and `confirmPassword` hold the same value
pub fn password_mismatch(_: &Value, form_value: &FormValue) -> bool {
    form_value.get("password") == form_value.get("confirmPassword")
}
