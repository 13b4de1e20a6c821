//! Raw Directus record shapes and their normalization
//!
//! A form record is read with the field selection
//! `*, fields.field_id.*, fields.field_id.validation_rules.validation_rule_id.*`.
//! Fields and rules reach the form through many-to-many junction rows, so the
//! payload nests every field under `field_id` and every rule under
//! `validation_rule_id`. `normalize_form` flattens that into a `FormItem`.

use super::model::{FormField, FormId, FormItem, ValidationRule};
use serde::Deserialize;
use serde_json::Value;

/// Field selection that materializes fields and their rules in one request
pub const FORM_ITEM_FIELDS: [&str; 3] = [
    "*",
    "fields.field_id.*",
    "fields.field_id.validation_rules.validation_rule_id.*",
];

/// Field selection for the catalog listing
pub const FORM_LIST_FIELDS: [&str; 3] = ["name", "id", "description"];

#[derive(Debug, Clone, Deserialize)]
pub struct RawFormRecord {
    pub id: FormId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub css_classes: Option<String>,
    #[serde(default)]
    pub submit_endpoint: Option<String>,
    #[serde(default)]
    pub disabled: Value,
    pub fields: Vec<RawFieldJunction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFieldJunction {
    pub field_id: RawField,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub label: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub required_text: Option<String>,
    #[serde(default)]
    pub props: Value,
    pub validation_rules: Vec<RawRuleJunction>,
    #[serde(default)]
    pub classes: Option<String>,
    #[serde(default)]
    pub disabled: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRuleJunction {
    pub validation_rule_id: RawRule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// JavaScript-style truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Flatten a raw form record into the normalized form definition
pub fn normalize_form(record: RawFormRecord) -> FormItem {
    FormItem {
        name: record.name.unwrap_or_default(),
        id: record.id,
        description: record.description,
        css_classes: record.css_classes,
        submit_endpoint: record.submit_endpoint,
        fields: record
            .fields
            .into_iter()
            .map(|junction| normalize_field(junction.field_id))
            .collect(),
        invalid: false,
        disabled: is_truthy(&record.disabled),
    }
}

fn normalize_field(field: RawField) -> FormField {
    FormField {
        label: field.label.unwrap_or_default(),
        name: field.name,
        field_type: field.field_type.unwrap_or_default(),
        required: field.required.unwrap_or(false),
        required_text: field.required_text,
        props: field.props,
        validation_rules: field
            .validation_rules
            .into_iter()
            .map(|junction| {
                let rule = junction.validation_rule_id;
                ValidationRule {
                    rule_type: rule.rule_type,
                    message: rule.message,
                    value: rule.value,
                }
            })
            .collect(),
        error: String::new(),
        classes: field.classes,
        disabled: is_truthy(&field.disabled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn demo_record() -> Value {
        json!({
            "id": 1,
            "name": "Demo Form",
            "description": "Shows every field type",
            "css_classes": "grid",
            "submit_endpoint": "/api/submit",
            "status": "published",
            "fields": [
                {
                    "id": 11,
                    "form_id": 1,
                    "field_id": {
                        "id": 101,
                        "label": "Full name",
                        "name": "fullName",
                        "type": "text",
                        "required": true,
                        "required_text": "Name is required",
                        "props": {"placeholder": "Jane Doe"},
                        "classes": "col-6",
                        "disabled": null,
                        "validation_rules": [
                            {"id": 1, "validation_rule_id": {"id": 5, "type": "minLength", "message": "Too short", "value": 2}},
                            {"id": 2, "validation_rule_id": {"id": 6, "type": "maxLength", "message": "Too long", "value": 80}}
                        ]
                    }
                },
                {
                    "id": 12,
                    "form_id": 1,
                    "field_id": {
                        "id": 102,
                        "label": "Email",
                        "name": "email",
                        "type": "email",
                        "required": false,
                        "props": null,
                        "validation_rules": []
                    }
                },
                {
                    "id": 13,
                    "form_id": 1,
                    "field_id": {
                        "id": 103,
                        "label": "Confirm password",
                        "name": "confirmPassword",
                        "type": "password",
                        "disabled": true,
                        "validation_rules": [
                            {"id": 3, "validation_rule_id": {"id": 7, "type": "custom", "message": "Passwords do not match", "value": "password_mismatch"}}
                        ]
                    }
                }
            ]
        })
    }

    fn normalize(value: Value) -> FormItem {
        normalize_form(serde_json::from_value(value).unwrap())
    }

    mod shape {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_field_and_rule_counts_are_preserved() {
            let item = normalize(demo_record());
            assert_eq!(item.fields.len(), 3);
            let counts: Vec<usize> = item
                .fields
                .iter()
                .map(|f| f.validation_rules.len())
                .collect();
            assert_eq!(counts, vec![2, 0, 1]);
        }

        #[test]
        fn test_rules_are_mapped_from_junction_path() {
            let item = normalize(demo_record());
            assert_eq!(
                item.fields[0].validation_rules,
                vec![
                    ValidationRule {
                        rule_type: "minLength".to_string(),
                        message: Some("Too short".to_string()),
                        value: json!(2),
                    },
                    ValidationRule {
                        rule_type: "maxLength".to_string(),
                        message: Some("Too long".to_string()),
                        value: json!(80),
                    },
                ]
            );
        }

        #[test]
        fn test_field_attributes_are_copied() {
            let item = normalize(demo_record());
            let full_name = &item.fields[0];
            assert_eq!(full_name.label, "Full name");
            assert_eq!(full_name.name, "fullName");
            assert_eq!(full_name.field_type, "text");
            assert!(full_name.required);
            assert_eq!(full_name.required_text.as_deref(), Some("Name is required"));
            assert_eq!(full_name.props, json!({"placeholder": "Jane Doe"}));
            assert_eq!(full_name.classes.as_deref(), Some("col-6"));
            assert_eq!(full_name.error, "");
        }

        #[test]
        fn test_form_attributes_are_copied() {
            let item = normalize(demo_record());
            assert_eq!(item.name, "Demo Form");
            assert_eq!(item.id, FormId::new("1"));
            assert_eq!(item.description.as_deref(), Some("Shows every field type"));
            assert_eq!(item.css_classes.as_deref(), Some("grid"));
            assert_eq!(item.submit_endpoint.as_deref(), Some("/api/submit"));
        }

        #[test]
        fn test_normalization_is_idempotent() {
            let record: RawFormRecord = serde_json::from_value(demo_record()).unwrap();
            let first = normalize_form(record.clone());
            let second = normalize_form(record);
            assert_eq!(first, second);
        }

        #[test]
        fn test_record_without_rules_is_rejected() {
            let mut record = demo_record();
            record["fields"][1]["field_id"]
                .as_object_mut()
                .unwrap()
                .remove("validation_rules");
            assert!(serde_json::from_value::<RawFormRecord>(record).is_err());
        }

        #[test]
        fn test_empty_form_has_no_fields() {
            let item = normalize(json!({"id": "x", "name": "Empty", "fields": []}));
            assert!(item.fields.is_empty());
            assert!(item.description.is_none());
        }
    }

    mod defaults {
        use super::*;

        #[test]
        fn test_missing_disabled_is_false() {
            let item = normalize(demo_record());
            assert!(!item.fields[0].disabled, "null disabled");
            assert!(!item.fields[1].disabled, "absent disabled");
        }

        #[test]
        fn test_truthy_disabled_is_true() {
            let item = normalize(demo_record());
            assert!(item.fields[2].disabled);
        }

        #[test]
        fn test_form_flags_initialize_false() {
            let item = normalize(demo_record());
            assert!(!item.invalid);
            assert!(!item.disabled);
        }

        #[test]
        fn test_missing_required_is_false() {
            let item = normalize(demo_record());
            assert!(!item.fields[2].required);
        }

        #[test]
        fn test_truthiness() {
            assert!(!is_truthy(&json!(null)));
            assert!(!is_truthy(&json!(false)));
            assert!(!is_truthy(&json!(0)));
            assert!(!is_truthy(&json!("")));
            assert!(is_truthy(&json!(true)));
            assert!(is_truthy(&json!(1)));
            assert!(is_truthy(&json!("yes")));
            assert!(is_truthy(&json!([])));
        }
    }
}
