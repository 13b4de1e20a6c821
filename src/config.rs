//! Configuration handling for the previewer

use crate::forms::{FieldRule, DEFAULT_COLLECTION};
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the Directus URL
pub const URL_ENV: &str = "DIRECTUS_URL";
/// Environment variable overriding the static access token
pub const TOKEN_ENV: &str = "DIRECTUS_STATIC_TOKEN";

/// User configuration for the previewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directus base URL
    #[serde(default)]
    pub directus_url: Option<String>,
    /// Directus static access token
    #[serde(default)]
    pub directus_token: Option<String>,
    /// Collection holding form records
    #[serde(default = "default_collection")]
    pub form_collection: String,
    /// Field rules applied on every value change
    #[serde(default = "default_field_rules")]
    pub field_rules: Vec<FieldRule>,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_field_rules() -> Vec<FieldRule> {
    vec![FieldRule::demo()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            directus_url: None,
            directus_token: None,
            form_collection: default_collection(),
            field_rules: default_field_rules(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "dymik", "dymik-preview")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(std::env::var(URL_ENV).ok(), std::env::var(TOKEN_ENV).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "Loaded config file");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Non-empty values replace the file settings
    pub fn apply_overrides(&mut self, url: Option<String>, token: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.directus_url = Some(url);
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.directus_token = Some(token);
        }
    }

    /// The configured Directus URL
    pub fn require_url(&self) -> Result<&str> {
        self.directus_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("No Directus URL configured; set {URL_ENV} or directus_url in config.json")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.directus_url.is_none());
        assert!(config.directus_token.is_none());
        assert_eq!(config.form_collection, "form");
        assert_eq!(config.field_rules, vec![FieldRule::demo()]);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.directus_url.is_none());
        assert_eq!(parsed.form_collection, "form");
        assert_eq!(parsed.field_rules.len(), 1);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"directus_url": "http://cms:8055", "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.directus_url.as_deref(), Some("http://cms:8055"));
    }

    #[test]
    fn test_explicit_empty_rules() {
        let parsed: AppConfig = serde_json::from_str(r#"{"field_rules": []}"#).unwrap();
        assert!(parsed.field_rules.is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = AppConfig {
            directus_url: Some("https://cms.example".to_string()),
            directus_token: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.directus_url, config.directus_url);
        assert_eq!(parsed.directus_token, config.directus_token);
        assert_eq!(parsed.field_rules, config.field_rules);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig {
            directus_url: Some("http://file".to_string()),
            ..Default::default()
        };
        config.apply_overrides(Some("http://env".to_string()), Some("tok".to_string()));
        assert_eq!(config.directus_url.as_deref(), Some("http://env"));
        assert_eq!(config.directus_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = AppConfig {
            directus_url: Some("http://file".to_string()),
            ..Default::default()
        };
        config.apply_overrides(Some("  ".to_string()), None);
        assert_eq!(config.directus_url.as_deref(), Some("http://file"));
    }

    #[test]
    fn test_require_url() {
        let mut config = AppConfig::default();
        assert!(config.require_url().is_err());
        config.directus_url = Some("http://cms".to_string());
        assert_eq!(config.require_url().unwrap(), "http://cms");
    }
}
