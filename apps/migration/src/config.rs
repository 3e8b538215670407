//! Migration configuration loaded from environment variables.

use std::env;

use studio_infra::ContentApiConfig;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything but `json` is compact.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("LOG_FORMAT") {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Migration configuration.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub api_host: String,
    pub token: Option<String>,
}

impl MigrationConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let dataset = var("SANITY_DATASET").unwrap_or_else(|| "production".to_string());
        if !dataset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid {
                name: "SANITY_DATASET",
                reason: format!("'{dataset}' may only contain letters, digits, '_' and '-'"),
            });
        }

        Ok(Self {
            project_id: var("SANITY_PROJECT_ID").unwrap_or_else(|| "76ahey7l".to_string()),
            dataset,
            api_version: var("SANITY_API_VERSION").unwrap_or_else(|| "2021-06-07".to_string()),
            api_host: var("SANITY_API_HOST").unwrap_or_else(|| "api.sanity.io".to_string()),
            token: var("SANITY_AUTH_TOKEN"),
        })
    }

    /// Data API settings. Writing requires a token.
    pub fn content_api(&self) -> Result<ContentApiConfig, ConfigError> {
        let token = self
            .token
            .clone()
            .ok_or(ConfigError::Missing("SANITY_AUTH_TOKEN"))?;

        Ok(ContentApiConfig {
            project_id: self.project_id.clone(),
            dataset: self.dataset.clone(),
            api_version: self.api_version.clone(),
            api_host: self.api_host.clone(),
            token: Some(token),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<MigrationConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MigrationConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.project_id, "76ahey7l");
        assert_eq!(config.dataset, "production");
        assert_eq!(config.api_version, "2021-06-07");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SANITY_PROJECT_ID", "p1"),
            ("SANITY_DATASET", "staging"),
            ("SANITY_AUTH_TOKEN", "secret"),
        ])
        .unwrap();

        assert_eq!(config.project_id, "p1");
        assert_eq!(config.dataset, "staging");

        let api = config.content_api().unwrap();
        assert_eq!(api.token.as_deref(), Some("secret"));
        assert_eq!(
            api.mutate_url(),
            "https://p1.api.sanity.io/v2021-06-07/data/mutate/staging?returnIds=true"
        );
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = load(&[("SANITY_DATASET", " "), ("SANITY_AUTH_TOKEN", "")]).unwrap();
        assert_eq!(config.dataset, "production");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_token_required_for_writes() {
        let err = load(&[]).unwrap().content_api().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SANITY_AUTH_TOKEN")));
    }

    #[test]
    fn test_log_format() {
        let json = |v: &'static str| move |name: &str| (name == "LOG_FORMAT").then(|| v.to_string());
        assert_eq!(LogFormat::from_lookup(json("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::from_lookup(json("pretty")), LogFormat::Compact);
        assert_eq!(LogFormat::from_lookup(|_| None), LogFormat::Compact);
    }

    #[test]
    fn test_invalid_dataset() {
        let err = load(&[("SANITY_DATASET", "prod/../x")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SANITY_DATASET", .. }));
    }
}
