//! Client configuration
//!
//! Values come from the environment (binaries load `.env` through dotenvy first),
//! CLI flags override them.

use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "assets/skull.svg";
pub const DEFAULT_PHOTO: &str = "assets/photo.svg";

/// Image references used when an entry has no photo of its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    /// Shown in slots and the detail view for entries without a photo, and dimmed in empty slots
    pub placeholder_image: String,
    /// Shown in the edit form preview when no photo is set
    pub default_photo: String,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            default_photo: DEFAULT_PHOTO.to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub assets: Assets,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            assets: Assets::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API base URL
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("OFRENDA_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("OFRENDA_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: "OFRENDA_TIMEOUT_SECS",
                    expected: "a positive whole number of seconds",
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(image) = lookup("OFRENDA_PLACEHOLDER_IMAGE").filter(|v| !v.is_empty()) {
            config.assets.placeholder_image = image;
        }
        if let Some(photo) = lookup("OFRENDA_DEFAULT_PHOTO").filter(|v| !v.is_empty()) {
            config.assets.default_photo = photo;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.assets.placeholder_image, "assets/skull.svg");
        assert_eq!(config.assets.default_photo, "assets/photo.svg");
    }

    #[test]
    fn test_overrides_from_env() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("OFRENDA_API_URL", " http://altar.local:8080 "),
            ("OFRENDA_TIMEOUT_SECS", "5"),
            ("OFRENDA_PLACEHOLDER_IMAGE", "/img/calavera.svg"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://altar.local:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.assets.placeholder_image, "/img/calavera.svg");
        assert_eq!(config.assets.default_photo, DEFAULT_PHOTO);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("OFRENDA_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "OFRENDA_TIMEOUT_SECS must be a positive whole number of seconds, got 'soon'"
        );
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err =
            ClientConfig::from_lookup(lookup(&[("OFRENDA_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "OFRENDA_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
