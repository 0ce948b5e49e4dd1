#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CartCommand, CliConfig};

use crate::core::{ConfigProvider, CART_STORAGE_KEY};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use std::time::Duration;

/// Resolved runtime settings, assembled from defaults, a TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSettings {
    pub api_base_url: String,
    pub storage_path: String,
    pub storage_key: String,
    pub request_timeout_seconds: u64,
    pub log_json: bool,
    pub verbose: bool,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            storage_path: "./.cart".to_string(),
            storage_key: CART_STORAGE_KEY.to_string(),
            request_timeout_seconds: 10,
            log_json: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CartSettings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Validate for CartSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api_base_url)?;
        validate_range("api.timeout_seconds", self.request_timeout_seconds, 1, 300)?;
        validate_path("storage.path", &self.storage_path)?;
        validate_non_empty_string("storage.key", &self.storage_key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = CartSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = CartSettings {
            request_timeout_seconds: 0,
            ..CartSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
