use crate::config::CartSettings;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STOREFRONT_API})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 轉換為執行期設定，未指定的欄位使用預設值
    pub fn to_settings(&self) -> CartSettings {
        let defaults = CartSettings::default();
        let storage = self.storage.as_ref();
        let logging = self.logging.as_ref();

        CartSettings {
            api_base_url: self.api.base_url.clone(),
            request_timeout_seconds: self
                .api
                .timeout_seconds
                .unwrap_or(defaults.request_timeout_seconds),
            storage_path: storage
                .and_then(|s| s.path.clone())
                .unwrap_or(defaults.storage_path),
            storage_key: storage
                .and_then(|s| s.key.clone())
                .unwrap_or(defaults.storage_key),
            log_json: logging.and_then(|l| l.json).unwrap_or(defaults.log_json),
            verbose: logging.and_then(|l| l.verbose).unwrap_or(defaults.verbose),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CART_STORAGE_KEY;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://shop.example.com/api"
timeout_seconds = 3

[storage]
path = "./cart-data"
key = "@Shop:cart"

[logging]
json = true
"#;

        let settings = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .to_settings();

        assert_eq!(settings.api_base_url, "https://shop.example.com/api");
        assert_eq!(settings.request_timeout_seconds, 3);
        assert_eq!(settings.storage_path, "./cart-data");
        assert_eq!(settings.storage_key, "@Shop:cart");
        assert!(settings.log_json);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[api]
base_url = "http://localhost:3333"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.to_settings();

        assert_eq!(settings.storage_key, CART_STORAGE_KEY);
        assert_eq!(
            settings.request_timeout_seconds,
            CartSettings::default().request_timeout_seconds
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STOREFRONT_CART_TEST_API", "https://test.api.com");

        let toml_content = r#"
[api]
base_url = "${STOREFRONT_CART_TEST_API}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://test.api.com");

        std::env::remove_var("STOREFRONT_CART_TEST_API");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[api]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_section_fails() {
        let result = TomlConfig::from_toml_str("[storage]\npath = \"./x\"\n");
        assert!(matches!(result, Err(CartError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://api.example.com"

[storage]
path = "./file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.to_settings().storage_path, "./file-test");
    }
}
