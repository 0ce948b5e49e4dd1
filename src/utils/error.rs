use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Requested quantity out of stock: product {product_id}, requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("Product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Persisted cart is corrupt: {message}")]
    CorruptCart { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Stock,
    NotFound,
    Transport,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::OutOfStock { .. } => ErrorCategory::Stock,
            CartError::NotInCart { .. } => ErrorCategory::NotFound,
            CartError::ApiError(_) | CartError::UrlError(_) => ErrorCategory::Transport,
            CartError::IoError(_)
            | CartError::SerializationError(_)
            | CartError::CorruptCart { .. } => ErrorCategory::Storage,
            CartError::ConfigError { .. } | CartError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Stock => ErrorSeverity::Low,
            ErrorCategory::NotFound | ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 是否為庫存不足（使用者可自行調整數量的警告）
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::OutOfStock { .. } => "Requested quantity out of stock".to_string(),
            CartError::NotInCart { product_id } => {
                format!("Product {} is not in your cart", product_id)
            }
            CartError::ApiError(_) | CartError::UrlError(_) => {
                "Could not reach the storefront API".to_string()
            }
            CartError::IoError(_) => "Could not access the cart storage".to_string(),
            CartError::SerializationError(_) | CartError::CorruptCart { .. } => {
                "The saved cart could not be read".to_string()
            }
            CartError::ConfigError { .. } | CartError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Stock => "Choose a smaller quantity",
            ErrorCategory::NotFound => "Add the product to the cart first",
            ErrorCategory::Transport => "Check the API URL and network connection, then try again",
            ErrorCategory::Storage => "Check the storage directory, or remove the saved cart file",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
