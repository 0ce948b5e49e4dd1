use crate::config::toml_config::TomlConfig;
use crate::config::CartSettings;
use crate::core::ProductId;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront-cart")]
#[command(about = "Manage a storefront shopping cart with stock validation")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Storefront API base URL (serves /stock and /products)")]
    pub api_url: Option<String>,

    #[arg(long, help = "Directory holding the persisted cart")]
    pub storage_path: Option<String>,

    #[arg(long, help = "Key the cart is stored under")]
    pub storage_key: Option<String>,

    #[arg(long, help = "HTTP request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product line
    Remove { product_id: ProductId },
    /// Set the amount of a product already in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl CliConfig {
    /// 合併設定：預設值 < TOML 檔案 < 命令列參數
    pub fn resolve(&self) -> Result<CartSettings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.to_settings(),
            None => CartSettings::default(),
        };

        if let Some(api_url) = &self.api_url {
            settings.api_base_url = api_url.clone();
        }
        if let Some(storage_path) = &self.storage_path {
            settings.storage_path = storage_path.clone();
        }
        if let Some(storage_key) = &self.storage_key {
            settings.storage_key = storage_key.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.request_timeout_seconds = timeout;
        }
        settings.verbose |= self.verbose;
        settings.log_json |= self.log_json;

        Ok(settings)
    }
}
