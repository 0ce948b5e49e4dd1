use crate::domain::model::{Notification, Product, ProductId, StockRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Key-value string storage holding the serialized cart.
pub trait Storage: Send + Sync {
    fn read_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn write_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait StockService: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, product_id: ProductId) -> Result<Product>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
