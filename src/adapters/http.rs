use crate::domain::model::{Product, ProductId, StockRecord};
use crate::domain::ports::{ConfigProvider, ProductCatalog, StockService};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Storefront REST API: `GET /stock/{id}` and `GET /products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: Url,
    client: Client,
}

impl HttpStorefrontApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join 需要結尾斜線，否則會覆蓋最後一段路徑
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.json::<T>().await?;
        Ok(body)
    }
}

#[async_trait]
impl StockService for HttpStorefrontApi {
    async fn stock(&self, product_id: ProductId) -> Result<StockRecord> {
        let mut record: StockRecord = self.get_json(&format!("stock/{}", product_id)).await?;
        record.id = product_id;
        Ok(record)
    }
}

#[async_trait]
impl ProductCatalog for HttpStorefrontApi {
    async fn product(&self, product_id: ProductId) -> Result<Product> {
        self.get_json(&format!("products/{}", product_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CartError;
    use httpmock::prelude::*;

    fn api_for(server: &MockServer) -> HttpStorefrontApi {
        HttpStorefrontApi::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_stock_successful_response() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/3");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 3, "amount": 7}));
        });

        let record = api_for(&server).stock(3).await.unwrap();

        stock_mock.assert();
        assert_eq!(record, StockRecord { id: 3, amount: 7 });
    }

    #[tokio::test]
    async fn test_stock_without_id_field_uses_requested_id() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/9");
            then.status(200).json_body(serde_json::json!({"amount": 2}));
        });

        let record = api_for(&server).stock(9).await.unwrap();

        assert_eq!(record.id, 9);
        assert_eq!(record.amount, 2);
    }

    #[tokio::test]
    async fn test_product_keeps_metadata() {
        let server = MockServer::start();
        let product_mock = server.mock(|when, then| {
            when.method(GET).path("/products/1");
            then.status(200).json_body(serde_json::json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://example.com/tenis1.jpg"
            }));
        });

        let product = api_for(&server).product(1).await.unwrap();

        product_mock.assert();
        assert_eq!(product.id, 1);
        assert_eq!(product.details["price"], serde_json::json!(179.9));
        assert!(product.details.contains_key("image"));
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/api/stock/1");
            then.status(200).json_body(serde_json::json!({"id": 1, "amount": 1}));
        });

        let api = HttpStorefrontApi::new(&server.url("/api"), Duration::from_secs(5)).unwrap();
        api.stock(1).await.unwrap();

        stock_mock.assert();
    }

    #[tokio::test]
    async fn test_not_found_status_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/products/404");
            then.status(404);
        });

        let result = api_for(&server).product(404).await;

        assert!(matches!(result, Err(CartError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/5");
            then.status(200).body("not json");
        });

        let result = api_for(&server).stock(5).await;

        assert!(matches!(result, Err(CartError::ApiError(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpStorefrontApi::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(CartError::UrlError(_))));
    }
}
