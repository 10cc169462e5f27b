//! # Inventory Client
//!
//! The only component that talks to the remote inventory service.
//!
//! [`InventoryApi`] is the seam the loader and the detail controller depend
//! on; [`HttpInventoryClient`] is the reqwest implementation and
//! [`MockInventory`](crate::clients::mock::MockInventory) the test double.
//! Each operation is a single round trip. Amounts are relayed as given: the
//! server alone decides whether they are valid.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::clients::InventoryError;
use crate::lifecycle::InventoryConfig;
use crate::model::{Envelope, FailureBody, Product, ProductCreate, ProductUpdate, QuantityUpdate};

/// Operations offered by the inventory service.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Fetch every product identifier.
    async fn list_identifiers(&self) -> Result<Vec<String>, InventoryError>;

    /// Fetch a single product.
    async fn get_by_id(&self, identifier: &str) -> Result<Product, InventoryError>;

    /// Add `amount` units; returns the server's resulting quantity.
    async fn increase_quantity(
        &self,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError>;

    /// Remove `amount` units; returns the server's resulting quantity.
    async fn decrease_quantity(
        &self,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError>;

    /// Register a new product (starts at zero stock).
    async fn create_product(&self, params: ProductCreate) -> Result<Product, InventoryError>;

    /// Change a product's name and/or description.
    async fn update_product(&self, params: ProductUpdate) -> Result<Product, InventoryError>;
}

/// reqwest-backed [`InventoryApi`].
#[derive(Clone)]
pub struct HttpInventoryClient {
    http: Client,
    config: InventoryConfig,
}

impl HttpInventoryClient {
    pub fn new(config: InventoryConfig) -> Result<Self, InventoryError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| InventoryError::InvalidConfig(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Sends the request and decodes a 2xx body as `T`.
    ///
    /// Non-2xx responses become [`InventoryError::Application`] when the body
    /// parses as `{"information": ...}`, otherwise [`InventoryError::Server`].
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, InventoryError> {
        let response = request
            .send()
            .await
            .map_err(|e| InventoryError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| InventoryError::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| InventoryError::Decode(e.to_string()));
        }

        let error = match serde_json::from_slice::<FailureBody>(&body) {
            Ok(failure) => InventoryError::Application {
                status: status.as_u16(),
                information: failure.information,
            },
            Err(_) => InventoryError::Server {
                status: status.as_u16(),
            },
        };
        warn!(status = status.as_u16(), error = %error, "Request failed");
        Err(error)
    }

    async fn change_quantity(
        &self,
        path: &str,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "Sending request");
        let request = self.http.put(url).query(&[
            ("identifier", identifier.to_string()),
            ("quantity", amount.to_string()),
        ]);
        let envelope: Envelope<QuantityUpdate> = self.send(request).await?;
        Ok(envelope.object)
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryClient {
    #[instrument(skip(self))]
    async fn list_identifiers(&self) -> Result<Vec<String>, InventoryError> {
        let url = self.config.endpoint(&self.config.get_products_path)?;
        debug!(%url, "Sending request");
        self.send(self.http.get(url)).await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, identifier: &str) -> Result<Product, InventoryError> {
        let url = self.config.endpoint(&self.config.get_product_by_id_path)?;
        debug!(%url, "Sending request");
        self.send(self.http.get(url).query(&[("identifier", identifier)]))
            .await
    }

    #[instrument(skip(self))]
    async fn increase_quantity(
        &self,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError> {
        self.change_quantity(&self.config.increase_path, identifier, amount)
            .await
    }

    #[instrument(skip(self))]
    async fn decrease_quantity(
        &self,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError> {
        self.change_quantity(&self.config.decrease_path, identifier, amount)
            .await
    }

    #[instrument(skip(self))]
    async fn create_product(&self, params: ProductCreate) -> Result<Product, InventoryError> {
        let url = self.config.endpoint(&self.config.create_path)?;
        debug!(%url, "Sending request");
        let envelope: Envelope<Product> = self.send(self.http.post(url).json(&params)).await?;
        Ok(envelope.object)
    }

    #[instrument(skip(self))]
    async fn update_product(&self, params: ProductUpdate) -> Result<Product, InventoryError> {
        let url = self.config.endpoint(&self.config.update_path)?;
        debug!(%url, "Sending request");
        let envelope: Envelope<Product> = self.send(self.http.put(url).json(&params)).await?;
        Ok(envelope.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Rejection;
    use mockito::{Matcher, Server};

    fn build_client(server: &Server) -> HttpInventoryClient {
        HttpInventoryClient::new(InventoryConfig::with_host(server.url())).unwrap()
    }

    #[tokio::test]
    async fn test_list_identifiers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/product/getAllIdentifiers")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"["a","b"]"#)
            .create_async()
            .await;

        let ids = build_client(&server).list_identifiers().await.unwrap();

        mock.assert_async().await;
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_get_by_id_sends_identifier_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/product/getByID")
            .match_query(Matcher::UrlEncoded("identifier".into(), "a".into()))
            .with_status(200)
            .with_body(r#"{"identifier":"a","name":"Widget","description":"","quantity":200}"#)
            .create_async()
            .await;

        let product = build_client(&server).get_by_id("a").await.unwrap();

        mock.assert_async().await;
        assert_eq!(product, Product::new("a", "Widget", "", 200));
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_is_application_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/product/getByID")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"success":false,"information":"Product not found"}"#)
            .create_async()
            .await;

        let err = build_client(&server).get_by_id("ghost").await.unwrap_err();
        assert_eq!(
            err,
            InventoryError::Application {
                status: 400,
                information: "Product not found".into()
            }
        );
        assert_eq!(err.rejection(), Some(Rejection::NotFound));
    }

    #[tokio::test]
    async fn test_increase_returns_server_quantity() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/product/increaseQuantity")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("identifier".into(), "a".into()),
                Matcher::UrlEncoded("quantity".into(), "5".into()),
            ]))
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"success":true,"information":"Quantity updated","object":{"identifier":"a","name":"Widget","description":"","quantity":205}}"#)
            .create_async()
            .await;

        let update = build_client(&server).increase_quantity("a", 5).await.unwrap();

        mock.assert_async().await;
        assert_eq!(update.quantity, 205);
    }

    #[tokio::test]
    async fn test_decrease_relays_negative_amount_unvalidated() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/product/decreaseQuantity")
            .match_query(Matcher::UrlEncoded("quantity".into(), "-3".into()))
            .with_status(400)
            .with_body(r#"{"success":false,"information":"The number must be positive"}"#)
            .create_async()
            .await;

        let err = build_client(&server)
            .decrease_quantity("a", -3)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.user_message(), "The number must be positive");
    }

    #[tokio::test]
    async fn test_unstructured_failure_is_server_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/product/getAllIdentifiers")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let err = build_client(&server).list_identifiers().await.unwrap_err();
        assert_eq!(err, InventoryError::Server { status: 502 });
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/product/getAllIdentifiers")
            .with_status(200)
            .with_body(r#"{"not":"a list"}"#)
            .create_async()
            .await;

        let err = build_client(&server).list_identifiers().await.unwrap_err();
        assert!(matches!(err, InventoryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) is not expected to be listening on loopback.
        let client =
            HttpInventoryClient::new(InventoryConfig::with_host("http://127.0.0.1:9/")).unwrap();
        let err = client.list_identifiers().await.unwrap_err();
        assert!(matches!(err, InventoryError::Network(_)));
    }

    #[tokio::test]
    async fn test_create_and_update_send_json_bodies() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/product/create")
            .match_body(Matcher::Json(serde_json::json!({"name": "Widget", "description": "Blue"})))
            .with_status(200)
            .with_body(r#"{"success":true,"information":"Success creating the product","object":{"identifier":"new-1","name":"Widget","description":"Blue","quantity":0}}"#)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/product/updateProduct")
            .match_body(Matcher::Json(serde_json::json!({"identifier": "new-1", "description": "Red"})))
            .with_status(200)
            .with_body(r#"{"success":true,"information":"Product updated","object":{"identifier":"new-1","name":"Widget","description":"Red","quantity":0}}"#)
            .create_async()
            .await;

        let client = build_client(&server);
        let created = client
            .create_product(ProductCreate {
                name: "Widget".into(),
                description: "Blue".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.identifier, "new-1");
        assert_eq!(created.quantity, 0);

        let updated = client
            .update_product(ProductUpdate {
                identifier: "new-1".into(),
                name: None,
                description: Some("Red".into()),
            })
            .await
            .unwrap();
        assert_eq!(updated.description, "Red");

        create.assert_async().await;
        update.assert_async().await;
    }
}
