//! reqwest-backed implementation of [`CheckoutApi`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::config::ApiConfig;
use super::error::{ClientError, ErrorBody};
use super::CheckoutApi;
use crate::model::{
    ApprovePaymentRequest, ApprovePaymentResponse, CreateOrderRequest, Order, Product, ProductId,
};

/// HTTP client for the checkout REST API.
#[derive(Debug, Clone)]
pub struct HttpCheckoutApi {
    config: ApiConfig,
    http: Client,
}

impl HttpCheckoutApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            warn!(status = status.as_u16(), "API request failed");

            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => ClientError::Api {
                    status: status.as_u16(),
                    body,
                },
                Err(_) => ClientError::UnexpectedResponse(format!(
                    "request failed with status {status}: {text}"
                )),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CheckoutApi for HttpCheckoutApi {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.config.url("/products");
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        let url = self.config.url(&format!("/products/{id}"));
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ClientError> {
        let url = self.config.url("/orders");
        debug!(%url, "POST");
        let response = self.http.post(&url).json(request).send().await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn approve_payment(
        &self,
        request: &ApprovePaymentRequest,
    ) -> Result<ApprovePaymentResponse, ClientError> {
        let url = self.config.url("/payments/approve");
        debug!(%url, "POST");
        let response = self.http.post(&url).json(request).send().await?;
        Self::decode(response).await
    }
}
