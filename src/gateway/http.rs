//! HTTP client for the storefront cart endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, LineItem, NewLineItem};

use super::{CartGateway, GatewayError};

/// Configuration for reaching the storefront.
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    /// Origin the cart endpoints live under, e.g. `"https://shop.example.com"`.
    pub base_url: String,
}

/// HTTP client for the platform's fixed cart endpoint set.
#[derive(Debug, Clone)]
pub struct HttpCartGateway {
    config: StorefrontConfig,
    http: Client,
}

impl HttpCartGateway {
    /// Create a new gateway from the given configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChangeRequest<'a> {
    id: &'a str,
    quantity: u32,
}

/// Error payload shape the platform uses for cart rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    description: Option<String>,
}

/// Classify a non-2xx response body: [`GatewayError::Rejected`] when it
/// carries a displayable message (`message` wins over `description`),
/// [`GatewayError::Transport`] otherwise.
fn classify(status: StatusCode, body: &str) -> GatewayError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = body.message.or(body.description) {
            return GatewayError::Rejected { message };
        }
    }

    GatewayError::Transport(format!("request failed with status {status}"))
}

async fn check(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    Err(classify(status, &text))
}

/// Form fields for the add endpoint: `id`, `quantity`, then one
/// `properties[key]` field per custom property, in insertion order.
fn add_item_form(item: &NewLineItem) -> Vec<(String, String)> {
    let mut form = Vec::with_capacity(2 + item.properties.len());

    form.push(("id".to_owned(), item.variant_id.clone()));
    form.push(("quantity".to_owned(), item.quantity.to_string()));

    for (key, value) in &item.properties {
        form.push((format!("properties[{key}]"), value.clone()));
    }

    form
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn fetch_cart(&self) -> Result<Cart, GatewayError> {
        let response = self.http.get(self.url("/cart.js")).send().await?;
        let cart = check(response).await?.json::<Cart>().await?;

        Ok(cart)
    }

    async fn add_item(&self, item: NewLineItem) -> Result<LineItem, GatewayError> {
        let response = self
            .http
            .post(self.url("/cart/add.js"))
            .form(&add_item_form(&item))
            .send()
            .await?;

        let line = check(response).await?.json::<LineItem>().await?;

        Ok(line)
    }

    async fn change_quantity(&self, line_id: &str, quantity: u32) -> Result<Cart, GatewayError> {
        let response = self
            .http
            .post(self.url("/cart/change.js"))
            .json(&ChangeRequest {
                id: line_id,
                quantity,
            })
            .send()
            .await?;

        let cart = check(response).await?.json::<Cart>().await?;

        Ok(cart)
    }

    async fn clear_cart(&self) -> Result<(), GatewayError> {
        let response = self.http.post(self.url("/cart/clear.js")).send().await?;

        check(response).await?;

        Ok(())
    }
}
