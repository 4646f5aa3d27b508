//! Cart Service gateway.
//!
//! The [`CartGateway`] trait is the seam between the controller and the
//! platform's cart endpoints. Production code uses the HTTP implementation
//! in [`http`]; tests substitute mocks or scripted fakes.

pub mod errors;
pub mod http;

use async_trait::async_trait;
use mockall::automock;

use crate::cart::{Cart, LineItem, NewLineItem};

pub use errors::GatewayError;

/// Client-side contract of the platform cart endpoints.
///
/// All operations are idempotent from the client's perspective; the server
/// owns the cart and every mutation is followed by a full re-fetch rather
/// than trusting the mutation response.
#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Retrieve the current cart.
    async fn fetch_cart(&self) -> Result<Cart, GatewayError>;

    /// Add a variant to the cart, returning the created line item.
    async fn add_item(&self, item: NewLineItem) -> Result<LineItem, GatewayError>;

    /// Set the quantity of an existing line. Quantity zero removes the line.
    async fn change_quantity(&self, line_id: &str, quantity: u32) -> Result<Cart, GatewayError>;

    /// Remove every line from the cart.
    async fn clear_cart(&self) -> Result<(), GatewayError>;
}

#[async_trait]
impl<T: CartGateway + ?Sized> CartGateway for std::sync::Arc<T> {
    async fn fetch_cart(&self) -> Result<Cart, GatewayError> {
        (**self).fetch_cart().await
    }

    async fn add_item(&self, item: NewLineItem) -> Result<LineItem, GatewayError> {
        (**self).add_item(item).await
    }

    async fn change_quantity(&self, line_id: &str, quantity: u32) -> Result<Cart, GatewayError> {
        (**self).change_quantity(line_id, quantity).await
    }

    async fn clear_cart(&self) -> Result<(), GatewayError> {
        (**self).clear_cart().await
    }
}
