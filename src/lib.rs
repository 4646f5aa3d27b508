//! Cartline
//!
//! Cartline keeps a storefront's slide-in cart panel and page-wide cart
//! indicators consistent with server-side cart state, serialising mutating
//! requests so at most one is in flight at a time.
//!
//! The platform's cart endpoints are reached through the [`gateway::CartGateway`]
//! trait (an HTTP implementation ships in [`gateway::http`]); the presentation,
//! notification and money-formatting collaborators are injected through the
//! [`surface::CartSurface`], [`notify::Notifier`] and [`money::FormatMoney`]
//! traits, so the controller itself stays headless and testable.

pub mod cart;
pub mod controller;
pub mod gateway;
pub mod money;
pub mod notify;
pub mod observer;
pub mod prelude;
pub mod render;
pub mod surface;
