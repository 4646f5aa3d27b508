//! Cartline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, LineItem, NewLineItem},
    controller::{AddToCartError, CartController, CartControllerBuilder},
    gateway::{
        CartGateway, GatewayError,
        http::{HttpCartGateway, StorefrontConfig},
    },
    money::{CurrencyFormatter, FormatMoney},
    notify::{NoopNotifier, NoticeKind, Notifier},
    observer::{CartObserver, NoopObserver},
    surface::{CartSurface, NullSurface},
};
