//! Cart observations.
//!
//! Callbacks fired at key points of the cart lifecycle, letting unrelated
//! page components (count badges, analytics) react without depending on the
//! controller directly. All callbacks default to no-ops so an observer
//! implements only what it cares about.

use crate::cart::LineItem;

/// Observer of cart state changes.
pub trait CartObserver: Send + Sync {
    /// Called after every successful refresh with the new total unit count.
    fn cart_updated(&self, item_count: u32) {
        let _ = item_count;
    }

    /// Called when an add succeeds, with the created line item's identifying
    /// fields and price. This is the hook analytics integrations attach to.
    fn item_added(&self, line: &LineItem) {
        let _ = line;
    }
}

impl<T: CartObserver + ?Sized> CartObserver for std::sync::Arc<T> {
    fn cart_updated(&self, item_count: u32) {
        (**self).cart_updated(item_count);
    }

    fn item_added(&self, line: &LineItem) {
        (**self).item_added(line);
    }
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {}
