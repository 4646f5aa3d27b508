//! Panel surface.
//!
//! The presentation side of the drawer: a thin write-only interface the
//! controller pushes state into. Implementations own the actual markup,
//! transitions and focus handling; in particular, hiding the panel may keep
//! it in layout until a hide transition finishes, so a rapid re-show during
//! the fade simply re-shows it.

/// Presentation collaborator for the cart panel and page-wide indicators.
pub trait CartSurface: Send + Sync {
    /// Replace the item-list region with the given markup (either the
    /// rendered lines or the empty-state view).
    fn render_items(&self, markup: &str);

    /// Update every cart-count indicator on the page.
    fn set_item_count(&self, count: u32);

    /// Update the subtotal text.
    fn set_subtotal(&self, text: &str);

    /// Enable or disable the checkout action.
    fn set_checkout_enabled(&self, enabled: bool);

    /// Show or hide the panel, including any transition.
    fn set_visible(&self, visible: bool);

    /// Suppress or restore page scrolling behind the panel.
    fn set_scroll_locked(&self, locked: bool);

    /// Move focus to the panel's close control.
    fn focus_close(&self);
}

impl<T: CartSurface + ?Sized> CartSurface for std::sync::Arc<T> {
    fn render_items(&self, markup: &str) {
        (**self).render_items(markup);
    }

    fn set_item_count(&self, count: u32) {
        (**self).set_item_count(count);
    }

    fn set_subtotal(&self, text: &str) {
        (**self).set_subtotal(text);
    }

    fn set_checkout_enabled(&self, enabled: bool) {
        (**self).set_checkout_enabled(enabled);
    }

    fn set_visible(&self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn set_scroll_locked(&self, locked: bool) {
        (**self).set_scroll_locked(locked);
    }

    fn focus_close(&self) {
        (**self).focus_close();
    }
}

/// Surface that renders nowhere. Useful headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl CartSurface for NullSurface {
    fn render_items(&self, _markup: &str) {}

    fn set_item_count(&self, _count: u32) {}

    fn set_subtotal(&self, _text: &str) {}

    fn set_checkout_enabled(&self, _enabled: bool) {}

    fn set_visible(&self, _visible: bool) {}

    fn set_scroll_locked(&self, _locked: bool) {}

    fn focus_close(&self) {}
}
