//! Cart synchronization controller.
//!
//! One controller instance lives for the page's lifetime. It owns the
//! open/closed state of the slide-in panel and keeps the panel plus every
//! cart-count indicator consistent with server cart state, serialising
//! mutating requests so at most one is in flight at a time.
//!
//! Mutual exclusion covers mutations only: a quantity change or add that
//! arrives while another is in flight is rejected immediately, never queued.
//! Refreshes carry no exclusion and are last-write-wins; the server is the
//! sole source of truth and any staleness window closes on the next
//! user-triggered refresh. `open`/`close` are pure visibility toggles and
//! are never blocked by an in-flight request.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use arc_swap::ArcSwap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, LineItem, NewLineItem},
    gateway::{CartGateway, GatewayError},
    money::{CurrencyFormatter, FormatMoney},
    notify::{NoopNotifier, NoticeKind, Notifier},
    observer::{CartObserver, NoopObserver},
    render,
    surface::{CartSurface, NullSurface},
};

/// Errors returned to `add_item` callers.
///
/// Adds are invoked by separate page controllers (e.g. a product page's
/// submit flow) that are mid-way through their own feedback, so unlike
/// quantity changes the failure is propagated as well as notified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddToCartError {
    /// Another mutating request is in flight; the add was not sent.
    #[error("another cart request is in flight")]
    Busy,

    /// The add request itself failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Cart drawer controller. See the module docs for the concurrency model.
pub struct CartController<G> {
    gateway: G,
    surface: ArcSwap<Box<dyn CartSurface>>,
    notifier: Box<dyn Notifier>,
    observer: Box<dyn CartObserver>,
    money: Box<dyn FormatMoney>,
    open: AtomicBool,
    busy: AtomicBool,
}

impl<G> fmt::Debug for CartController<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartController")
            .field("open", &self.is_open())
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

/// Builder for [`CartController`]. Collaborators default to no-ops so a
/// headless controller needs nothing but a gateway.
pub struct CartControllerBuilder<G> {
    gateway: G,
    surface: Box<dyn CartSurface>,
    notifier: Box<dyn Notifier>,
    observer: Box<dyn CartObserver>,
    money: Box<dyn FormatMoney>,
}

impl<G> fmt::Debug for CartControllerBuilder<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartControllerBuilder").finish_non_exhaustive()
    }
}

impl<G: CartGateway> CartControllerBuilder<G> {
    fn new(gateway: G) -> Self {
        Self {
            gateway,
            surface: Box::new(NullSurface),
            notifier: Box::new(NoopNotifier),
            observer: Box::new(NoopObserver),
            money: Box::new(CurrencyFormatter::default()),
        }
    }

    /// Bind the presentation surface.
    #[must_use]
    pub fn surface(mut self, surface: impl CartSurface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// Bind the notification collaborator.
    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Bind the cart observer.
    #[must_use]
    pub fn observer(mut self, observer: impl CartObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Override the money formatter (per storefront locale).
    #[must_use]
    pub fn money(mut self, money: impl FormatMoney + 'static) -> Self {
        self.money = Box::new(money);
        self
    }

    /// Build the controller. The panel starts closed and idle.
    #[must_use]
    pub fn build(self) -> CartController<G> {
        CartController {
            gateway: self.gateway,
            surface: ArcSwap::from_pointee(self.surface),
            notifier: self.notifier,
            observer: self.observer,
            money: self.money,
            open: AtomicBool::new(false),
            busy: AtomicBool::new(false),
        }
    }
}

/// Clears the busy flag when dropped, so a mutation releases its exclusion
/// on every exit path.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<G> CartController<G> {
    /// Whether the panel is currently open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Whether a mutating request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Close the panel. Idempotent; a no-op when already closed.
    ///
    /// The surface owns the hide transition, so a rapid re-open during the
    /// fade is safe and simply re-shows the panel. An in-flight mutation is
    /// not cancelled by closing; it only hides the panel.
    pub fn close(&self) {
        if !self.open.swap(false, Ordering::AcqRel) {
            return;
        }

        let surface = self.surface.load();
        surface.set_scroll_locked(false);
        surface.set_visible(false);
    }

    /// Replace the bound surface after the host platform swaps out the
    /// section's markup, instead of rebuilding the whole controller and
    /// leaking the old instance's listeners.
    ///
    /// Current visibility state is pushed to the new surface immediately.
    pub fn rebind(&self, surface: impl CartSurface + 'static) {
        let surface: Box<dyn CartSurface> = Box::new(surface);
        self.surface.store(Arc::new(surface));

        let open = self.is_open();
        let surface = self.surface.load();
        surface.set_visible(open);
        surface.set_scroll_locked(open);
    }

    /// Acquire the mutation exclusion, or `None` when a mutation is already
    /// in flight.
    fn try_busy(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: &self.busy })
    }

    fn apply(&self, cart: &Cart) {
        let markup = render::cart_markup(cart, self.money.as_ref());

        {
            let surface = self.surface.load();
            surface.set_item_count(cart.item_count);
            surface.set_subtotal(&self.money.format(cart.total_price));
            surface.render_items(&markup);
            surface.set_checkout_enabled(cart.item_count > 0);
        }

        self.observer.cart_updated(cart.item_count);
    }
}

impl<G: CartGateway> CartController<G> {
    /// Start building a controller over the given gateway.
    pub fn builder(gateway: G) -> CartControllerBuilder<G> {
        CartControllerBuilder::new(gateway)
    }

    /// Open the panel. Idempotent; a no-op when already open.
    ///
    /// Locks page scroll, shows the panel, moves focus to the close control
    /// and then reconciles with the server via [`refresh`](Self::refresh).
    /// Never fails; refresh errors are handled internally.
    pub async fn open(&self) {
        if self.open.swap(true, Ordering::AcqRel) {
            return;
        }

        {
            let surface = self.surface.load();
            surface.set_scroll_locked(true);
            surface.set_visible(true);
            surface.focus_close();
        }

        self.refresh().await;
    }

    /// Reconcile displayed state with the server cart.
    ///
    /// On success, updates the count indicators, subtotal, item list (or
    /// empty-state view) and checkout enablement, and notifies the observer.
    /// On any gateway error the previously rendered state is left untouched
    /// and nothing is raised: refresh is best-effort reconciliation, the
    /// server stays authoritative, and the next user action re-triggers it.
    pub async fn refresh(&self) {
        match self.gateway.fetch_cart().await {
            Ok(cart) => self.apply(&cart),
            Err(error) => warn!("cart refresh failed, keeping last rendered state: {error}"),
        }
    }

    /// Set the quantity of an existing line. Negative quantities are clamped
    /// to zero, which removes the line.
    ///
    /// Dropped when another mutation is in flight: the user gets a transient
    /// "please wait" notice and nothing is queued. On success the full cart
    /// is re-fetched rather than trusting the mutation response.
    pub async fn set_quantity(&self, line_id: &str, quantity: i64) {
        let Some(_busy) = self.try_busy() else {
            debug!("dropping quantity change for line {line_id}: request already in flight");
            self.notifier.notify(NoticeKind::Info, "Please wait");
            return;
        };

        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        match self.gateway.change_quantity(line_id, clamped).await {
            Ok(_) => {
                self.refresh().await;
                self.notifier.notify(NoticeKind::Success, "Cart updated");
            }
            Err(error) => {
                warn!("quantity change for line {line_id} failed: {error}");
                self.notifier.notify(NoticeKind::Error, "Failed to update cart");
            }
        }
    }

    /// Remove a line from the cart. Equivalent to setting its quantity to
    /// zero.
    pub async fn remove_item(&self, line_id: &str) {
        self.set_quantity(line_id, 0).await;
    }

    /// Add a variant to the cart.
    ///
    /// On success: re-fetches the cart, fires a success notice, opens the
    /// panel and reports the created line to the observer. On failure the
    /// error notice uses the server-provided message when one exists, and
    /// the failure is also returned so the caller can react.
    ///
    /// # Errors
    ///
    /// [`AddToCartError::Busy`] when another mutation is in flight (the add
    /// was never sent), or the underlying [`GatewayError`].
    pub async fn add_item(
        &self,
        variant_id: &str,
        quantity: u32,
        properties: &[(String, String)],
    ) -> Result<LineItem, AddToCartError> {
        let Some(_busy) = self.try_busy() else {
            debug!("rejecting add of variant {variant_id}: request already in flight");
            return Err(AddToCartError::Busy);
        };

        let item = NewLineItem {
            variant_id: variant_id.to_owned(),
            quantity,
            properties: properties.to_vec(),
        };

        match self.gateway.add_item(item).await {
            Ok(line) => {
                self.refresh().await;
                self.notifier.notify(NoticeKind::Success, "Added to cart");
                self.open().await;
                self.observer.item_added(&line);

                Ok(line)
            }
            Err(error) => {
                warn!("add of variant {variant_id} failed: {error}");

                let message = match &error {
                    GatewayError::Rejected { message } => message.as_str(),
                    GatewayError::Transport(_) | GatewayError::Malformed(_) => {
                        "Failed to add to cart"
                    }
                };
                self.notifier.notify(NoticeKind::Error, message);

                Err(error.into())
            }
        }
    }

    /// Remove every line from the cart, then re-fetch.
    ///
    /// Busy-guarded like [`set_quantity`](Self::set_quantity); dropped with
    /// a "please wait" notice when a mutation is already in flight.
    pub async fn clear(&self) {
        let Some(_busy) = self.try_busy() else {
            debug!("dropping cart clear: request already in flight");
            self.notifier.notify(NoticeKind::Info, "Please wait");
            return;
        };

        match self.gateway.clear_cart().await {
            Ok(()) => {
                self.refresh().await;
                self.notifier.notify(NoticeKind::Success, "Cart cleared");
            }
            Err(error) => {
                warn!("cart clear failed: {error}");
                self.notifier.notify(NoticeKind::Error, "Failed to update cart");
            }
        }
    }
}
