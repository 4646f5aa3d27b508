//! Integration suite for the cart drawer controller.
//!
//! Drives the controller against a scripted in-memory gateway and recording
//! collaborators, covering the drawer's observable guarantees: idempotent
//! open/close, single-in-flight mutations, quantity clamping, the
//! count/empty-state invariant, lenient refresh degradation, and the full
//! add-to-cart flow.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use testresult::TestResult;
use tokio::sync::Notify;

use cartline::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SurfaceCall {
    RenderItems(String),
    ItemCount(u32),
    Subtotal(String),
    CheckoutEnabled(bool),
    Visible(bool),
    ScrollLocked(bool),
    FocusClose,
}

#[derive(Default)]
struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().expect("surface lock").clone()
    }

    fn push(&self, call: SurfaceCall) {
        self.calls.lock().expect("surface lock").push(call);
    }

    fn occurrences(&self, call: &SurfaceCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn rendered(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::RenderItems(markup) => Some(markup),
                _ => None,
            })
            .collect()
    }
}

impl CartSurface for RecordingSurface {
    fn render_items(&self, markup: &str) {
        self.push(SurfaceCall::RenderItems(markup.to_owned()));
    }

    fn set_item_count(&self, count: u32) {
        self.push(SurfaceCall::ItemCount(count));
    }

    fn set_subtotal(&self, text: &str) {
        self.push(SurfaceCall::Subtotal(text.to_owned()));
    }

    fn set_checkout_enabled(&self, enabled: bool) {
        self.push(SurfaceCall::CheckoutEnabled(enabled));
    }

    fn set_visible(&self, visible: bool) {
        self.push(SurfaceCall::Visible(visible));
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.push(SurfaceCall::ScrollLocked(locked));
    }

    fn focus_close(&self) {
        self.push(SurfaceCall::FocusClose);
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices
            .lock()
            .expect("notifier lock")
            .push((kind, message.to_owned()));
    }
}

#[derive(Default)]
struct RecordingObserver {
    updates: Mutex<Vec<u32>>,
    added: Mutex<Vec<LineItem>>,
}

impl CartObserver for RecordingObserver {
    fn cart_updated(&self, item_count: u32) {
        self.updates.lock().expect("observer lock").push(item_count);
    }

    fn item_added(&self, line: &LineItem) {
        self.added.lock().expect("observer lock").push(line.clone());
    }
}

/// In-memory stand-in for the cart endpoints. Holds the cart snapshot every
/// fetch returns, counts calls, and can stall quantity changes behind a
/// [`Notify`] gate or fail fetches on demand.
struct ScriptedGateway {
    cart: Mutex<Cart>,
    added_line: Mutex<Option<LineItem>>,
    fail_fetch: AtomicBool,
    hold_changes: AtomicBool,
    release: Notify,
    fetch_calls: AtomicUsize,
    change_calls: AtomicUsize,
    add_calls: AtomicUsize,
    clear_calls: AtomicUsize,
    last_change: Mutex<Option<(String, u32)>>,
}

impl ScriptedGateway {
    fn new(cart: Cart) -> Self {
        Self {
            cart: Mutex::new(cart),
            added_line: Mutex::new(None),
            fail_fetch: AtomicBool::new(false),
            hold_changes: AtomicBool::new(false),
            release: Notify::new(),
            fetch_calls: AtomicUsize::new(0),
            change_calls: AtomicUsize::new(0),
            add_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
            last_change: Mutex::new(None),
        }
    }

    fn snapshot(&self) -> Cart {
        self.cart.lock().expect("gateway lock").clone()
    }

    fn set_cart(&self, cart: Cart) {
        *self.cart.lock().expect("gateway lock") = cart;
    }

    fn set_added_line(&self, line: LineItem) {
        *self.added_line.lock().expect("gateway lock") = Some(line);
    }

    fn last_change(&self) -> Option<(String, u32)> {
        self.last_change.lock().expect("gateway lock").clone()
    }
}

#[async_trait]
impl CartGateway for ScriptedGateway {
    async fn fetch_cart(&self) -> Result<Cart, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport(
                "request failed with status 500 Internal Server Error".to_owned(),
            ));
        }

        Ok(self.snapshot())
    }

    async fn add_item(&self, _item: NewLineItem) -> Result<LineItem, GatewayError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);

        self.added_line
            .lock()
            .expect("gateway lock")
            .clone()
            .ok_or_else(|| GatewayError::Rejected {
                message: "Sold out".to_owned(),
            })
    }

    async fn change_quantity(&self, line_id: &str, quantity: u32) -> Result<Cart, GatewayError> {
        self.change_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_change.lock().expect("gateway lock") = Some((line_id.to_owned(), quantity));

        if self.hold_changes.load(Ordering::SeqCst) {
            self.release.notified().await;
        }

        Ok(self.snapshot())
    }

    async fn clear_cart(&self) -> Result<(), GatewayError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.set_cart(empty_cart());

        Ok(())
    }
}

fn empty_cart() -> Cart {
    Cart {
        item_count: 0,
        total_price: 0,
        items: vec![],
    }
}

fn tee_line() -> LineItem {
    LineItem {
        id: "line-1".to_owned(),
        product_id: "42".to_owned(),
        product_title: "Tee".to_owned(),
        variant_title: None,
        quantity: 2,
        price: 1000,
        final_line_price: 2000,
        original_line_price: 2000,
        image: None,
    }
}

fn tee_cart() -> Cart {
    Cart {
        item_count: 2,
        total_price: 2000,
        items: vec![tee_line()],
    }
}

#[tokio::test]
async fn open_twice_locks_scroll_once() {
    let surface = Arc::new(RecordingSurface::default());
    let controller = CartController::builder(ScriptedGateway::new(empty_cart()))
        .surface(Arc::clone(&surface))
        .build();

    controller.open().await;
    controller.open().await;

    assert!(controller.is_open());
    assert_eq!(surface.occurrences(&SurfaceCall::ScrollLocked(true)), 1);
    assert_eq!(surface.occurrences(&SurfaceCall::Visible(true)), 1);
    assert_eq!(surface.occurrences(&SurfaceCall::FocusClose), 1);
}

#[tokio::test]
async fn close_is_idempotent_and_needs_a_prior_open() {
    let surface = Arc::new(RecordingSurface::default());
    let controller = CartController::builder(ScriptedGateway::new(empty_cart()))
        .surface(Arc::clone(&surface))
        .build();

    // Closing a closed panel touches nothing.
    controller.close();
    assert_eq!(surface.calls(), vec![]);

    controller.open().await;
    controller.close();
    controller.close();

    assert!(!controller.is_open());
    assert_eq!(surface.occurrences(&SurfaceCall::ScrollLocked(false)), 1);
    assert_eq!(surface.occurrences(&SurfaceCall::Visible(false)), 1);
}

#[tokio::test]
async fn second_mutation_while_busy_is_dropped() -> TestResult {
    let gateway = Arc::new(ScriptedGateway::new(tee_cart()));
    gateway.hold_changes.store(true, Ordering::SeqCst);

    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Arc::new(
        CartController::builder(Arc::clone(&gateway))
            .notifier(Arc::clone(&notifier))
            .build(),
    );

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move {
            controller.set_quantity("line-1", 3).await;
        }
    });

    // Let the first mutation reach the in-flight await.
    while gateway.change_calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    assert!(controller.is_busy());

    // A second change while busy returns immediately without a request.
    controller.set_quantity("line-1", 4).await;
    assert_eq!(gateway.change_calls.load(Ordering::SeqCst), 1);
    assert!(
        notifier
            .notices()
            .contains(&(NoticeKind::Info, "Please wait".to_owned())),
        "dropped input should surface a wait affordance"
    );

    // An add while busy is rejected with a signal the caller can react to.
    let result = controller.add_item("variant-42", 1, &[]).await;
    assert_eq!(result, Err(AddToCartError::Busy));
    assert_eq!(gateway.add_calls.load(Ordering::SeqCst), 0);

    // A clear while busy is dropped the same way quantity changes are.
    controller.clear().await;
    assert_eq!(gateway.clear_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        notifier
            .notices()
            .iter()
            .filter(|notice| *notice == &(NoticeKind::Info, "Please wait".to_owned()))
            .count(),
        2,
        "both dropped inputs should surface a wait affordance"
    );

    gateway.release.notify_one();
    first.await?;

    assert_eq!(gateway.change_calls.load(Ordering::SeqCst), 1);
    assert!(!controller.is_busy());
    assert_eq!(gateway.last_change(), Some(("line-1".to_owned(), 3)));

    Ok(())
}

#[tokio::test]
async fn negative_quantity_is_sent_as_removal() {
    let gateway = Arc::new(ScriptedGateway::new(tee_cart()));
    let controller = CartController::builder(Arc::clone(&gateway)).build();

    controller.set_quantity("line-1", -5).await;

    assert_eq!(gateway.last_change(), Some(("line-1".to_owned(), 0)));
}

#[tokio::test]
async fn empty_cart_renders_empty_state_and_disables_checkout() {
    let surface = Arc::new(RecordingSurface::default());
    let controller = CartController::builder(ScriptedGateway::new(empty_cart()))
        .surface(Arc::clone(&surface))
        .build();

    controller.refresh().await;

    let rendered = surface.rendered();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].contains("cart-empty-state"), "markup: {}", rendered[0]);
    assert_eq!(surface.occurrences(&SurfaceCall::ItemCount(0)), 1);
    assert_eq!(surface.occurrences(&SurfaceCall::CheckoutEnabled(false)), 1);
}

#[tokio::test]
async fn populated_cart_renders_lines_and_enables_checkout() {
    let surface = Arc::new(RecordingSurface::default());
    let controller = CartController::builder(ScriptedGateway::new(tee_cart()))
        .surface(Arc::clone(&surface))
        .build();

    controller.refresh().await;

    let rendered = surface.rendered();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].contains("Tee"), "markup: {}", rendered[0]);
    assert!(!rendered[0].contains("cart-empty-state"), "markup: {}", rendered[0]);
    assert_eq!(surface.occurrences(&SurfaceCall::ItemCount(2)), 1);
    assert_eq!(surface.occurrences(&SurfaceCall::CheckoutEnabled(true)), 1);
}

#[tokio::test]
async fn failed_refresh_leaves_rendered_state_untouched() {
    let gateway = Arc::new(ScriptedGateway::new(tee_cart()));
    let surface = Arc::new(RecordingSurface::default());
    let controller = CartController::builder(Arc::clone(&gateway))
        .surface(Arc::clone(&surface))
        .build();

    controller.refresh().await;
    let after_first = surface.calls();

    gateway.fail_fetch.store(true, Ordering::SeqCst);
    controller.refresh().await;

    assert_eq!(
        surface.calls(),
        after_first,
        "a failed refresh must not touch the surface"
    );
}

#[tokio::test]
async fn successful_add_refreshes_opens_and_notifies() -> TestResult {
    let gateway = Arc::new(ScriptedGateway::new(empty_cart()));
    let surface = Arc::new(RecordingSurface::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let observer = Arc::new(RecordingObserver::default());

    let controller = CartController::builder(Arc::clone(&gateway))
        .surface(Arc::clone(&surface))
        .notifier(Arc::clone(&notifier))
        .observer(Arc::clone(&observer))
        .build();

    // Server-side effect of the add: the next fetch sees the new line.
    gateway.set_added_line(tee_line());
    gateway.set_cart(tee_cart());

    let line = controller.add_item("variant-42", 2, &[]).await?;

    assert_eq!(line.id, "line-1");
    assert_eq!(line.quantity, 2);
    assert!(controller.is_open(), "panel must open after a successful add");
    assert!(surface.occurrences(&SurfaceCall::Visible(true)) >= 1);
    assert!(
        notifier
            .notices()
            .contains(&(NoticeKind::Success, "Added to cart".to_owned())),
        "notices: {:?}",
        notifier.notices()
    );

    let updates = observer.updates.lock().expect("observer lock").clone();
    assert!(
        updates.contains(&tee_cart().item_count),
        "cart-updated observations must match the refreshed snapshot, got {updates:?}"
    );

    let added = observer.added.lock().expect("observer lock").clone();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].product_id, "42");
    assert_eq!(added[0].price, 1000);

    Ok(())
}

#[tokio::test]
async fn clear_empties_cart_and_rerenders() {
    let gateway = Arc::new(ScriptedGateway::new(tee_cart()));
    let surface = Arc::new(RecordingSurface::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let controller = CartController::builder(Arc::clone(&gateway))
        .surface(Arc::clone(&surface))
        .notifier(Arc::clone(&notifier))
        .build();

    controller.clear().await;

    let rendered = surface.rendered();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].contains("cart-empty-state"), "markup: {}", rendered[0]);
    assert!(
        notifier
            .notices()
            .contains(&(NoticeKind::Success, "Cart cleared".to_owned())),
        "notices: {:?}",
        notifier.notices()
    );
}

#[tokio::test]
async fn rebind_pushes_current_visibility_to_the_new_surface() {
    let first = Arc::new(RecordingSurface::default());
    let controller = CartController::builder(ScriptedGateway::new(tee_cart()))
        .surface(Arc::clone(&first))
        .build();

    controller.open().await;

    let second = Arc::new(RecordingSurface::default());
    controller.rebind(Arc::clone(&second));

    assert_eq!(second.occurrences(&SurfaceCall::Visible(true)), 1);
    assert_eq!(second.occurrences(&SurfaceCall::ScrollLocked(true)), 1);

    // Subsequent refreshes land on the new surface only.
    let first_before = first.calls();
    controller.refresh().await;

    assert_eq!(first.calls(), first_before);
    assert_eq!(second.rendered().len(), 1);
}
