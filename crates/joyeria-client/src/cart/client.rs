//! The cart synchronization client.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use joyeria_commerce::cart::{validate_quantity, Cart, CartTotals, ShippingPolicy};
use joyeria_commerce::checkout::{Customer, OrderReceipt, OrderRequest};
use joyeria_commerce::{CartId, ProductId};
use joyeria_data::{send_timed, ApiRequest, CallKind, Response, TimeoutPolicy, Transport};
use serde::{Deserialize, Serialize};

use crate::error::{CartError, ErrorKind};
use crate::store::CartIdStore;
use crate::ui::{AutoConfirm, CartRenderer, Confirm, LogNotifier, NoRender, Notifier, Toast};
use crate::view::CartView;

/// Quantity used when the shopper does not pick one.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// How a missing cart id is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `POST /carts` and keep the returned id.
    #[default]
    Server,
    /// Mint `cart_xxxxxxxxx` locally; the backend creates the cart on first add.
    Local,
}

/// Result of a checkout the backend accepted for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    /// Payment approved. The cart id has been discarded.
    Approved(OrderReceipt),
    /// Payment declined. The cart is kept so the shopper can retry.
    Rejected(OrderReceipt),
}

impl OrderOutcome {
    pub fn receipt(&self) -> &OrderReceipt {
        match self {
            OrderOutcome::Approved(r) | OrderOutcome::Rejected(r) => r,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, OrderOutcome::Approved(_))
    }
}

#[derive(Deserialize)]
struct Created {
    id: CartId,
}

#[derive(Serialize)]
struct AddItemBody<'a> {
    product_id: &'a ProductId,
    quantity: i64,
}

struct State {
    cart_id: Option<CartId>,
    cart: Cart,
    view: CartView,
    /// Last fetch ticket handed out.
    issued: u64,
    /// Ticket of the snapshot currently cached. Older results are dropped.
    applied: u64,
}

/// Keeps one shopper's cart in sync with the backend.
///
/// The backend owns the cart. This client holds the cart id (mirrored in a
/// [`CartIdStore`]) and a cache of the last snapshot, which is replaced
/// wholesale on every reload. Every mutation is followed by a full reload.
///
/// Mutations do not overlap: while one is pending, a second one fails
/// immediately with [`CartError::Busy`]. Reads are not guarded, but every
/// fetch takes a ticket when it starts and a snapshot is only cached if no
/// later fetch has been applied, so a slow read never overwrites a newer one.
pub struct CartClient<T> {
    transport: T,
    store: Arc<dyn CartIdStore>,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn CartRenderer>,
    shipping: ShippingPolicy,
    timeouts: TimeoutPolicy,
    id_strategy: IdStrategy,
    state: Mutex<State>,
    in_flight: tokio::sync::Mutex<()>,
    creating: tokio::sync::Mutex<()>,
}

impl<T: Transport> CartClient<T> {
    /// Create a client, picking up any cart id left in `store`.
    pub fn open(transport: T, store: Arc<dyn CartIdStore>) -> Result<Self, CartError> {
        let cart_id = store.load()?;
        let shipping = ShippingPolicy::default();
        tracing::debug!(cart_id = ?cart_id.as_ref().map(CartId::as_str), "cart client opened");
        Ok(Self {
            transport,
            store,
            confirm: Arc::new(AutoConfirm::default()),
            notifier: Arc::new(LogNotifier),
            renderer: Arc::new(NoRender),
            shipping,
            timeouts: TimeoutPolicy::default(),
            id_strategy: IdStrategy::default(),
            state: Mutex::new(State {
                cart_id,
                cart: Cart::empty(),
                view: CartView::empty(shipping.currency()),
                issued: 0,
                applied: 0,
            }),
            in_flight: tokio::sync::Mutex::new(()),
            creating: tokio::sync::Mutex::new(()),
        })
    }

    pub fn with_confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn CartRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_shipping(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .view = CartView::empty(shipping.currency());
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutPolicy) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    /// The cart id currently held, if any.
    pub fn cart_id(&self) -> Option<CartId> {
        self.state().cart_id.clone()
    }

    /// The last rendered view.
    pub fn view(&self) -> CartView {
        self.state().view.clone()
    }

    /// The last fetched snapshot.
    pub fn cart(&self) -> Cart {
        self.state().cart.clone()
    }

    /// Totals of the last snapshot.
    pub fn totals(&self) -> CartTotals {
        *self.state().view.totals()
    }

    /// Sum of quantities in the last snapshot.
    pub fn cart_count(&self) -> i64 {
        self.state().view.item_count()
    }

    /// Return the held cart id, creating and persisting one if needed.
    pub async fn ensure_cart(&self) -> Result<CartId, CartError> {
        self.ensure_id().await.map_err(|e| self.report("ensure_cart", e))
    }

    /// Fetch the cart and replace the local cache with it.
    ///
    /// Never fails: on any error the empty view is rendered. A cart the
    /// backend does not know also drops the stored id, so the next call
    /// starts a fresh cart.
    pub async fn load_cart(&self) -> CartView {
        match self.refresh().await {
            Ok(view) => view,
            Err(CartError::NotFound(_)) => self.view(),
            Err(err) => {
                self.report("load_cart", err);
                self.view()
            }
        }
    }

    /// Add `quantity` of a product, then reload.
    ///
    /// Adding a product already in the cart increments its line.
    pub async fn add_item(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, CartError> {
        let result: Result<CartView, CartError> = async {
            if product_id.is_blank() {
                return Err(CartError::Validation("a product id is required".to_string()));
            }
            validate_quantity(quantity)?;
            let _guard = self.begin()?;

            let cart_id = self.ensure_id().await?;
            let request = ApiRequest::post("/carts")
                .segment(&cart_id)
                .segment("add")
                .kind(CallKind::CartWrite)
                .json(&AddItemBody {
                    product_id,
                    quantity,
                })?;
            self.call(request).await?;
            tracing::info!(cart_id = %cart_id, product_id = %product_id, quantity, "item added");

            self.refresh().await
        }
        .await;

        match result {
            Ok(view) => {
                self.notifier.notify(Toast::success("Product added to the cart"));
                Ok(view)
            }
            Err(err) => Err(self.report("add_item", err)),
        }
    }

    /// Remove a product's line after the shopper confirms.
    ///
    /// Returns `Ok(false)` when there was nothing to remove or the shopper
    /// declined; no request is sent in either case.
    pub async fn remove_item(&self, product_id: &ProductId) -> Result<bool, CartError> {
        let result: Result<bool, CartError> = async {
            let _guard = self.begin()?;
            let (cart_id, label) = {
                let state = self.state();
                let label = state
                    .cart
                    .get_item(product_id)
                    .map(|item| item.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| product_id.to_string());
                (state.cart_id.clone(), label)
            };
            let Some(cart_id) = cart_id else {
                tracing::debug!(product_id = %product_id, "no cart, nothing to remove");
                return Ok(false);
            };
            if !self.confirm.confirm(&format!("Remove {label} from the cart?")) {
                return Ok(false);
            }

            let request = ApiRequest::delete("/carts")
                .segment(&cart_id)
                .segment("item")
                .segment(product_id)
                .kind(CallKind::CartWrite);
            self.call(request).await?;
            tracing::info!(cart_id = %cart_id, product_id = %product_id, "item removed");

            self.refresh().await?;
            Ok(true)
        }
        .await;

        match result {
            Ok(true) => {
                self.notifier.notify(Toast::success("Product removed from the cart"));
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => Err(self.report("remove_item", err)),
        }
    }

    /// Empty the cart after the shopper confirms.
    pub async fn clear_cart(&self) -> Result<bool, CartError> {
        let result: Result<bool, CartError> = async {
            let _guard = self.begin()?;
            let Some(cart_id) = self.cart_id() else {
                let view = self.reset_cache();
                self.renderer.render(&view);
                return Ok(false);
            };
            if !self.confirm.confirm("Remove every product from the cart?") {
                return Ok(false);
            }

            let request = ApiRequest::put("/carts")
                .segment(&cart_id)
                .segment("clear")
                .kind(CallKind::CartWrite);
            self.call(request).await?;
            tracing::info!(cart_id = %cart_id, "cart cleared");

            self.reset_cache();
            self.refresh().await?;
            Ok(true)
        }
        .await;

        match result {
            Ok(true) => {
                self.notifier.notify(Toast::success("Cart emptied"));
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => Err(self.report("clear_cart", err)),
        }
    }

    /// Check out the current cart.
    pub async fn place_order(&self, payment_method: &str) -> Result<OrderOutcome, CartError> {
        self.place_order_with(payment_method, Customer::default())
            .await
    }

    /// Check out the current cart with shopper contact details.
    ///
    /// An empty cached cart or a blank payment method fails before any
    /// request is sent. On approval the cart id is discarded; on a declined
    /// payment the cart is left as it was.
    pub async fn place_order_with(
        &self,
        payment_method: &str,
        customer: Customer,
    ) -> Result<OrderOutcome, CartError> {
        let result: Result<OrderOutcome, CartError> = async {
            let _guard = self.begin()?;
            let (cart_id, count) = {
                let state = self.state();
                (state.cart_id.clone(), state.cart.item_count())
            };
            if count <= 0 {
                return Err(CartError::Validation("Your cart is empty".to_string()));
            }
            let Some(cart_id) = cart_id else {
                return Err(CartError::Validation("Your cart is empty".to_string()));
            };
            let order = OrderRequest::new(cart_id.clone(), payment_method)?.with_customer(customer);

            let request = ApiRequest::post("/orders")
                .kind(CallKind::Checkout)
                .json(&order)?;
            let receipt: OrderReceipt = self.call(request).await?.json()?;
            tracing::info!(
                cart_id = %cart_id,
                order_number = %receipt.order_number,
                status = receipt.status.as_str(),
                total = %receipt.total,
                "order placed"
            );

            if !receipt.status.is_approved() {
                return Ok(OrderOutcome::Rejected(receipt));
            }
            self.forget_cart_id();
            let view = self.reset_cache();
            self.renderer.render(&view);
            Ok(OrderOutcome::Approved(receipt))
        }
        .await;

        match result {
            Ok(OrderOutcome::Approved(receipt)) => {
                self.notifier.notify(Toast::success(format!(
                    "Order {} confirmed. Total {}",
                    receipt.order_number, receipt.total
                )));
                Ok(OrderOutcome::Approved(receipt))
            }
            Ok(OrderOutcome::Rejected(receipt)) => {
                self.notifier.notify(Toast::error(format!(
                    "Payment for order {} was declined. Your cart was kept.",
                    receipt.order_number
                )));
                Ok(OrderOutcome::Rejected(receipt))
            }
            Err(err) => Err(self.report("place_order", err)),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, CartError> {
        self.in_flight.try_lock().map_err(|_| CartError::Busy)
    }

    async fn call(&self, request: ApiRequest) -> Result<Response, CartError> {
        let response = send_timed(&self.transport, request, &self.timeouts).await?;
        Ok(response.error_for_status()?)
    }

    async fn ensure_id(&self) -> Result<CartId, CartError> {
        if let Some(id) = self.cart_id() {
            return Ok(id);
        }
        let _creating = self.creating.lock().await;
        if let Some(id) = self.cart_id() {
            return Ok(id);
        }

        let id = match self.id_strategy {
            IdStrategy::Local => CartId::generate(),
            IdStrategy::Server => {
                let request = ApiRequest::post("/carts").kind(CallKind::CartWrite);
                let created: Created = self.call(request).await?.json()?;
                if created.id.is_blank() {
                    return Err(CartError::Malformed(
                        "backend returned a blank cart id".to_string(),
                    ));
                }
                created.id
            }
        };

        self.store.save(&id)?;
        self.state().cart_id = Some(id.clone());
        tracing::info!(cart_id = %id, strategy = ?self.id_strategy, "cart created");
        Ok(id)
    }

    /// Fetch, cache and render the cart.
    ///
    /// On failure the cache is reset to empty, and a cart the backend does
    /// not know also drops the stored id. Results of a fetch that started
    /// before the currently cached one are discarded.
    async fn refresh(&self) -> Result<CartView, CartError> {
        let ticket = self.ticket();
        match self.fetch_cart().await {
            Ok((cart, view)) => {
                if !self.install(ticket, cart, view.clone()) {
                    tracing::debug!(ticket, "discarded stale cart snapshot");
                    return Ok(self.view());
                }
                self.renderer.render(&view);
                Ok(view)
            }
            Err(err) => {
                let empty = CartView::empty(self.shipping.currency());
                if self.install(ticket, Cart::empty(), empty.clone()) {
                    if let CartError::NotFound(message) = &err {
                        tracing::info!(%message, "cart not found, starting over");
                        self.forget_cart_id();
                    }
                    self.renderer.render(&empty);
                }
                Err(err)
            }
        }
    }

    async fn fetch_cart(&self) -> Result<(Cart, CartView), CartError> {
        let cart_id = self.ensure_id().await?;
        let request = ApiRequest::get("/carts")
            .segment(&cart_id)
            .kind(CallKind::CartRead);
        let mut cart: Cart = self.call(request).await?.json()?;

        let repaired = cart.normalize();
        if !repaired.is_clean() {
            tracing::warn!(
                cart_id = %cart_id,
                dropped = repaired.dropped,
                merged = repaired.merged,
                "repaired cart snapshot"
            );
        }
        cart.set_currency(self.shipping.currency());
        let view = CartView::from_cart(&cart, &self.shipping)?;
        tracing::debug!(cart_id = %cart_id, lines = cart.unique_item_count(), "cart loaded");
        Ok((cart, view))
    }

    fn ticket(&self) -> u64 {
        let mut state = self.state();
        state.issued += 1;
        state.issued
    }

    /// Cache a snapshot unless a later ticket has already been applied.
    fn install(&self, ticket: u64, cart: Cart, view: CartView) -> bool {
        let mut state = self.state();
        if ticket < state.applied {
            return false;
        }
        state.applied = ticket;
        state.cart = cart;
        state.view = view;
        true
    }

    /// Empty the cache. Fetches already in flight can no longer overwrite it.
    fn reset_cache(&self) -> CartView {
        let view = CartView::empty(self.shipping.currency());
        let ticket = self.ticket();
        self.install(ticket, Cart::empty(), view.clone());
        view
    }

    fn forget_cart_id(&self) {
        self.state().cart_id = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored cart id");
            self.notifier.notify(Toast::for_error(&CartError::Storage(e)));
        }
    }

    fn report(&self, op: &'static str, err: CartError) -> CartError {
        match err.kind() {
            ErrorKind::Busy | ErrorKind::Validation => {
                tracing::debug!(op, error = %err, "cart operation refused")
            }
            _ => tracing::warn!(op, error = %err, "cart operation failed"),
        }
        self.notifier.notify(Toast::for_error(&err));
        err
    }
}
