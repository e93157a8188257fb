//! The cart and catalog state manager.

use std::collections::HashSet;

use storefront_data::{FetchClient, PendingRequest};
use storefront_kv::KeyValueStore;
use tracing::{debug, info, warn};

use crate::catalog::{self, CatalogFilter, ProductArena, ALL_CATEGORIES};
use crate::channel::Channel;
use crate::config::ShopConfig;
use crate::error::ShopError;
use crate::ids::ProductHandle;
use crate::layout;
use crate::ports::{Navigator, Notifier, Severity, ToastOptions};
use crate::product::Product;

/// What a cart toast is announcing.
enum CartNotice<'a> {
    Added(&'a str),
    Removed(&'a str),
    Emptied,
}

/// Client-side state for a storefront: catalog, cart, running total,
/// listing filters and layout mode.
///
/// Every mutating operation broadcasts its result synchronously on the
/// matching channel before returning. Listeners receive payloads by
/// reference and cannot call back into the state while it is mutably
/// borrowed; queue follow-up work instead.
pub struct ShopState {
    config: ShopConfig,
    client: FetchClient,
    store: Box<dyn KeyValueStore>,
    navigator: Box<dyn Navigator>,
    notifier: Box<dyn Notifier>,

    arena: ProductArena,
    catalog: Option<Vec<ProductHandle>>,
    cart: Vec<ProductHandle>,
    cart_total: f64,
    filter_by: String,
    search: String,
    layout_mode: bool,

    cart_changed: Channel<Vec<Product>>,
    total_changed: Channel<f64>,
    filter_changed: Channel<String>,
    search_changed: Channel<String>,
    layout_changed: Channel<bool>,
}

impl ShopState {
    /// Create the state, reading the layout flag from `store`.
    pub fn new(
        config: ShopConfig,
        client: FetchClient,
        store: impl KeyValueStore + 'static,
        navigator: impl Navigator + 'static,
        notifier: impl Notifier + 'static,
    ) -> Result<Self, ShopError> {
        let stored = store.get(&config.layout_key)?;
        let layout_mode = layout::from_stored(stored.as_deref());
        debug!(key = %config.layout_key, stored = ?stored, grid = layout_mode, "layout restored");

        Ok(Self {
            config,
            client,
            store: Box::new(store),
            navigator: Box::new(navigator),
            notifier: Box::new(notifier),
            arena: ProductArena::default(),
            catalog: None,
            cart: Vec::new(),
            cart_total: 0.0,
            filter_by: ALL_CATEGORIES.to_string(),
            search: String::new(),
            layout_mode,
            cart_changed: Channel::new(),
            total_changed: Channel::new(),
            filter_changed: Channel::new(),
            search_changed: Channel::new(),
            layout_changed: Channel::new(),
        })
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    // === Catalog ===

    /// Request for the whole catalog. Resolve it and pass the result to
    /// [`set_all_products`](Self::set_all_products).
    pub fn fetch_catalog(&self) -> PendingRequest {
        self.client.get(self.config.catalog_path.as_str())
    }

    /// Request for a single product record.
    pub fn fetch_product(&self, id: &str) -> PendingRequest {
        self.client.get(self.config.product_url(id))
    }

    /// Replace the catalog wholesale.
    ///
    /// Products copied out of this state keep their instance; anything else
    /// becomes a new instance. Instances held by neither the new catalog nor
    /// the cart are released.
    pub fn set_all_products(&mut self, products: Vec<Product>) {
        let handles: Vec<ProductHandle> = products
            .into_iter()
            .map(|p| self.arena.adopt(p))
            .collect();

        let keep: HashSet<ProductHandle> = handles.iter().chain(&self.cart).copied().collect();
        self.arena.retain(&keep);

        info!(products = handles.len(), live = self.arena.len(), "catalog replaced");
        self.catalog = Some(handles);
    }

    /// Copies of the catalog products, in catalog order.
    pub fn get_all_products(&self) -> Result<Vec<Product>, ShopError> {
        let handles = self.catalog.as_ref().ok_or(ShopError::CatalogNotLoaded)?;
        Ok(self.arena.snapshot(handles))
    }

    /// At most `similar_limit` other products of the same type, most
    /// expensive first.
    pub fn get_similar_products(
        &self,
        kind: &str,
        exclude_id: &str,
    ) -> Result<Vec<Product>, ShopError> {
        Ok(catalog::similar_products(
            self.get_all_products()?,
            kind,
            exclude_id,
            self.config.similar_limit,
        ))
    }

    /// First catalog product with the given id.
    pub fn find_product(&self, id: &str) -> Result<Option<Product>, ShopError> {
        Ok(self
            .get_all_products()?
            .into_iter()
            .find(|p| p.id == id))
    }

    /// Catalog products matching the current category filter and search.
    pub fn visible_products(&self) -> Result<Vec<Product>, ShopError> {
        let filter = CatalogFilter {
            category: &self.filter_by,
            search: &self.search,
        };
        let mut products = self.get_all_products()?;
        products.retain(|p| filter.matches(p));
        Ok(products)
    }

    // === Filters ===

    pub fn set_filter(&mut self, value: impl Into<String>) {
        self.filter_by = value.into();
        debug!(filter = %self.filter_by, "filter changed");
        self.filter_changed.emit(&self.filter_by);
    }

    pub fn filter(&self) -> &str {
        &self.filter_by
    }

    pub fn search_filter(&mut self, value: impl Into<String>) {
        self.search = value.into();
        debug!(search = %self.search, "search changed");
        self.search_changed.emit(&self.search);
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    // === Cart ===

    /// Add a product instance to the cart, or bump its quantity if that
    /// instance is already there.
    ///
    /// Identity decides, not the product id. A product that is not a copy of
    /// a live instance (a freshly fetched record, say) becomes a new instance
    /// and `product` is pointed at it, so adding the same value again bumps
    /// that entry. `product.qty` is refreshed from the cart.
    pub fn add_to_cart(&mut self, product: &mut Product) {
        let handle = match self.arena.resolve(product) {
            Some(handle) => handle,
            None => {
                let handle = self.arena.insert(product.clone());
                product.handle = Some(handle);
                handle
            }
        };

        let qty = if self.cart.contains(&handle) {
            let record = self.record_mut(handle);
            record.qty += 1;
            record.qty
        } else {
            self.cart.push(handle);
            self.record_mut(handle).qty
        };
        product.qty = qty;
        debug!(product = %product.id, instance = %handle, qty, "added to cart");

        self.emit_cart();
        self.calculate_cart_total();
        self.total_changed.emit(&self.cart_total);
        self.add_toast(CartNotice::Added(&product.name));
    }

    /// Copies of the cart entries, in add order.
    ///
    /// Mutating the returned values does not touch the cart.
    pub fn get_cart_added_products(&self) -> Vec<Product> {
        self.arena.snapshot(&self.cart)
    }

    /// Recompute, store and return Σ(price × qty) over the cart.
    pub fn calculate_cart_total(&mut self) -> f64 {
        self.cart_total = self
            .cart
            .iter()
            .filter_map(|h| self.arena.get(*h))
            .map(Product::line_total)
            .sum();
        self.cart_total
    }

    /// Total from the last recomputation.
    pub fn get_cart_total(&self) -> f64 {
        self.cart_total
    }

    /// Increase or decrease the quantity of a cart entry by one.
    ///
    /// Quantity has no floor: decreasing from 1 yields 0.
    pub fn cart_product_manipulate(
        &mut self,
        product: &Product,
        increase: bool,
    ) -> Result<(), ShopError> {
        let handle = match product.handle().filter(|h| self.cart.contains(h)) {
            Some(handle) => handle,
            None => {
                warn!(product = %product.id, "quantity change for product not in cart");
                return Err(ShopError::NotInCart(product.id.clone()));
            }
        };

        let record = self.record_mut(handle);
        if increase {
            record.qty += 1;
        } else {
            record.qty -= 1;
        }
        debug!(product = %record.id, qty = record.qty, "cart quantity changed");

        self.calculate_cart_total();
        self.total_changed.emit(&self.cart_total);
        Ok(())
    }

    /// Remove the entry at `index`, resetting its quantity to 1 first so a
    /// later re-add of the same instance starts from 1.
    pub fn remove_cart_single_item(&mut self, index: usize) -> Result<Product, ShopError> {
        let Some(&handle) = self.cart.get(index) else {
            warn!(index, len = self.cart.len(), "cart index out of range");
            return Err(ShopError::CartIndexOutOfRange {
                index,
                len: self.cart.len(),
            });
        };

        self.record_mut(handle).qty = 1;
        self.cart.remove(index);
        let removed = self.record_mut(handle).clone();
        self.release_if_unlisted(handle);
        debug!(product = %removed.id, index, "removed from cart");

        self.emit_cart();
        self.calculate_cart_total();
        self.total_changed.emit(&self.cart_total);
        self.add_toast(CartNotice::Removed(&removed.name));
        Ok(removed)
    }

    /// Empty the cart, reset every entry's quantity to 1 and return to the
    /// product listing.
    pub fn empty_cart(&mut self) {
        for handle in std::mem::take(&mut self.cart) {
            self.record_mut(handle).qty = 1;
            self.release_if_unlisted(handle);
        }
        info!(live = self.arena.len(), "cart emptied");

        self.emit_cart();
        self.cart_total = 0.0;
        self.total_changed.emit(&self.cart_total);
        self.navigator.navigate(&self.config.products_route);
        self.add_toast(CartNotice::Emptied);
    }

    /// Σ qty over the cart.
    pub fn cart_item_count(&self) -> i64 {
        self.cart
            .iter()
            .filter_map(|h| self.arena.get(*h))
            .map(|p| p.qty)
            .sum()
    }

    pub fn cart_len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    // === Layout ===

    /// `true` for grid, `false` for list.
    pub fn layout(&self) -> bool {
        self.layout_mode
    }

    /// Persist and broadcast the layout flag.
    pub fn set_layout(&mut self, grid: bool) -> Result<(), ShopError> {
        self.store
            .set(&self.config.layout_key, layout::to_stored(grid))?;
        self.layout_mode = grid;
        debug!(grid, "layout changed");
        self.layout_changed.emit(&self.layout_mode);
        Ok(())
    }

    // === Channels ===

    /// Broadcasts the cart contents after adds, removals and emptying.
    pub fn cart_changes(&self) -> &Channel<Vec<Product>> {
        &self.cart_changed
    }

    /// Broadcasts the cart total after every cart mutation.
    pub fn total_changes(&self) -> &Channel<f64> {
        &self.total_changed
    }

    pub fn filter_changes(&self) -> &Channel<String> {
        &self.filter_changed
    }

    pub fn search_changes(&self) -> &Channel<String> {
        &self.search_changed
    }

    pub fn layout_changes(&self) -> &Channel<bool> {
        &self.layout_changed
    }

    // === Internals ===

    // Cart handles are never released while in the cart, so lookups cannot miss.
    fn record_mut(&mut self, handle: ProductHandle) -> &mut Product {
        match self.arena.get_mut(handle) {
            Some(record) => record,
            None => unreachable!("cart instance {} missing from arena", handle),
        }
    }

    // Instances that left the cart survive only while the catalog lists them.
    fn release_if_unlisted(&mut self, handle: ProductHandle) {
        let listed = self
            .catalog
            .as_ref()
            .is_some_and(|catalog| catalog.contains(&handle));
        if !listed {
            self.arena.remove(handle);
        }
    }

    fn emit_cart(&self) {
        self.cart_changed.emit(&self.arena.snapshot(&self.cart));
    }

    fn add_toast(&self, notice: CartNotice<'_>) {
        let (severity, message) = match notice {
            CartNotice::Added(name) => (Severity::Success, format!("{}, added to cart", name)),
            CartNotice::Removed(name) => (Severity::Error, format!("{}, removed from cart", name)),
            CartNotice::Emptied => (Severity::Error, "Cart emptied".to_string()),
        };
        let toast = &self.config.toast;
        self.notifier.notify(
            severity,
            ToastOptions {
                title: String::new(),
                message,
                dismissible: toast.dismissible,
                timeout_ms: toast.timeout_ms,
                theme: toast.theme.clone(),
            },
        );
    }
}

impl std::fmt::Debug for ShopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopState")
            .field("catalog", &self.catalog.as_ref().map(Vec::len))
            .field("cart", &self.cart)
            .field("cart_total", &self.cart_total)
            .field("filter_by", &self.filter_by)
            .field("search", &self.search)
            .field("layout_mode", &self.layout_mode)
            .finish_non_exhaustive()
    }
}
