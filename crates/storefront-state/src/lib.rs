//! Client-side cart and catalog state for storefront UIs.
//!
//! [`ShopState`] holds the product catalog, the cart and its running total,
//! the listing filters and the grid/list layout flag. UI components observe
//! it through [`Channel`]s and drive navigation and toasts through the
//! [`Navigator`] and [`Notifier`] ports.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_kv::FileStore;
//! use storefront_state::prelude::*;
//!
//! let config = ShopConfig::load("shop.toml")?;
//! let client = config.client()?;
//! let mut state = ShopState::new(config, client, FileStore::open("prefs.json")?, router, toasts)?;
//!
//! let products: Vec<Product> = state.fetch_catalog().json()?;
//! state.set_all_products(products);
//!
//! let _badge = state.cart_changes().subscribe(|cart: &Vec<Product>| {
//!     println!("{} items", cart.len());
//! });
//!
//! let mut first = state.get_all_products()?.remove(0);
//! state.add_to_cart(&mut first);
//! println!("Total: {:.2}", state.get_cart_total());
//! ```

pub mod catalog;
pub mod channel;
pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod ports;
pub mod product;
mod state;
pub mod testing;

pub use channel::{Channel, Listener, Subscription};
pub use config::{ShopConfig, ToastConfig};
pub use error::ShopError;
pub use ids::{ProductHandle, ProductId};
pub use ports::{Navigator, Notifier, Severity, ToastOptions};
pub use product::Product;
pub use state::ShopState;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::ALL_CATEGORIES;
    pub use crate::channel::{Channel, Listener, Subscription};
    pub use crate::config::{ShopConfig, ToastConfig};
    pub use crate::error::ShopError;
    pub use crate::ids::{ProductHandle, ProductId};
    pub use crate::ports::{Navigator, Notifier, Severity, ToastOptions};
    pub use crate::product::Product;
    pub use crate::state::ShopState;
}
