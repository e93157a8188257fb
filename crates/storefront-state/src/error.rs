//! State manager error types.

use storefront_data::FetchError;
use storefront_kv::KvError;
use thiserror::Error;

use crate::ids::ProductId;

/// Errors surfaced by [`ShopState`](crate::ShopState) operations.
///
/// A failed operation leaves the state untouched and broadcasts nothing.
#[derive(Error, Debug)]
pub enum ShopError {
    /// The catalog was read before `set_all_products` was called.
    #[error("Catalog has not been loaded")]
    CatalogNotLoaded,

    /// The product instance is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// Cart position does not exist.
    #[error("Cart index {index} out of range (cart has {len} items)")]
    CartIndexOutOfRange { index: usize, len: usize },

    /// Catalog request failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Preference store failed.
    #[error("Store error: {0}")]
    Store(#[from] KvError),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ShopError {
    fn from(e: toml::de::Error) -> Self {
        ShopError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(e: serde_json::Error) -> Self {
        ShopError::Config(e.to_string())
    }
}
