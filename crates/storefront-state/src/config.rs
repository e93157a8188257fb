//! State manager configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ShopError;

/// Configuration for a [`ShopState`](crate::ShopState).
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Prepended to catalog paths when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Path of the full catalog.
    pub catalog_path: String,

    /// Path of a single product; `{id}` is replaced with the product id.
    pub product_path: String,

    /// Route to navigate to after the cart is emptied.
    pub products_route: String,

    /// Store key holding the layout flag.
    pub layout_key: String,

    /// Maximum number of similar products returned.
    pub similar_limit: usize,

    /// Transport timeout for catalog requests.
    pub request_timeout_secs: u64,

    /// Toast presentation.
    pub toast: ToastConfig,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            catalog_path: "/products.json".to_string(),
            product_path: "/products/{id}.json".to_string(),
            products_route: "/products".to_string(),
            layout_key: "ngShopLayout".to_string(),
            similar_limit: 3,
            request_timeout_secs: 30,
            toast: ToastConfig::default(),
        }
    }
}

impl ShopConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShopError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShopError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ShopError> {
        Ok(toml::from_str(content)?)
    }

    /// Path of a single product.
    pub fn product_url(&self, id: &str) -> String {
        self.product_path.replace("{id}", id)
    }

    /// Build a native HTTP client honouring `base_url` and the timeout.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn client(&self) -> Result<storefront_data::FetchClient, ShopError> {
        let client = storefront_data::FetchClient::native(std::time::Duration::from_secs(
            self.request_timeout_secs,
        ))?;
        Ok(match &self.base_url {
            Some(base) => client.with_base_url(base.clone()),
            None => client,
        })
    }
}

/// Toast presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub timeout_ms: u64,
    pub theme: String,
    pub dismissible: bool,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            theme: "material".to_string(),
            dismissible: true,
        }
    }
}
