//! Product record as served by the catalog endpoint.

use serde::{Deserialize, Serialize};

use crate::ids::{ProductHandle, ProductId};

fn default_qty() -> i64 {
    1
}

/// A product in the catalog or cart.
///
/// Values handed out by [`ShopState`](crate::ShopState) carry the handle of
/// the instance they were copied from, so a clone still refers to the same
/// instance. Equality compares the record's data, not its identity; use
/// [`same_instance`](Self::same_instance) for identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Category, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Quantity used by the cart. Missing in the payload means 1.
    #[serde(default = "default_qty")]
    pub qty: i64,
    /// Any other attributes of the record (images, descriptions, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    #[serde(skip)]
    pub(crate) handle: Option<ProductHandle>,
}

impl Product {
    /// Create a product with quantity 1 that is not yet owned by any state.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind: kind.into(),
            qty: default_qty(),
            extra: serde_json::Map::new(),
            handle: None,
        }
    }

    /// Handle of the instance this value was copied from, if any.
    pub fn handle(&self) -> Option<ProductHandle> {
        self.handle
    }

    /// True if both values refer to the same owned instance.
    pub fn same_instance(&self, other: &Product) -> bool {
        matches!((self.handle, other.handle), (Some(a), Some(b)) if a == b)
    }

    /// `price * qty`.
    pub fn line_total(&self) -> f64 {
        self.price * self.qty as f64
    }

    /// Look up an extra attribute as a string.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.price == other.price
            && self.kind == other.kind
            && self.qty == other.qty
            && self.extra == other.extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults_qty() {
        let product: Product = serde_json::from_str(
            r#"{"id": "a", "name": "Runner", "price": 10, "type": "shoe", "imageUrl": "/a.png"}"#,
        )
        .unwrap();
        assert_eq!(product.id, "a");
        assert_eq!(product.kind, "shoe");
        assert_eq!(product.qty, 1);
        assert_eq!(product.attribute("imageUrl"), Some("/a.png"));
        assert_eq!(product.handle(), None);
    }

    #[test]
    fn test_serialize_keeps_type_and_extra() {
        let mut product = Product::new("b", "Boot", 20.5, "shoe");
        product
            .extra
            .insert("description".to_string(), serde_json::json!("warm"));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["type"], "shoe");
        assert_eq!(value["qty"], 1);
        assert_eq!(value["description"], "warm");
        assert!(value.get("handle").is_none());
    }

    #[test]
    fn test_line_total() {
        let mut product = Product::new("c", "Shirt", 15.0, "shirt");
        product.qty = 3;
        assert_eq!(product.line_total(), 45.0);
    }

    #[test]
    fn test_unowned_products_are_never_the_same_instance() {
        let a = Product::new("a", "Runner", 10.0, "shoe");
        let b = a.clone();
        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
    }
}
