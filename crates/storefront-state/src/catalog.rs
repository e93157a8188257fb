//! Product instance storage and catalog queries.

use std::collections::{HashMap, HashSet};

use crate::ids::ProductHandle;
use crate::product::Product;

/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Owns every product instance the state manager knows about.
///
/// Catalog and cart refer to instances by handle, so a quantity change made
/// through the cart is visible through the catalog as well.
#[derive(Debug, Default)]
pub(crate) struct ProductArena {
    records: HashMap<ProductHandle, Product>,
    next: u64,
}

impl ProductArena {
    /// Take ownership of `product` as a new instance.
    pub fn insert(&mut self, mut product: Product) -> ProductHandle {
        let handle = ProductHandle(self.next);
        self.next += 1;
        product.handle = Some(handle);
        self.records.insert(handle, product);
        handle
    }

    /// Handle of the live instance `product` was copied from.
    pub fn resolve(&self, product: &Product) -> Option<ProductHandle> {
        product.handle.filter(|h| self.records.contains_key(h))
    }

    /// Reuse the live instance behind `product`, or insert it as a new one.
    pub fn adopt(&mut self, product: Product) -> ProductHandle {
        match self.resolve(&product) {
            Some(handle) => handle,
            None => self.insert(product),
        }
    }

    pub fn get(&self, handle: ProductHandle) -> Option<&Product> {
        self.records.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ProductHandle) -> Option<&mut Product> {
        self.records.get_mut(&handle)
    }

    /// Copies of the given instances, in order.
    pub fn snapshot(&self, handles: &[ProductHandle]) -> Vec<Product> {
        handles
            .iter()
            .filter_map(|h| self.records.get(h))
            .cloned()
            .collect()
    }

    /// Release a single instance.
    pub fn remove(&mut self, handle: ProductHandle) -> Option<Product> {
        self.records.remove(&handle)
    }

    /// Drop every instance not in `keep`.
    pub fn retain(&mut self, keep: &HashSet<ProductHandle>) {
        self.records.retain(|h, _| keep.contains(h));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Up to `limit` products of `kind`, excluding `exclude_id`, most expensive
/// first. Ties keep no particular order.
pub fn similar_products(
    mut products: Vec<Product>,
    kind: &str,
    exclude_id: &str,
    limit: usize,
) -> Vec<Product> {
    products.sort_unstable_by(|a, b| b.price.total_cmp(&a.price));
    products
        .into_iter()
        .filter(|p| p.id != exclude_id && p.kind == kind)
        .take(limit)
        .collect()
}

/// Category and search criteria for a product listing.
#[derive(Debug, Clone, Copy)]
pub struct CatalogFilter<'a> {
    /// Category to show, or [`ALL_CATEGORIES`].
    pub category: &'a str,
    /// Case-insensitive name fragment; empty matches everything.
    pub search: &'a str,
}

impl CatalogFilter<'_> {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category == ALL_CATEGORIES || product.kind == self.category;
        let search = self.search.trim();
        let search_ok =
            search.is_empty() || product.name.to_lowercase().contains(&search.to_lowercase());
        category_ok && search_ok
    }
}
