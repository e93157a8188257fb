//! String key-value persistence for storefront UI preferences.
//!
//! The state manager only ever persists small string flags (the product
//! list layout), so the store speaks plain strings rather than JSON values.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_kv::{FileStore, KeyValueStore};
//!
//! let store = FileStore::open("prefs.json")?;
//! store.set("ngShopLayout", "list")?;
//! assert_eq!(store.get("ngShopLayout")?.as_deref(), Some("list"));
//! ```

mod error;
mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::KvError;
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// A persistent string key-value store.
///
/// Methods take `&self`; backends use interior mutability where they need it.
pub trait KeyValueStore {
    /// Get a value, or `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        (**self).delete(key)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KeyValueStore, KvError, MemoryStore};
}
