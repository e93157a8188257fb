//! In-process store, lost when dropped.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{KeyValueStore, KvError};

/// A store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RefCell::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("ngShopLayout").unwrap(), None);

        store.set("ngShopLayout", "grid").unwrap();
        store.set("ngShopLayout", "list").unwrap();
        assert_eq!(store.get("ngShopLayout").unwrap().as_deref(), Some("list"));
        assert!(store.exists("ngShopLayout").unwrap());

        store.delete("ngShopLayout").unwrap();
        store.delete("ngShopLayout").unwrap();
        assert!(!store.exists("ngShopLayout").unwrap());
    }

    #[test]
    fn test_seeded_entries() {
        let store = MemoryStore::with_entries([("ngShopLayout", "list")]);
        assert_eq!(store.get("ngShopLayout").unwrap().as_deref(), Some("list"));
    }
}
