//! Store backed by Spin's key-value API.

use crate::{KeyValueStore, KvError};

/// A store backed by a Spin key-value store.
pub struct SpinStore {
    store: spin_sdk::key_value::Store,
}

impl SpinStore {
    /// Open the default key-value store.
    pub fn open_default() -> Result<Self, KvError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| KvError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named key-value store.
    pub fn open(name: &str) -> Result<Self, KvError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| KvError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }
}

impl KeyValueStore for SpinStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| KvError::StoreError(format!("{}: {}", key, e))),
            Ok(None) => Ok(None),
            Err(e) => Err(KvError::StoreError(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.store
            .set(key, value.as_bytes())
            .map_err(|e| KvError::StoreError(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        self.store
            .delete(key)
            .map_err(|e| KvError::StoreError(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.store
            .exists(key)
            .map_err(|e| KvError::StoreError(e.to_string()))
    }
}
