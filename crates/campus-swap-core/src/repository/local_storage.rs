//! In-memory local storage
//!
//! Clones share the same map, so a test can hand one clone to a store, drop
//! the store, and build a "reloaded" store from another clone.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::traits::{LocalStorage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any encoding
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
