//! Browser Local Storage
//!
//! `window.localStorage` behind the core's storage trait. When the browser
//! refuses storage (private mode, disabled cookies) the app keeps working
//! against an in-memory map that does not survive a reload.

use log::warn;

use campus_swap_core::repository::snapshot::SESSION_KEY;
use campus_swap_core::{LocalStorage as DurableStorage, MemoryStorage, StorageError, UserContext};

#[derive(Clone)]
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
    fallback: MemoryStorage,
}

impl BrowserStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable, state will not survive a reload");
        }
        Self {
            storage,
            fallback: MemoryStorage::new(),
        }
    }
}

impl DurableStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(|e| StorageError {
                key: key.to_string(),
                reason: format!("{:?}", e),
            }),
            None => self.fallback.set(key, value),
        }
    }
}

/// Signed-in user from a previous visit
pub fn load_session() -> Option<UserContext> {
    let raw = BrowserStorage::open().get(SESSION_KEY)?;
    serde_json::from_str::<Option<UserContext>>(&raw).ok().flatten()
}

pub fn save_session(user: Option<&UserContext>) {
    let encoded = match serde_json::to_string(&user) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("could not encode session: {}", e);
            return;
        }
    };
    if let Err(e) = BrowserStorage::open().set(SESSION_KEY, &encoded) {
        warn!("{}", e);
    }
}
