//! App Configuration
//!
//! Read once at startup from `window.__CAMPUS_SWAP__`, which the hosting page
//! sets before loading the wasm bundle:
//!
//! ```js
//! window.__CAMPUS_SWAP__ = { url: "https://xyz.supabase.co", anon_key: "...", policy: "optimistic-no-rollback" };
//! ```
//!
//! Without it the app runs in demo mode against seeded in-memory data.

use chrono::{Duration, Utc};
use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsValue;

use campus_swap_core::{InMemoryRemote, Item, PostgrestConfig, ReconciliationPolicy, StoreConfig};

const CONFIG_GLOBAL: &str = "__CAMPUS_SWAP__";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// `None` means demo mode
    pub backend: Option<PostgrestConfig>,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    anon_key: Option<String>,
    #[serde(default)]
    policy: ReconciliationPolicy,
}

impl RawConfig {
    fn into_config(self) -> AppConfig {
        let backend = match (self.url, self.anon_key) {
            (Some(url), Some(anon_key)) => match (PostgrestConfig { url, anon_key }).validate() {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("ignoring backend config: {}", e);
                    None
                }
            },
            _ => None,
        };
        AppConfig {
            backend,
            store: StoreConfig { policy: self.policy },
        }
    }
}

pub fn load_config() -> AppConfig {
    let Some(window) = web_sys::window() else {
        return AppConfig::default();
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        info!("no backend configured, running in demo mode");
        return AppConfig::default();
    }
    match serde_wasm_bindgen::from_value::<RawConfig>(value) {
        Ok(raw) => raw.into_config(),
        Err(e) => {
            warn!("could not read {}: {}", CONFIG_GLOBAL, e);
            AppConfig::default()
        }
    }
}

/// Seeded remote for demo mode
pub fn demo_remote() -> InMemoryRemote {
    let now = Utc::now();
    let listing = |id: &str, name: &str, price: f64, category: &str, place: &str, hours: i64| {
        let mut item = Item::new(id, name)
            .with_price(price)
            .with_owner("demo-owner", "Campus Swap");
        item.category = category.to_string();
        item.pickup_location = place.to_string();
        item.created_at = Some(now - Duration::hours(hours));
        item
    };
    InMemoryRemote::with_items(vec![
        listing("demo-1", "IKEA desk lamp", 0.0, "Furniture", "North Hall lobby", 1),
        listing("demo-2", "Intro to Algorithms (3rd ed.)", 15.0, "Books", "Library steps", 5),
        listing("demo-3", "Electric kettle", 5.0, "Kitchen", "West dorm kitchen", 12),
        listing("demo-4", "Winter jacket (M)", 0.0, "Clothing", "Student union", 30),
    ])
}
