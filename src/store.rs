//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Cart and interest
//! state live in [`crate::context::MarketContext`], which owns persistence.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Item, Notice, NoticeKind, Tab, UserContext};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Listings shown on the browse tab, newest first
    pub listings: Vec<Item>,
    /// Signed-in user, if any
    pub session: Option<UserContext>,
    pub notices: Vec<Notice>,
    pub next_notice_id: u32,
    pub tab: Tab,
    /// True while listings are being fetched
    pub loading: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Put a freshly posted listing at the top
pub fn store_add_listing(store: &AppStore, item: Item) {
    store.listings().write().insert(0, item);
}

/// Remove a listing by ID
pub fn store_remove_listing(store: &AppStore, item_id: &str) {
    store.listings().write().retain(|item| item.id != item_id);
}

/// Add a notice and return its ID
pub fn store_push_notice(store: &AppStore, kind: NoticeKind, message: String) -> u32 {
    let id = store.next_notice_id().get_untracked().wrapping_add(1);
    store.next_notice_id().set(id);
    store.notices().write().push(Notice { id, kind, message });
    id
}

/// Remove a notice by ID (no-op if already gone)
pub fn store_dismiss_notice(store: &AppStore, notice_id: u32) {
    store.notices().write().retain(|notice| notice.id != notice_id);
}
