//! Application Context
//!
//! Cart/interest store and remote handle provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use campus_swap_core::{
    AuthClient, InterestCartStore, PostgrestConfig, PostgrestRemote, RemoteItemStore, UserContext,
};

use crate::storage::BrowserStorage;

pub type CartStore = InterestCartStore<BrowserStorage>;

/// Market-wide handles provided via context
#[derive(Clone, Copy)]
pub struct MarketContext {
    /// Cart and interested collections; every update persists a snapshot
    pub cart: RwSignal<CartStore, LocalStorage>,
    remote: StoredValue<Rc<dyn RemoteItemStore>, LocalStorage>,
    /// `None` in demo mode
    backend: StoredValue<Option<PostgrestConfig>>,
    /// Trigger to reload listings - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload listings - write
    set_reload_trigger: WriteSignal<u32>,
}

impl MarketContext {
    pub fn new(
        cart: CartStore,
        remote: Rc<dyn RemoteItemStore>,
        backend: Option<PostgrestConfig>,
    ) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            cart: RwSignal::new_local(cart),
            remote: StoredValue::new_local(remote),
            backend: StoredValue::new(backend),
            reload_trigger,
            set_reload_trigger,
        }
    }

    /// Trigger a reload of listings
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn remote(&self) -> Rc<dyn RemoteItemStore> {
        self.remote.get_value()
    }

    pub fn is_demo(&self) -> bool {
        self.backend.with_value(|backend| backend.is_none())
    }

    pub fn auth_client(&self) -> Option<AuthClient> {
        self.backend
            .with_value(|backend| backend.as_ref().and_then(|config| AuthClient::new(config).ok()))
    }

    /// Send remote calls as `user` (anonymous when `None`)
    ///
    /// Demo mode keeps its single in-memory remote.
    pub fn use_session(&self, user: Option<&UserContext>) {
        let Some(config) = self.backend.get_value() else {
            return;
        };
        match PostgrestRemote::new(&config) {
            Ok(remote) => {
                let remote = match user.and_then(|u| u.access_token.clone()) {
                    Some(token) => remote.with_access_token(token),
                    None => remote,
                };
                self.remote.set_value(Rc::new(remote));
            }
            Err(e) => warn!("could not rebuild remote client: {}", e),
        }
    }
}

pub fn use_market() -> MarketContext {
    expect_context::<MarketContext>()
}
