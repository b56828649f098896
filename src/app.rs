//! Campus Swap Frontend App
//!
//! Root component: builds the stores, provides context, switches tabs.

use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use reactive_stores::Store;

use campus_swap_core::{InterestCartStore, PostgrestRemote, RemoteItemStore};

use crate::actions;
use crate::components::{AccountPanel, CartView, InterestedList, ListingGrid, NavBar, NoticeBar, PostItemForm};
use crate::config::{demo_remote, load_config};
use crate::context::MarketContext;
use crate::models::Tab;
use crate::storage::BrowserStorage;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    let cart = InterestCartStore::with_policy(BrowserStorage::open(), config.store.policy);
    info!(
        "loaded {} cart lines and {} interested items",
        cart.cart().len(),
        cart.interested().len()
    );

    let remote: Rc<dyn RemoteItemStore> = match config.backend.as_ref().map(PostgrestRemote::new) {
        Some(Ok(remote)) => Rc::new(remote),
        Some(Err(e)) => {
            log::warn!("backend unusable ({}), falling back to demo data", e);
            Rc::new(demo_remote())
        }
        None => Rc::new(demo_remote()),
    };

    let ctx = MarketContext::new(cart, remote, config.backend);
    let app = Store::new(AppState::default());
    provide_context(ctx);
    provide_context(app);

    actions::restore_session(ctx, app);

    // Load listings on mount and whenever a reload is requested
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        actions::load_listings(ctx, app);
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Campus Swap"</h1>
                {ctx.is_demo().then(|| view! { <span class="demo-badge">"demo"</span> })}
            </header>
            <NavBar />
            <NoticeBar />
            <main class="main-content">
                {move || match app.tab().get() {
                    Tab::Browse => view! { <ListingGrid /> }.into_any(),
                    Tab::Cart => view! { <CartView /> }.into_any(),
                    Tab::Interested => view! { <InterestedList /> }.into_any(),
                    Tab::Post => view! { <PostItemForm /> }.into_any(),
                    Tab::Account => view! { <AccountPanel /> }.into_any(),
                }}
            </main>
        </div>
    }
}
