//! Navigation Bar Component
//!
//! Tab buttons with live cart and interest counts.

use leptos::prelude::*;

use crate::context::use_market;
use crate::models::Tab;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let app = use_app_store();
    let ctx = use_market();

    let badge = move |tab: Tab| match tab {
        Tab::Cart => format!(" ({})", ctx.cart.with(|store| store.cart_quantity())),
        Tab::Interested => format!(" ({})", ctx.cart.with(|store| store.interested().len())),
        _ => String::new(),
    };

    view! {
        <nav class="nav-bar">
            {Tab::ALL.iter().map(|tab| {
                let tab = *tab;
                view! {
                    <button
                        class=move || if app.tab().get() == tab { "nav-btn active" } else { "nav-btn" }
                        on:click=move |_| app.tab().set(tab)
                    >
                        {tab.label()}
                        {move || badge(tab)}
                    </button>
                }
            }).collect_view()}
            <span class="nav-user">
                {move || {
                    app.session()
                        .get()
                        .map(|user| user.display_name)
                        .unwrap_or_else(|| "Not signed in".to_string())
                }}
            </span>
        </nav>
    }
}
