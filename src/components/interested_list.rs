//! Interested List Component
//!
//! Items the user has requested, with per-item withdraw and two clearing
//! modes: this device only, or withdraw everything remotely too.

use leptos::prelude::*;

use super::ConfirmButton;
use crate::actions;
use crate::context::use_market;
use crate::models::{format_price, InterestEntry};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn InterestedList() -> impl IntoView {
    let ctx = use_market();
    let app = use_app_store();

    let entries = move || ctx.cart.with(|store| store.interested().to_vec());

    view! {
        <div class="interested-view">
            <Show
                when=move || ctx.cart.with(|store| !store.interested().is_empty())
                fallback=|| view! { <p class="empty">"You haven't requested anything yet."</p> }
            >
                <ul class="interested-list">
                    <For
                        each=entries
                        key=|entry: &InterestEntry| entry.item.id.clone()
                        children=move |entry: InterestEntry| {
                            let item = StoredValue::new(entry.item.clone());
                            view! {
                                <li class="interested-row">
                                    <span class="interested-name">{entry.item.name.clone()}</span>
                                    <span class="interested-price">{format_price(entry.item.price)}</span>
                                    <span class="interested-pickup">{entry.item.pickup_location.clone()}</span>
                                    <button
                                        class="withdraw-btn"
                                        on:click=move |_| actions::toggle_interest(ctx, app, item.get_value())
                                    >
                                        "Withdraw"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
                <div class="interested-footer">
                    <ConfirmButton
                        button_class="clear-btn"
                        label="Clear on this device"
                        prompt="Forget locally? Owners still see your requests."
                        on_confirm=Callback::new(move |_| ctx.cart.update(|store| store.clear_interested()))
                    />
                    <ConfirmButton
                        button_class="withdraw-all-btn"
                        label="Withdraw all"
                        prompt="Withdraw every request?"
                        on_confirm=Callback::new(move |_| actions::withdraw_all(ctx, app))
                    />
                </div>
            </Show>
            <Show when=move || app.session().with(|user| user.is_some())>
                <button
                    class="refresh-btn"
                    on:click=move |_| {
                        if let Some(user) = app.session().get_untracked() {
                            actions::reload_interest(ctx, user.user_id);
                        }
                    }
                >
                    "Reload from server"
                </button>
            </Show>
        </div>
    }
}
