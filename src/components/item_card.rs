//! Item Card Component
//!
//! One listing: details, cart/interest buttons for shoppers, request list
//! and delete for the owner.

use leptos::prelude::*;

use super::ConfirmButton;
use crate::actions;
use crate::context::use_market;
use crate::models::{format_price, Item, Request};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ItemCard(item: Item) -> impl IntoView {
    let ctx = use_market();
    let app = use_app_store();

    let item = StoredValue::new(item);
    let item_id = item.with_value(|item| item.id.clone());
    let is_owner = Memo::new(move |_| {
        app.session()
            .with(|user| user.as_ref().is_some_and(|u| item.with_value(|item| item.is_owned_by(&u.user_id))))
    });
    let is_interested = {
        let item_id = item_id.clone();
        Memo::new(move |_| ctx.cart.with(|store| store.is_interested(&item_id)))
    };
    let (requests, set_requests) = signal(None::<Vec<Request>>);

    let on_delete = Callback::new(move |_| {
        actions::delete_listing(ctx, app, item.with_value(|item| item.id.clone()));
    });

    view! {
        <div class="item-card">
            <div class="item-card-header">
                <span class="item-name">{item.with_value(|item| item.name.clone())}</span>
                <span class=move || if item.with_value(Item::is_free) { "item-price free" } else { "item-price" }>
                    {item.with_value(|item| format_price(item.price))}
                </span>
            </div>
            {item.with_value(|item| item.image_url.clone()).map(|src| view! {
                <img class="item-image" src=src alt="" />
            })}
            <p class="item-description">{item.with_value(|item| item.description.clone())}</p>
            <div class="item-meta">
                <span class="item-category">{item.with_value(|item| item.category.clone())}</span>
                <span class="item-pickup">{item.with_value(|item| item.pickup_location.clone())}</span>
                <span class="item-owner">{item.with_value(|item| item.owner_name.clone())}</span>
            </div>

            <div class="item-actions">
                <Show
                    when=move || is_owner.get()
                    fallback=move || view! {
                        <button class="cart-btn" on:click=move |_| actions::add_to_cart(ctx, item.get_value())>
                            "Add to cart"
                        </button>
                        <button
                            class=move || if is_interested.get() { "interest-btn active" } else { "interest-btn" }
                            on:click=move |_| actions::toggle_interest(ctx, app, item.get_value())
                        >
                            {move || if is_interested.get() { "Interested ✓" } else { "I'm interested" }}
                        </button>
                    }
                >
                    <button
                        class="requests-btn"
                        on:click=move |_| {
                            if requests.get_untracked().is_some() {
                                set_requests.set(None);
                            } else {
                                let item_id = item.with_value(|item| item.id.clone());
                                actions::load_item_requests(ctx, app, item_id, set_requests);
                            }
                        }
                    >
                        "Who asked?"
                    </button>
                    <ConfirmButton
                        button_class="delete-btn"
                        label="Delete"
                        prompt="Delete listing?"
                        on_confirm=on_delete
                    />
                </Show>
            </div>

            {move || requests.get().map(|requests| view! { <RequestList requests=requests /> })}
        </div>
    }
}

/// People who asked for an owner's item
#[component]
fn RequestList(requests: Vec<Request>) -> impl IntoView {
    if requests.is_empty() {
        return view! { <p class="request-empty">"Nobody has asked yet."</p> }.into_any();
    }
    view! {
        <ul class="request-list">
            {requests.into_iter().map(|request| view! {
                <li class="request-row">
                    <span class="request-name">{request.requester_name}</span>
                    <span class="request-contact">{request.requester_contact}</span>
                </li>
            }).collect_view()}
        </ul>
    }
    .into_any()
}
