//! Post Item Form Component
//!
//! Form for listing a new item with a category selector.

use leptos::prelude::*;

use crate::actions::{self, notify};
use crate::context::use_market;
use crate::models::{parse_price, NewItem, NoticeKind, CATEGORIES};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PostItemForm() -> impl IntoView {
    let ctx = use_market();
    let app = use_app_store();

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (pickup, set_pickup) = signal(String::new());
    let (image_url, set_image_url) = signal(String::new());
    let (category, set_category) = signal(CATEGORIES[0].to_string());

    let reset = move || {
        set_name.set(String::new());
        set_description.set(String::new());
        set_price.set(String::new());
        set_pickup.set(String::new());
        set_image_url.set(String::new());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = app.session().get_untracked() else {
            notify(app, NoticeKind::Info, "Sign in to post an item");
            app.tab().set(crate::models::Tab::Account);
            return;
        };
        let price_value = match parse_price(&price.get_untracked()) {
            Ok(price) => price,
            Err(e) => {
                notify(app, NoticeKind::Error, e);
                return;
            }
        };
        let image_url = image_url.get_untracked().trim().to_string();
        let new_item = NewItem {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            price: price_value,
            category: category.get_untracked(),
            image_url: (!image_url.is_empty()).then_some(image_url),
            pickup_location: pickup.get_untracked().trim().to_string(),
            owner_id: user.user_id,
            owner_name: user.display_name,
        };
        actions::post_item(ctx, app, new_item, reset);
    };

    view! {
        <form class="post-item-form" on:submit=submit>
            <input
                type="text"
                placeholder="What are you giving away?"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Condition, size, anything useful..."
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <div class="post-row">
                <input
                    type="text"
                    placeholder="Price (blank = free)"
                    prop:value=move || price.get()
                    on:input=move |ev| set_price.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Pickup location"
                    prop:value=move || pickup.get()
                    on:input=move |ev| set_pickup.set(event_target_value(&ev))
                />
            </div>
            <input
                type="url"
                placeholder="Image URL (optional)"
                prop:value=move || image_url.get()
                on:input=move |ev| set_image_url.set(event_target_value(&ev))
            />

            <div class="type-selector-row">
                {CATEGORIES.iter().map(|value| {
                    let value = *value;
                    view! {
                        <button
                            type="button"
                            class=move || if category.get() == value { "type-btn small active" } else { "type-btn small" }
                            on:click=move |_| set_category.set(value.to_string())
                        >
                            {value}
                        </button>
                    }
                }).collect_view()}
            </div>

            <button type="submit">"Post"</button>
        </form>
    }
}
