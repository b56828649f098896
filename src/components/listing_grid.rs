//! Listing Grid Component
//!
//! Browse tab: text search and a free-only filter over the loaded listings.

use leptos::prelude::*;

use super::ItemCard;
use crate::context::use_market;
use crate::models::Item;
use crate::store::{use_app_store, AppStateStoreFields};

fn matches(item: &Item, query: &str, free_only: bool) -> bool {
    if free_only && !item.is_free() {
        return false;
    }
    if query.is_empty() {
        return true;
    }
    [&item.name, &item.description, &item.category, &item.pickup_location]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

#[component]
pub fn ListingGrid() -> impl IntoView {
    let app = use_app_store();
    let ctx = use_market();

    let (query, set_query) = signal(String::new());
    let (free_only, set_free_only) = signal(false);

    let visible = move || {
        let query = query.get().trim().to_lowercase();
        let free_only = free_only.get();
        app.listings()
            .get()
            .into_iter()
            .filter(|item| matches(item, &query, free_only))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="listing-view">
            <div class="listing-filters">
                <input
                    type="search"
                    placeholder="Search listings..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <label class="free-filter">
                    <input
                        type="checkbox"
                        prop:checked=move || free_only.get()
                        on:change=move |ev| set_free_only.set(event_target_checked(&ev))
                    />
                    "Free only"
                </label>
                <button class="refresh-btn" on:click=move |_| ctx.reload()>"Refresh"</button>
            </div>

            <Show when=move || app.loading().get()>
                <p class="loading">"Loading listings..."</p>
            </Show>

            <div class="listing-grid">
                <For
                    each=visible
                    key=|item: &Item| item.id.clone()
                    children=|item: Item| view! { <ItemCard item=item /> }
                />
            </div>

            <Show when=move || !app.loading().get() && visible().is_empty()>
                <p class="empty">"No listings match."</p>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_filters() {
        let mut lamp = Item::new("1", "Desk lamp");
        lamp.pickup_location = "North Hall".to_string();
        let desk = Item::new("2", "Desk").with_price(20.0);

        assert!(matches(&lamp, "", false));
        assert!(matches(&lamp, "north", false));
        assert!(matches(&desk, "desk", false));
        assert!(!matches(&desk, "desk", true));
        assert!(matches(&lamp, "desk", true));
        assert!(!matches(&lamp, "sofa", false));
    }
}
