//! Cart View Component

use leptos::prelude::*;

use super::ConfirmButton;
use crate::actions;
use crate::context::use_market;
use crate::models::{format_price, CartEntry};

#[component]
pub fn CartView() -> impl IntoView {
    let ctx = use_market();

    let entries = move || ctx.cart.with(|store| store.cart().to_vec());
    let total = move || ctx.cart.with(|store| store.cart_total());

    view! {
        <div class="cart-view">
            <Show
                when=move || ctx.cart.with(|store| !store.cart().is_empty())
                fallback=|| view! { <p class="empty">"Your cart is empty."</p> }
            >
                <ul class="cart-list">
                    <For
                        each=entries
                        key=|entry: &CartEntry| (entry.item.id.clone(), entry.quantity)
                        children=move |entry: CartEntry| {
                            let item = StoredValue::new(entry.item.clone());
                            let on_remove = Callback::new(move |_| {
                                ctx.cart.update(|store| store.remove_from_cart(&item.with_value(|i| i.id.clone())));
                            });
                            view! {
                                <li class="cart-row">
                                    <span class="cart-name">{entry.item.name.clone()}</span>
                                    <span class="cart-qty">"× " {entry.quantity}</span>
                                    <span class="cart-line">{format_price(entry.line_total())}</span>
                                    <button class="qty-btn" on:click=move |_| actions::add_to_cart(ctx, item.get_value())>
                                        "+"
                                    </button>
                                    <ConfirmButton button_class="delete-btn" prompt="Remove?" on_confirm=on_remove />
                                </li>
                            }
                        }
                    />
                </ul>
                <div class="cart-footer">
                    <span class="cart-total">"Total: " {move || format_price(total())}</span>
                    <ConfirmButton
                        button_class="clear-btn"
                        label="Clear cart"
                        prompt="Empty the cart?"
                        on_confirm=Callback::new(move |_| ctx.cart.update(|store| store.clear_cart()))
                    />
                </div>
            </Show>
        </div>
    }
}
