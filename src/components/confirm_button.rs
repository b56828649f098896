//! Confirm Button Component
//!
//! Inline two-step button for destructive actions (delete a listing, drop a
//! cart line, withdraw all requests).

use leptos::prelude::*;

/// Inline confirmation button
///
/// Shows `label` initially. When clicked, shows `prompt` with ✓/✗ buttons.
///
/// # Arguments
/// * `button_class` - CSS class for the initial button
/// * `label` - Text of the initial button
/// * `prompt` - Question shown while waiting for confirmation
/// * `on_confirm` - Callback to execute when the user confirms
#[component]
pub fn ConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "×".to_string())] label: String,
    #[prop(into, default = "Delete?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <Show when=move || !confirming.get()>
            <button
                class=button_class.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="confirm-inline">
                <span class="confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
