//! Account Panel Component
//!
//! Sign-in form, or the signed-in user's session tools.

use leptos::prelude::*;

use crate::actions;
use crate::context::use_market;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AccountPanel() -> impl IntoView {
    let app = use_app_store();

    view! {
        <div class="account-panel">
            <Show when=move || app.session().with(|user| user.is_some()) fallback=|| view! { <SignInForm /> }>
                <SignedIn />
            </Show>
        </div>
    }
}

#[component]
fn SignedIn() -> impl IntoView {
    let ctx = use_market();
    let app = use_app_store();
    let (show_log, set_show_log) = signal(false);

    let user_field = move |f: fn(&crate::models::UserContext) -> String| {
        app.session().with(|user| user.as_ref().map(f).unwrap_or_default())
    };

    view! {
        <div class="signed-in">
            <p class="account-name">{move || user_field(|u| u.display_name.clone())}</p>
            <p class="account-contact">{move || user_field(|u| u.contact.clone())}</p>
            <div class="account-actions">
                <button
                    on:click=move |_| {
                        if let Some(user) = app.session().get_untracked() {
                            actions::reload_interest(ctx, user.user_id);
                        }
                    }
                >
                    "Refresh my requests"
                </button>
                <button class="sign-out-btn" on:click=move |_| actions::sign_out(ctx, app)>
                    "Sign out"
                </button>
                <button class="log-btn" on:click=move |_| set_show_log.update(|v| *v = !*v)>
                    "Diagnostics"
                </button>
            </div>
            <Show when=move || show_log.get()>
                <pre class="log-view">{console_logger::recent_lines().join("\n")}</pre>
            </Show>
        </div>
    }
}

#[component]
fn SignInForm() -> impl IntoView {
    let ctx = use_market();
    let app = use_app_store();
    let demo = ctx.is_demo();

    let (email, set_email) = signal(String::new());
    let (secret, set_secret) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        actions::sign_in(ctx, app, email.get_untracked(), secret.get_untracked());
        set_secret.set(String::new());
    };

    view! {
        <form class="sign-in-form" on:submit=submit>
            <input
                type="email"
                placeholder="Campus email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type=if demo { "text" } else { "password" }
                placeholder=if demo { "Display name" } else { "Password" }
                prop:value=move || secret.get()
                on:input=move |ev| set_secret.set(event_target_value(&ev))
            />
            <button type="submit">"Sign in"</button>
            {demo.then(|| view! {
                <p class="demo-hint">"Demo mode: any email works, nothing leaves this browser."</p>
            })}
        </form>
    }
}
