//! Notice Bar Component
//!
//! Stack of dismissable info/error messages.

use leptos::prelude::*;

use crate::models::{Notice, NoticeKind};
use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let app = use_app_store();

    view! {
        <div class="notice-bar">
            <For
                each=move || app.notices().get()
                key=|notice: &Notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Info => "notice info",
                        NoticeKind::Error => "notice error",
                    };
                    let message = notice.message;
                    view! {
                        <div class=class>
                            <span class="notice-message">{message}</span>
                            <button class="notice-close" on:click=move |_| store_dismiss_notice(&app, id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
