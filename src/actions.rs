//! UI Actions
//!
//! Event-handler glue between components, the cart/interest store and the
//! remote. Local state changes happen synchronously; remote calls run with
//! `spawn_local` and report failures as notices.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use chrono::Utc;
use log::{info, warn};

use campus_swap_core::{RemoteItemStore, RemoteResult};

use crate::context::MarketContext;
use crate::models::{Item, NewItem, NoticeKind, Request, Tab, UserContext};
use crate::storage;
use crate::store::{
    store_add_listing, store_dismiss_notice, store_push_notice, store_remove_listing, AppStateStoreFields,
    AppStore,
};

const NOTICE_TIMEOUT_MS: u32 = 4_000;

// ========================
// Notices
// ========================

/// Show a notice that dismisses itself
pub fn notify(app: AppStore, kind: NoticeKind, message: impl Into<String>) {
    let id = store_push_notice(&app, kind, message.into());
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
        store_dismiss_notice(&app, id);
    });
}

/// Current user, or a prompt to sign in
fn require_user(app: AppStore, reason: &str) -> Option<UserContext> {
    let user = app.session().get_untracked();
    if user.is_none() {
        notify(app, NoticeKind::Info, format!("Sign in to {}", reason));
        app.tab().set(Tab::Account);
    }
    user
}

// ========================
// Listings
// ========================

pub fn load_listings(ctx: MarketContext, app: AppStore) {
    app.loading().set(true);
    spawn_local(async move {
        let remote = ctx.remote();
        match remote.list_items().await {
            Ok(items) => {
                info!("loaded {} listings", items.len());
                app.listings().set(items);
            }
            Err(e) => notify(app, NoticeKind::Error, format!("Could not load listings: {}", e)),
        }
        app.loading().set(false);
    });
}

/// Create `new_item` remotely; `on_posted` runs only when it was accepted
async fn create_listing<R>(remote: &R, new_item: &NewItem, on_posted: impl FnOnce()) -> RemoteResult<Item>
where
    R: RemoteItemStore + ?Sized,
{
    new_item.validate()?;
    let item = remote.create_item(new_item).await?;
    on_posted();
    Ok(item)
}

/// Create a listing; the form is reset through `on_posted` only on success
pub fn post_item(ctx: MarketContext, app: AppStore, new_item: NewItem, on_posted: impl FnOnce() + 'static) {
    if let Err(e) = new_item.validate() {
        notify(app, NoticeKind::Error, e.to_string());
        return;
    }
    spawn_local(async move {
        let remote = ctx.remote();
        match create_listing(remote.as_ref(), &new_item, on_posted).await {
            Ok(item) => {
                notify(app, NoticeKind::Info, format!("Posted \"{}\"", item.name));
                store_add_listing(&app, item);
                app.tab().set(Tab::Browse);
            }
            Err(e) => notify(app, NoticeKind::Error, format!("Could not post item: {}", e)),
        }
    });
}

pub fn delete_listing(ctx: MarketContext, app: AppStore, item_id: String) {
    let Some(user) = require_user(app, "manage your listings") else {
        return;
    };
    spawn_local(async move {
        let remote = ctx.remote();
        match remote.delete_item(&item_id, &user.user_id).await {
            Ok(()) => {
                store_remove_listing(&app, &item_id);
                ctx.cart.update(|store| store.remove_from_cart(&item_id));
                notify(app, NoticeKind::Info, "Listing removed");
            }
            Err(e) => notify(app, NoticeKind::Error, format!("Could not remove listing: {}", e)),
        }
    });
}

/// Fetch who asked for one of the user's own items
pub fn load_item_requests(
    ctx: MarketContext,
    app: AppStore,
    item_id: String,
    set_requests: WriteSignal<Option<Vec<Request>>>,
) {
    spawn_local(async move {
        let remote = ctx.remote();
        match remote.fetch_requests_for_item(&item_id).await {
            Ok(requests) => set_requests.set(Some(requests)),
            Err(e) => notify(app, NoticeKind::Error, format!("Could not load requests: {}", e)),
        }
    });
}

// ========================
// Cart / Interest
// ========================

pub fn add_to_cart(ctx: MarketContext, item: Item) {
    ctx.cart.update(|store| store.add_to_cart(item));
}

/// Mark or unmark interest; the local change is visible immediately
pub fn toggle_interest(ctx: MarketContext, app: AppStore, item: Item) {
    let Some(user) = require_user(app, "request items") else {
        return;
    };
    let interested = ctx.cart.with_untracked(|store| store.is_interested(&item.id));
    let pending = if interested {
        ctx.cart
            .try_update(|store| store.begin_remove_interested(&item.id, &user))
    } else {
        ctx.cart.try_update(|store| store.begin_add_interested(item, &user))
    };
    let Some(pending) = pending.flatten() else {
        return;
    };

    let remote = ctx.remote();
    spawn_local(async move {
        let outcome = pending.run(remote.as_ref()).await;
        if let Some(Err(e)) = ctx.cart.try_update(|store| store.settle(outcome)) {
            notify(app, NoticeKind::Error, e.to_string());
        }
    });
}

/// Withdraw every request, locally and remotely
pub fn withdraw_all(ctx: MarketContext, app: AppStore) {
    let Some(user) = require_user(app, "manage requests") else {
        return;
    };
    let pending = ctx
        .cart
        .try_update(|store| store.withdraw_all_interest(&user))
        .unwrap_or_default();
    if pending.is_empty() {
        return;
    }

    let remote = ctx.remote();
    spawn_local(async move {
        let mut failed = 0;
        for write in pending {
            let outcome = write.run(remote.as_ref()).await;
            if let Some(Err(_)) = ctx.cart.try_update(|store| store.settle(outcome)) {
                failed += 1;
            }
        }
        if failed > 0 {
            notify(app, NoticeKind::Error, format!("{} requests could not be withdrawn", failed));
        }
    });
}

/// Replace local interest with the user's remote requests
pub fn reload_interest(ctx: MarketContext, user_id: String) {
    spawn_local(async move {
        let remote = ctx.remote();
        let result = remote.fetch_requests_for_user(&user_id).await;
        ctx.cart.update(|store| {
            store.apply_loaded_interest(&user_id, result);
        });
    });
}

// ========================
// Session
// ========================

/// Sign in; in demo mode `secret` is used as the display name
pub fn sign_in(ctx: MarketContext, app: AppStore, email: String, secret: String) {
    let email = email.trim().to_string();
    if email.is_empty() {
        notify(app, NoticeKind::Error, "Email is required");
        return;
    }
    spawn_local(async move {
        let result = match ctx.auth_client() {
            Some(auth) => auth.sign_in_with_password(&email, &secret).await,
            None => Ok(demo_user(&email, &secret)),
        };
        match result {
            Ok(user) => {
                notify(app, NoticeKind::Info, format!("Signed in as {}", user.display_name));
                start_session(ctx, app, user);
            }
            Err(e) => notify(app, NoticeKind::Error, format!("Sign-in failed: {}", e)),
        }
    });
}

fn demo_user(email: &str, name: &str) -> UserContext {
    let name = if name.trim().is_empty() {
        email.split('@').next().unwrap_or(email)
    } else {
        name.trim()
    };
    UserContext::new(format!("demo:{}", email.to_lowercase()), name, email)
}

fn start_session(ctx: MarketContext, app: AppStore, user: UserContext) {
    storage::save_session(Some(&user));
    ctx.use_session(Some(&user));
    let user_id = user.user_id.clone();
    app.session().set(Some(user));
    reload_interest(ctx, user_id);
}

/// Pick up the session saved by a previous visit
///
/// An expired session is refreshed first; one that cannot be refreshed is
/// dropped, leaving the local interest list as it was.
pub fn restore_session(ctx: MarketContext, app: AppStore) {
    let Some(user) = storage::load_session() else {
        return;
    };
    info!("restoring session for {}", user.user_id);
    let Some(auth) = ctx.auth_client() else {
        if user.is_expired_at(Utc::now()) {
            drop_expired_session(app);
        } else {
            start_session(ctx, app, user);
        }
        return;
    };
    spawn_local(async move {
        match auth.resume(user).await {
            Ok(user) => start_session(ctx, app, user),
            Err(e) => {
                warn!("could not restore session: {}", e);
                drop_expired_session(app);
            }
        }
    });
}

fn drop_expired_session(app: AppStore) {
    storage::save_session(None);
    notify(app, NoticeKind::Info, "Your session expired, please sign in again");
}

/// Forget the user; their interest list is cleared on this device only
pub fn sign_out(ctx: MarketContext, app: AppStore) {
    storage::save_session(None);
    ctx.use_session(None);
    app.session().set(None);
    ctx.cart.update(|store| store.clear_interested());
    notify(app, NoticeKind::Info, "Signed out");
}
