//! Interest/Cart Store
//!
//! Owns the cart and interested collections, keeps both durable in local
//! storage, and keeps "interested" consistent with the user's remote
//! requests.
//!
//! Every mutation writes a full snapshot of the touched collection. Interest
//! mutations follow the store's [`ReconciliationPolicy`]; under the default
//! policy the local change is immediate and is kept even if the remote write
//! fails.

mod policy;
mod sync;

#[cfg(test)]
mod tests;

pub use policy::{ReconciliationPolicy, StoreConfig};
pub use sync::{PendingSync, SyncOutcome};

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::domain::{
    position_of, CartEntry, Entity, InterestEntry, InterestRow, Item, RemoteResult, StoreError,
    SyncAction, UserContext,
};
use crate::repository::snapshot::{self, CART_KEY, INTERESTED_KEY};
use crate::repository::{LocalStorage, RemoteItemStore};

pub struct InterestCartStore<S: LocalStorage> {
    storage: S,
    cart: Vec<CartEntry>,
    interested: Vec<InterestEntry>,
    policy: ReconciliationPolicy,
    /// Sequence number of the newest unsettled write per item id
    latest_write: HashMap<String, u64>,
    next_seq: u64,
}

impl<S: LocalStorage> InterestCartStore<S> {
    /// Load both collections from `storage` with the default policy
    pub fn new(storage: S) -> Self {
        Self::with_policy(storage, ReconciliationPolicy::default())
    }

    pub fn with_policy(storage: S, policy: ReconciliationPolicy) -> Self {
        let cart = merge_cart(snapshot::load(&storage, CART_KEY));
        let interested = dedupe(snapshot::load(&storage, INTERESTED_KEY));
        debug!(
            "store loaded: {} cart entries, {} interested",
            cart.len(),
            interested.len()
        );
        Self {
            storage,
            cart,
            interested,
            policy,
            latest_write: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> ReconciliationPolicy {
        self.policy
    }

    pub fn cart(&self) -> &[CartEntry] {
        &self.cart
    }

    pub fn interested(&self) -> &[InterestEntry] {
        &self.interested
    }

    /// Sum of quantities over the cart
    pub fn cart_quantity(&self) -> u32 {
        self.cart.iter().map(|entry| entry.quantity).sum()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(CartEntry::line_total).sum()
    }

    // ========================
    // Cart
    // ========================

    pub fn add_to_cart(&mut self, item: Item) {
        match position_of(&self.cart, &item.id) {
            Some(index) => {
                let entry = &mut self.cart[index];
                entry.quantity = entry.quantity.saturating_add(1);
            }
            None => self.cart.push(CartEntry::new(item)),
        }
        self.persist_cart();
    }

    pub fn remove_from_cart(&mut self, item_id: &str) {
        let before = self.cart.len();
        self.cart.retain(|entry| entry.id() != item_id);
        if self.cart.len() != before {
            self.persist_cart();
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    // ========================
    // Interested
    // ========================

    pub fn is_interested(&self, item_id: &str) -> bool {
        position_of(&self.interested, item_id).is_some()
    }

    /// Empty the local collection only; remote requests stay untouched.
    /// Use [`Self::withdraw_all_interest`] to delete them as well.
    pub fn clear_interested(&mut self) {
        self.interested.clear();
        self.persist_interested();
    }

    /// Start marking `item` as wanted by `user`
    ///
    /// Returns `None` when the item is already interested (no-op). Otherwise
    /// the returned write must be run and its outcome passed to
    /// [`Self::settle`].
    pub fn begin_add_interested(&mut self, item: Item, user: &UserContext) -> Option<PendingSync> {
        if self.is_interested(&item.id) {
            return None;
        }
        let index = self.interested.len();
        let seq = self.claim_seq(&item.id);
        if self.policy.mutates_before_remote() {
            self.interested.push(InterestEntry::new(item.clone()));
            self.persist_interested();
        }
        Some(PendingSync::insert(item, user, index, seq))
    }

    /// Start withdrawing interest in `item_id`; `None` if it is not interested
    pub fn begin_remove_interested(&mut self, item_id: &str, user: &UserContext) -> Option<PendingSync> {
        let index = position_of(&self.interested, item_id)?;
        let item = self.interested[index].item.clone();
        let seq = self.claim_seq(&item.id);
        if self.policy.mutates_before_remote() {
            self.interested.remove(index);
            self.persist_interested();
        }
        Some(PendingSync::delete(item, user, index, seq))
    }

    /// Withdraw every interested item, returning one remote delete per item
    pub fn withdraw_all_interest(&mut self, user: &UserContext) -> Vec<PendingSync> {
        let ids: Vec<String> = self.interested.iter().map(|entry| entry.item.id.clone()).collect();
        ids.iter()
            .filter_map(|id| self.begin_remove_interested(id, user))
            .collect()
    }

    /// Fold a finished remote write back into local state
    ///
    /// A failed write is reported exactly once, as the returned error. Only
    /// the newest write for an item may roll back; an older one that fails
    /// late leaves the newer local state alone.
    pub fn settle(&mut self, outcome: SyncOutcome) -> Result<(), StoreError> {
        let SyncOutcome { pending, result } = outcome;
        let current = self.release_seq(&pending);
        match result {
            Ok(()) => {
                if !self.policy.mutates_before_remote() {
                    self.apply(&pending);
                }
                debug!("{} confirmed for item {}", pending.action(), pending.item().id);
                Ok(())
            }
            Err(source) => {
                if self.policy == ReconciliationPolicy::OptimisticWithRollback {
                    if current {
                        self.revert(&pending);
                    } else {
                        debug!(
                            "{} for item {} superseded, not rolled back",
                            pending.action(),
                            pending.item().id
                        );
                    }
                }
                warn!(
                    "{} failed for item {}: {}",
                    pending.action(),
                    pending.item().id,
                    source
                );
                Err(StoreError::RemoteWriteFailed {
                    action: pending.action(),
                    item_id: pending.item().id.clone(),
                    source,
                })
            }
        }
    }

    pub async fn add_to_interested<R>(
        &mut self,
        item: Item,
        user: &UserContext,
        remote: &R,
    ) -> Result<(), StoreError>
    where
        R: RemoteItemStore + ?Sized,
    {
        match self.begin_add_interested(item, user) {
            Some(pending) => {
                let outcome = pending.run(remote).await;
                self.settle(outcome)
            }
            None => Ok(()),
        }
    }

    pub async fn remove_from_interested<R>(
        &mut self,
        item_id: &str,
        user: &UserContext,
        remote: &R,
    ) -> Result<(), StoreError>
    where
        R: RemoteItemStore + ?Sized,
    {
        match self.begin_remove_interested(item_id, user) {
            Some(pending) => {
                let outcome = pending.run(remote).await;
                self.settle(outcome)
            }
            None => Ok(()),
        }
    }

    /// Replace the interested collection with the user's remote requests
    ///
    /// Returns the number of entries loaded. A failed read yields an empty
    /// collection and is only logged.
    pub async fn load_interested_for_user<R>(&mut self, user_id: &str, remote: &R) -> usize
    where
        R: RemoteItemStore + ?Sized,
    {
        let result = remote.fetch_requests_for_user(user_id).await;
        self.apply_loaded_interest(user_id, result)
    }

    /// Second half of [`Self::load_interested_for_user`] for callers that ran
    /// the fetch themselves
    pub fn apply_loaded_interest(
        &mut self,
        user_id: &str,
        result: RemoteResult<Vec<InterestRow>>,
    ) -> usize {
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!("{}", StoreError::RemoteReadFailed(e));
                Vec::new()
            }
        };

        let mut entries: Vec<InterestEntry> = Vec::with_capacity(rows.len());
        for row in rows {
            let requester = &row.request.requester_id;
            if !requester.is_empty() && requester != user_id {
                debug!("skipping request {} of another user", row.request.id);
                continue;
            }
            let Some(item) = row.item else {
                debug!("request {} points at a deleted item", row.request.id);
                continue;
            };
            if position_of(&entries, &item.id).is_none() {
                entries.push(InterestEntry::new(item));
            }
        }

        info!("loaded {} interested items for {}", entries.len(), user_id);
        self.interested = entries;
        self.persist_interested();
        self.interested.len()
    }

    fn claim_seq(&mut self, item_id: &str) -> u64 {
        self.next_seq += 1;
        self.latest_write.insert(item_id.to_string(), self.next_seq);
        self.next_seq
    }

    /// Forget `pending` as the newest write for its item; true if it was
    fn release_seq(&mut self, pending: &PendingSync) -> bool {
        let id = &pending.item().id;
        let current = self.latest_write.get(id) == Some(&pending.seq());
        if current {
            self.latest_write.remove(id);
        }
        current
    }

    fn apply(&mut self, pending: &PendingSync) {
        match pending.action() {
            SyncAction::InsertRequest => {
                if !self.is_interested(&pending.item().id) {
                    self.interested.push(InterestEntry::new(pending.item().clone()));
                }
            }
            SyncAction::DeleteRequest => {
                let id = &pending.item().id;
                self.interested.retain(|entry| entry.id() != id);
            }
        }
        self.persist_interested();
    }

    fn revert(&mut self, pending: &PendingSync) {
        match pending.action() {
            SyncAction::InsertRequest => {
                let id = &pending.item().id;
                self.interested.retain(|entry| entry.id() != id);
            }
            SyncAction::DeleteRequest => {
                if !self.is_interested(&pending.item().id) {
                    let index = pending.index().min(self.interested.len());
                    self.interested.insert(index, InterestEntry::new(pending.item().clone()));
                }
            }
        }
        self.persist_interested();
    }

    fn persist_cart(&self) {
        snapshot::save(&self.storage, CART_KEY, &self.cart);
    }

    fn persist_interested(&self) {
        snapshot::save(&self.storage, INTERESTED_KEY, &self.interested);
    }
}

/// Merge duplicate cart lines, summing quantities
fn merge_cart(entries: Vec<CartEntry>) -> Vec<CartEntry> {
    let mut merged: Vec<CartEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match position_of(&merged, entry.id()) {
            Some(index) => {
                merged[index].quantity = merged[index].quantity.saturating_add(entry.quantity)
            }
            None => merged.push(entry),
        }
    }
    merged
}

/// Keep the first entry for each id
fn dedupe<T: Entity>(entries: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(entries.len());
    for entry in entries {
        if position_of(&unique, entry.id()).is_none() {
            unique.push(entry);
        }
    }
    unique
}
