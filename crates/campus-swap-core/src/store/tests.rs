//! Store Tests
//!
//! Local collection behavior and the reconciliation policies, using
//! MemoryStorage and InMemoryRemote.

#[cfg(test)]
mod tests {
    use crate::domain::{Item, StoreError, SyncAction, UserContext};
    use crate::repository::snapshot::{CART_KEY, INTERESTED_KEY};
    use crate::repository::{InMemoryRemote, LocalStorage, MemoryStorage};
    use crate::store::{InterestCartStore, ReconciliationPolicy};

    fn user() -> UserContext {
        UserContext::new("u1", "Ana", "ana@campus.edu")
    }

    fn lamp() -> Item {
        Item::new("lamp", "Desk lamp").with_price(5.0)
    }

    fn kettle() -> Item {
        Item::new("kettle", "Kettle").with_price(2.5)
    }

    #[test]
    fn test_cart_keeps_insertion_order_and_updates_in_place() {
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_cart(lamp());
        store.add_to_cart(kettle());
        store.add_to_cart(lamp());

        let ids: Vec<&str> = store.cart().iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(ids, vec!["lamp", "kettle"]);
        assert_eq!(store.cart()[0].quantity, 2);
        assert_eq!(store.cart_quantity(), 3);
        assert_eq!(store.cart_total(), 12.5);
    }

    #[test]
    fn test_every_cart_mutation_is_persisted() {
        let storage = MemoryStorage::new();
        let mut store = InterestCartStore::new(storage.clone());
        store.add_to_cart(lamp());
        assert!(storage.get(CART_KEY).unwrap().contains("lamp"));

        store.remove_from_cart("lamp");
        let reloaded = InterestCartStore::new(storage.clone());
        assert!(reloaded.cart().is_empty());
    }

    #[test]
    fn test_duplicate_snapshot_entries_are_merged_on_load() {
        let storage = MemoryStorage::new();
        storage.insert_raw(
            CART_KEY,
            r#"[{"id":"lamp","quantity":2},{"id":"lamp","quantity":3},{"id":"kettle"}]"#,
        );
        storage.insert_raw(INTERESTED_KEY, r#"[{"id":"lamp","name":"first"},{"id":"lamp","name":"second"}]"#);

        let store = InterestCartStore::new(storage);
        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.cart()[0].quantity, 5);
        assert_eq!(store.interested().len(), 1);
        assert_eq!(store.interested()[0].item.name, "first");
    }

    #[tokio::test]
    async fn test_remove_from_interested_deletes_remote_request() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();
        assert_eq!(remote.requests().len(), 1);

        store.remove_from_interested("lamp", &user(), &remote).await.unwrap();
        assert!(!store.is_interested("lamp"));
        assert!(remote.requests().is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_interest_makes_no_remote_call() {
        let remote = InMemoryRemote::new();
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.remove_from_interested("nothing", &user(), &remote).await.unwrap();
        assert_eq!(remote.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_clear_interested_leaves_remote_alone() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();

        store.clear_interested();
        assert!(store.interested().is_empty());
        assert_eq!(remote.requests().len(), 1);

        store.load_interested_for_user("u1", &remote).await;
        assert!(store.is_interested("lamp"));
    }

    #[tokio::test]
    async fn test_withdraw_all_interest_cascades() {
        let remote = InMemoryRemote::with_items(vec![lamp(), kettle()]);
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();
        store.add_to_interested(kettle(), &user(), &remote).await.unwrap();

        let pending = store.withdraw_all_interest(&user());
        assert_eq!(pending.len(), 2);
        assert!(store.interested().is_empty());

        for write in pending {
            let outcome = write.run(&remote).await;
            store.settle(outcome).unwrap();
        }
        assert!(remote.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rollback_policy_undoes_failed_insert() {
        let remote = InMemoryRemote::new();
        remote.set_fail_writes(true);
        let mut store =
            InterestCartStore::with_policy(MemoryStorage::new(), ReconciliationPolicy::OptimisticWithRollback);

        let pending = store.begin_add_interested(lamp(), &user()).unwrap();
        assert!(store.is_interested("lamp"));

        let outcome = pending.run(&remote).await;
        let err = store.settle(outcome).unwrap_err();
        assert!(matches!(
            err,
            StoreError::RemoteWriteFailed { action: SyncAction::InsertRequest, .. }
        ));
        assert!(!store.is_interested("lamp"));
    }

    #[tokio::test]
    async fn test_rollback_policy_restores_failed_delete_at_its_position() {
        let remote = InMemoryRemote::with_items(vec![lamp(), kettle()]);
        let storage = MemoryStorage::new();
        let mut store =
            InterestCartStore::with_policy(storage.clone(), ReconciliationPolicy::OptimisticWithRollback);
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();
        store.add_to_interested(kettle(), &user(), &remote).await.unwrap();

        remote.set_fail_writes(true);
        let err = store.remove_from_interested("lamp", &user(), &remote).await;
        assert!(err.is_err());

        let ids: Vec<&str> = store.interested().iter().map(|e| e.item.id.as_str()).collect();
        assert_eq!(ids, vec!["lamp", "kettle"]);
        assert!(InterestCartStore::new(storage).is_interested("lamp"));
    }

    #[tokio::test]
    async fn test_late_failure_does_not_roll_back_newer_toggle() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store =
            InterestCartStore::with_policy(MemoryStorage::new(), ReconciliationPolicy::OptimisticWithRollback);

        // add, remove, add again before any remote write finishes
        let first_add = store.begin_add_interested(lamp(), &user()).unwrap();
        let remove = store.begin_remove_interested("lamp", &user()).unwrap();
        let second_add = store.begin_add_interested(lamp(), &user()).unwrap();
        assert!(store.is_interested("lamp"));

        remote.set_fail_writes(true);
        let outcome = first_add.run(&remote).await;
        assert!(store.settle(outcome).is_err());
        assert!(store.is_interested("lamp"));

        remote.set_fail_writes(false);
        let outcome = remove.run(&remote).await;
        store.settle(outcome).unwrap();
        let outcome = second_add.run(&remote).await;
        store.settle(outcome).unwrap();

        assert!(store.is_interested("lamp"));
        assert_eq!(remote.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_newest_failed_write_still_rolls_back() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store =
            InterestCartStore::with_policy(MemoryStorage::new(), ReconciliationPolicy::OptimisticWithRollback);

        let first_add = store.begin_add_interested(lamp(), &user()).unwrap();
        let remove = store.begin_remove_interested("lamp", &user()).unwrap();
        let second_add = store.begin_add_interested(lamp(), &user()).unwrap();

        let outcome = first_add.run(&remote).await;
        store.settle(outcome).unwrap();
        let outcome = remove.run(&remote).await;
        store.settle(outcome).unwrap();

        remote.set_fail_writes(true);
        let outcome = second_add.run(&remote).await;
        assert!(store.settle(outcome).is_err());

        assert!(!store.is_interested("lamp"));
        assert!(remote.requests().is_empty());
    }

    #[tokio::test]
    async fn test_re_adding_after_local_clear_succeeds() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();

        store.clear_interested();
        store
            .add_to_interested(lamp(), &user(), &remote)
            .await
            .expect("existing remote request must not fail the add");

        assert!(store.is_interested("lamp"));
        assert_eq!(remote.requests().len(), 1);
        assert_eq!(remote.write_calls(), 2);
    }

    #[tokio::test]
    async fn test_pessimistic_policy_waits_for_remote() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store = InterestCartStore::with_policy(MemoryStorage::new(), ReconciliationPolicy::Pessimistic);

        let pending = store.begin_add_interested(lamp(), &user()).unwrap();
        assert!(!store.is_interested("lamp"));

        let outcome = pending.run(&remote).await;
        assert!(outcome.is_ok());
        store.settle(outcome).unwrap();
        assert!(store.is_interested("lamp"));

        remote.set_fail_writes(true);
        assert!(store.remove_from_interested("lamp", &user(), &remote).await.is_err());
        assert!(store.is_interested("lamp"));
    }

    #[tokio::test]
    async fn test_load_skips_deleted_items_and_duplicates() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();
        // Request for an item that no longer exists remotely
        store.add_to_interested(kettle(), &user(), &remote).await.unwrap();

        let loaded = store.load_interested_for_user("u1", &remote).await;
        assert_eq!(loaded, 1);
        assert!(store.is_interested("lamp"));
        assert!(!store.is_interested("kettle"));
    }

    #[tokio::test]
    async fn test_failed_load_yields_empty_collection() {
        let remote = InMemoryRemote::with_items(vec![lamp()]);
        let mut store = InterestCartStore::new(MemoryStorage::new());
        store.add_to_interested(lamp(), &user(), &remote).await.unwrap();

        remote.set_fail_reads(true);
        assert_eq!(store.load_interested_for_user("u1", &remote).await, 0);
        assert!(store.interested().is_empty());
    }
}
