//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces the store is written against.
//! Implementations can use the browser, HTTP, in-memory maps, etc.

use async_trait::async_trait;
use std::rc::Rc;
use thiserror::Error;

use crate::domain::{InterestRow, Item, NewItem, NewRequest, Request, RemoteResult};

/// Failure to write to durable local storage (quota, disabled storage)
#[derive(Debug, Error)]
#[error("local storage write failed for key {key}: {reason}")]
pub struct StorageError {
    pub key: String,
    pub reason: String,
}

/// Durable string key-value storage scoped to one origin
///
/// No transactionality is assumed across keys.
pub trait LocalStorage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Hosted relational store holding items and requests
///
/// Futures are not `Send`: the browser runtime is single-threaded and the
/// HTTP client there is built on `fetch`.
#[async_trait(?Send)]
pub trait RemoteItemStore {
    /// All listings, newest first
    async fn list_items(&self) -> RemoteResult<Vec<Item>>;

    async fn fetch_items_by_ids(&self, ids: &[String]) -> RemoteResult<Vec<Item>>;

    /// Post a listing and return it as stored
    async fn create_item(&self, item: &NewItem) -> RemoteResult<Item>;

    /// Delete a listing; only matches when `owner_id` owns it
    async fn delete_item(&self, item_id: &str, owner_id: &str) -> RemoteResult<()>;

    async fn insert_request(&self, request: &NewRequest) -> RemoteResult<()>;

    /// Delete every request for (item, user)
    async fn delete_request(&self, item_id: &str, user_id: &str) -> RemoteResult<()>;

    /// The user's requests joined with their items, oldest first
    async fn fetch_requests_for_user(&self, user_id: &str) -> RemoteResult<Vec<InterestRow>>;

    /// Requests other users made for one item
    async fn fetch_requests_for_item(&self, item_id: &str) -> RemoteResult<Vec<Request>>;
}
