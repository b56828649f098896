//! In-memory remote item store
//!
//! Backs the offline demo mode and the tests. Failures can be switched on to
//! simulate a dropped network.

use async_trait::async_trait;
use chrono::Utc;
use std::cell::{Cell, RefCell};

use crate::domain::{
    InterestRow, Item, NewItem, NewRequest, RemoteError, RemoteResult, Request,
};

use super::traits::RemoteItemStore;

#[derive(Debug, Default)]
pub struct InMemoryRemote {
    items: RefCell<Vec<Item>>,
    requests: RefCell<Vec<Request>>,
    next_id: Cell<u64>,
    fail_writes: Cell<bool>,
    fail_reads: Cell<bool>,
    write_calls: Cell<u32>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        let remote = Self::new();
        *remote.items.borrow_mut() = items;
        remote
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Number of insert/delete calls received, failed ones included
    pub fn write_calls(&self) -> u32 {
        self.write_calls.get()
    }

    /// Snapshot of all stored requests
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{}-{}", prefix, id)
    }

    fn check_write(&self) -> RemoteResult<()> {
        self.write_calls.set(self.write_calls.get() + 1);
        if self.fail_writes.get() {
            return Err(RemoteError::Unavailable("simulated write failure".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> RemoteResult<()> {
        if self.fail_reads.get() {
            return Err(RemoteError::Unavailable("simulated read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl RemoteItemStore for InMemoryRemote {
    async fn list_items(&self) -> RemoteResult<Vec<Item>> {
        self.check_read()?;
        let mut items = self.items.borrow().clone();
        // Stable sort keeps seed order for items without a timestamp
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn fetch_items_by_ids(&self, ids: &[String]) -> RemoteResult<Vec<Item>> {
        self.check_read()?;
        Ok(self
            .items
            .borrow()
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn create_item(&self, new_item: &NewItem) -> RemoteResult<Item> {
        new_item.validate()?;
        self.check_write()?;
        let item = Item {
            id: self.next_id("item"),
            name: new_item.name.clone(),
            description: new_item.description.clone(),
            price: new_item.price,
            category: new_item.category.clone(),
            image_url: new_item.image_url.clone(),
            pickup_location: new_item.pickup_location.clone(),
            owner_id: new_item.owner_id.clone(),
            owner_name: new_item.owner_name.clone(),
            created_at: Some(Utc::now()),
        };
        self.items.borrow_mut().push(item.clone());
        Ok(item)
    }

    async fn delete_item(&self, item_id: &str, owner_id: &str) -> RemoteResult<()> {
        self.check_write()?;
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|item| !(item.id == item_id && item.owner_id == owner_id));
        if items.len() == before {
            return Err(RemoteError::NotFound(format!("item {} owned by {}", item_id, owner_id)));
        }
        self.requests.borrow_mut().retain(|r| r.item_id != item_id);
        Ok(())
    }

    async fn insert_request(&self, request: &NewRequest) -> RemoteResult<()> {
        self.check_write()?;
        let exists = self
            .requests
            .borrow()
            .iter()
            .any(|r| r.item_id == request.item_id && r.requester_id == request.requester_id);
        if exists {
            // Duplicate (item_id, requester_id) is ignored, as the hosted insert asks for
            return Ok(());
        }
        let stored = Request {
            id: self.next_id("request"),
            item_id: request.item_id.clone(),
            requester_id: request.requester_id.clone(),
            requester_name: request.requester_name.clone(),
            requester_contact: request.requester_contact.clone(),
            created_at: Some(Utc::now()),
        };
        self.requests.borrow_mut().push(stored);
        Ok(())
    }

    async fn delete_request(&self, item_id: &str, user_id: &str) -> RemoteResult<()> {
        self.check_write()?;
        self.requests
            .borrow_mut()
            .retain(|r| !(r.item_id == item_id && r.requester_id == user_id));
        Ok(())
    }

    async fn fetch_requests_for_user(&self, user_id: &str) -> RemoteResult<Vec<InterestRow>> {
        self.check_read()?;
        let items = self.items.borrow();
        Ok(self
            .requests
            .borrow()
            .iter()
            .filter(|r| r.requester_id == user_id)
            .map(|r| InterestRow {
                request: r.clone(),
                item: items.iter().find(|item| item.id == r.item_id).cloned(),
            })
            .collect())
    }

    async fn fetch_requests_for_item(&self, item_id: &str) -> RemoteResult<Vec<Request>> {
        self.check_read()?;
        Ok(self
            .requests
            .borrow()
            .iter()
            .filter(|r| r.item_id == item_id)
            .cloned()
            .collect())
    }
}
