//! Campus Swap Core
//!
//! Layered architecture:
//! - domain: Items, requests, cart/interest entries and errors
//! - repository: Local storage and remote item store boundaries
//! - store: The interest/cart store that keeps them in step

pub mod domain;
pub mod repository;
pub mod store;

pub use domain::{
    CartEntry, InterestEntry, InterestRow, Item, NewItem, NewRequest, RemoteError, RemoteResult,
    Request, StoreError, SyncAction, UserContext,
};
pub use repository::{
    AuthClient, InMemoryRemote, LocalStorage, MemoryStorage, PostgrestConfig, PostgrestRemote,
    RemoteItemStore, StorageError,
};
pub use store::{InterestCartStore, PendingSync, ReconciliationPolicy, StoreConfig, SyncOutcome};
