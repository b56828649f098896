//! Repository Layer
//!
//! Boundaries to durable local storage and to the remote item store, plus the
//! implementations that ship with the core.

mod traits;
mod local_storage;
pub mod snapshot;
mod memory_remote;
mod postgrest;
pub mod auth;


pub use traits::{LocalStorage, RemoteItemStore, StorageError};
pub use local_storage::MemoryStorage;
pub use memory_remote::InMemoryRemote;
pub use postgrest::{PostgrestConfig, PostgrestRemote};
pub use auth::AuthClient;
