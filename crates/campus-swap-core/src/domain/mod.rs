//! Domain Layer
//!
//! Marketplace entities, the cart/interest entries built on them, and the
//! error types shared by the repository and store layers.

mod entity;
mod item;
mod request;
mod entry;
mod session;

pub use entity::{position_of, Entity, RemoteError, RemoteResult, StoreError, SyncAction};
pub use item::{Item, NewItem};
pub use request::{InterestRow, NewRequest, Request};
pub use entry::{CartEntry, InterestEntry};
pub use session::UserContext;
