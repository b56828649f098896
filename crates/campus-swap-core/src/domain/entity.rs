//! Domain Layer - Core Entity Trait
//!
//! Every collection in the store is keyed by an opaque string identifier.

use thiserror::Error;

/// Core trait for keyed domain entities
pub trait Entity: Sized + Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Position of the entity with `id` inside `entries`
pub fn position_of<T: Entity>(entries: &[T], id: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.id() == id)
}

/// Common result type for remote store operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failures reported by a remote item store
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode remote response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("remote unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("session expired, sign in again")]
    SessionExpired,
}

/// Remote write performed on behalf of an interest mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    InsertRequest,
    DeleteRequest,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncAction::InsertRequest => write!(f, "insert request"),
            SyncAction::DeleteRequest => write!(f, "delete request"),
        }
    }
}

/// Errors surfaced by the interest/cart store to its caller
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} for item {item_id}: {source}")]
    RemoteWriteFailed {
        action: SyncAction,
        item_id: String,
        #[source]
        source: RemoteError,
    },

    #[error("failed to read interested items: {0}")]
    RemoteReadFailed(#[source] RemoteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failure_message_names_item() {
        let err = StoreError::RemoteWriteFailed {
            action: SyncAction::InsertRequest,
            item_id: "42".to_string(),
            source: RemoteError::Unavailable("offline".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "failed to insert request for item 42: remote unavailable: offline"
        );
    }
}
