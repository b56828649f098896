//! Pending remote writes
//!
//! An interest mutation is split in two so the caller can release the store
//! while the network call is in flight: the store hands out a
//! [`PendingSync`], the caller runs it against a remote, and the resulting
//! [`SyncOutcome`] is settled back into the store.

use crate::domain::{Item, NewRequest, RemoteResult, SyncAction, UserContext};
use crate::repository::RemoteItemStore;

#[derive(Debug, Clone, PartialEq)]
enum RemoteWrite {
    Insert(NewRequest),
    Delete { item_id: String, user_id: String },
}

/// A remote write not yet performed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSync {
    write: RemoteWrite,
    item: Item,
    /// Where the entry sat locally, for restoring it on rollback
    index: usize,
    /// Store-wide sequence number; a later write for the same item supersedes this one
    seq: u64,
}

impl PendingSync {
    pub(crate) fn insert(item: Item, user: &UserContext, index: usize, seq: u64) -> Self {
        Self {
            write: RemoteWrite::Insert(NewRequest::for_item(item.id.clone(), user)),
            item,
            index,
            seq,
        }
    }

    pub(crate) fn delete(item: Item, user: &UserContext, index: usize, seq: u64) -> Self {
        Self {
            write: RemoteWrite::Delete {
                item_id: item.id.clone(),
                user_id: user.user_id.clone(),
            },
            item,
            index,
            seq,
        }
    }

    pub fn action(&self) -> SyncAction {
        match self.write {
            RemoteWrite::Insert(_) => SyncAction::InsertRequest,
            RemoteWrite::Delete { .. } => SyncAction::DeleteRequest,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    /// Perform the remote write; never retried
    pub async fn run<R: RemoteItemStore + ?Sized>(self, remote: &R) -> SyncOutcome {
        let result = match &self.write {
            RemoteWrite::Insert(request) => remote.insert_request(request).await,
            RemoteWrite::Delete { item_id, user_id } => remote.delete_request(item_id, user_id).await,
        };
        SyncOutcome {
            pending: self,
            result,
        }
    }
}

/// Result of a remote write, ready to be settled into the store
#[derive(Debug)]
pub struct SyncOutcome {
    pub(crate) pending: PendingSync,
    pub(crate) result: RemoteResult<()>,
}

impl SyncOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
