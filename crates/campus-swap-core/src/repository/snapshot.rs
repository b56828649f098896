//! Versioned collection snapshots
//!
//! A snapshot is the full contents of one collection written under a fixed
//! key as `{"version": 1, "entries": [...]}`.
//!
//! Reading is forgiving:
//! - a bare JSON array is an unversioned (version 0) snapshot
//! - versions newer than [`SNAPSHOT_VERSION`] are read best-effort
//! - each entry decodes on its own; entries that fail are dropped
//! - a missing key or unparseable document is an empty collection

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::traits::LocalStorage;

pub const CART_KEY: &str = "cart";
pub const INTERESTED_KEY: &str = "interested";
pub const SESSION_KEY: &str = "session";

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    version: u32,
    entries: &'a [T],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Legacy(Vec<Value>),
    Versioned {
        version: u32,
        #[serde(default)]
        entries: Vec<Value>,
    },
}

/// Encode a full collection
pub fn encode<T: Serialize>(entries: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        entries,
    })
}

/// Decode a stored document, dropping entries that do not fit `T`
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, SnapshotError> {
    let (version, values) = match serde_json::from_str::<StoredSnapshot>(raw)? {
        StoredSnapshot::Legacy(values) => (0, values),
        StoredSnapshot::Versioned { version, entries } => (version, entries),
    };
    if version > SNAPSHOT_VERSION {
        debug!("reading snapshot version {} with schema {}", version, SNAPSHOT_VERSION);
    }

    let total = values.len();
    let entries: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if entries.len() < total {
        warn!("dropped {} unreadable snapshot entries", total - entries.len());
    }
    Ok(entries)
}

/// Load the collection stored under `key`; anything unreadable is empty
pub fn load<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: LocalStorage + ?Sized,
{
    let Some(raw) = storage.get(key) else {
        return Vec::new();
    };
    match decode(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("discarding corrupt snapshot {:?}: {}", key, e);
            Vec::new()
        }
    }
}

/// Write the collection under `key`; failures are logged, never raised
pub fn save<T, S>(storage: &S, key: &str, entries: &[T])
where
    T: Serialize,
    S: LocalStorage + ?Sized,
{
    let encoded = match encode(entries) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("could not encode snapshot {:?}: {}", key, e);
            return;
        }
    };
    if let Err(e) = storage.set(key, &encoded) {
        warn!("{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartEntry, InterestEntry, Item};
    use crate::repository::MemoryStorage;

    #[test]
    fn test_encode_writes_version_envelope() {
        let encoded = encode(&[InterestEntry::new(Item::new("a", "Lamp"))]).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert_eq!(value["entries"][0]["id"], "a");
    }

    #[test]
    fn test_legacy_array_is_accepted() {
        let raw = r#"[{"id":"1","name":"Desk","quantity":2},{"id":2,"name":"Chair"}]"#;
        let entries: Vec<CartEntry> = decode(raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(entries[1].item.id, "2");
        assert_eq!(entries[1].quantity, 1);
    }

    #[test]
    fn test_bad_entries_are_dropped_individually() {
        let raw = r#"{"version":1,"entries":[{"id":"ok"},{"name":"no id"},42]}"#;
        let entries: Vec<InterestEntry> = decode(raw).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.id, "ok");
    }

    #[test]
    fn test_future_version_is_read_best_effort() {
        let raw = r#"{"version":7,"entries":[{"id":"x","name":"Mug","new_field":true}]}"#;
        let entries: Vec<InterestEntry> = decode(raw).unwrap();
        assert_eq!(entries[0].item.name, "Mug");
    }

    #[test]
    fn test_versioned_without_entries_is_empty() {
        let entries: Vec<InterestEntry> = decode(r#"{"version":1}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_corrupt_or_missing_loads_empty() {
        let storage = MemoryStorage::new();
        assert!(load::<CartEntry, _>(&storage, CART_KEY).is_empty());

        storage.insert_raw(CART_KEY, "{not json");
        assert!(matches!(
            decode::<CartEntry>("{not json"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(load::<CartEntry, _>(&storage, CART_KEY).is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let entries = vec![CartEntry::new(Item::new("a", "Lamp").with_price(3.0))];
        save(&storage, CART_KEY, &entries);
        let loaded: Vec<CartEntry> = load(&storage, CART_KEY);
        assert_eq!(loaded, entries);
    }
}
