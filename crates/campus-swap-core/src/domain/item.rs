//! Item Entity
//!
//! A listing a student has posted for giveaway or sale. Items are owned by the
//! remote store; the client only ever reads them, posts new ones, or deletes
//! its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{Entity, RemoteError};

/// A marketplace listing
///
/// Every field except `id` tolerates being absent so that older local
/// snapshots and partially selected remote rows still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier (remote may send a number or a string)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Zero means free
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub owner_id: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Create an item with only the identifier and name set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: 0.0,
            category: String::new(),
            image_url: None,
            pickup_location: String::new(),
            owner_id: String::new(),
            owner_name: String::new(),
            created_at: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>, owner_name: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self.owner_name = owner_name.into();
        self
    }

    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !self.owner_id.is_empty() && self.owner_id == user_id
    }
}

impl Entity for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for posting a new listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub pickup_location: String,
    pub owner_id: String,
    pub owner_name: String,
}

impl NewItem {
    /// Reject listings the remote would store in an unusable state
    pub fn validate(&self) -> Result<(), RemoteError> {
        if self.name.trim().is_empty() {
            return Err(RemoteError::InvalidInput("item name is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(RemoteError::InvalidInput(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        if self.owner_id.is_empty() {
            return Err(RemoteError::InvalidInput("owner is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(if price.is_finite() && price > 0.0 { price } else { 0.0 })
}
