//! Request Entity
//!
//! A remote record of one user's interest in one item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::item::{deserialize_id, deserialize_opt_id, Item};
use super::session::UserContext;

/// Interest record as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub item_id: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub requester_id: String,
    #[serde(default)]
    pub requester_name: String,
    #[serde(default)]
    pub requester_contact: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Request {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for a new request; the remote assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRequest {
    pub item_id: String,
    pub requester_id: String,
    pub requester_name: String,
    pub requester_contact: String,
}

impl NewRequest {
    pub fn for_item(item_id: impl Into<String>, user: &UserContext) -> Self {
        Self {
            item_id: item_id.into(),
            requester_id: user.user_id.clone(),
            requester_name: user.display_name.clone(),
            requester_contact: user.contact.clone(),
        }
    }
}

/// A request row joined with the item it points at
///
/// The item is `None` when the listing was deleted after the request was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRow {
    #[serde(flatten)]
    pub request: Request,
    #[serde(default)]
    pub item: Option<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_joined_row_decodes() {
        let row: InterestRow = serde_json::from_value(json!({
            "id": 3,
            "item_id": 11,
            "requester_id": "u1",
            "requester_name": "Ana",
            "requester_contact": "ana@campus.edu",
            "created_at": "2024-09-02T08:30:00+00:00",
            "item": { "id": 11, "name": "Bike helmet", "price": 0 }
        }))
        .unwrap();
        assert_eq!(row.request.item_id, "11");
        assert_eq!(row.item.as_ref().map(|i| i.name.as_str()), Some("Bike helmet"));
    }

    #[test]
    fn test_dangling_item_is_none() {
        let row: InterestRow = serde_json::from_value(json!({
            "id": "r1", "item_id": "gone", "requester_id": "u1", "item": null
        }))
        .unwrap();
        assert!(row.item.is_none());
    }

    #[test]
    fn test_new_request_copies_user_details() {
        let user = UserContext::new("u7", "Kim", "kim@campus.edu");
        let request = NewRequest::for_item("i9", &user);
        assert_eq!(request.requester_id, "u7");
        assert_eq!(request.requester_name, "Kim");
        assert_eq!(request.requester_contact, "kim@campus.edu");
    }
}
