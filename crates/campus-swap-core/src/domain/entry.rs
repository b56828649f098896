//! Cart and Interest Entries
//!
//! Both wrap an [`Item`] and are keyed by its id. The item fields are
//! flattened so a stored entry reads like an item with extra fields.

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::Entity;
use super::item::Item;

/// Local-only cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub item: Item,
    /// Always at least 1
    #[serde(default = "one", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

impl CartEntry {
    pub fn new(item: Item) -> Self {
        Self { item, quantity: 1 }
    }

    /// Price of the whole line
    pub fn line_total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

impl Entity for CartEntry {
    fn id(&self) -> &str {
        &self.item.id
    }
}

/// Item the user has marked as wanted, mirrored remotely as a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestEntry {
    #[serde(flatten)]
    pub item: Item,
}

impl InterestEntry {
    pub fn new(item: Item) -> Self {
        Self { item }
    }
}

impl Entity for InterestEntry {
    fn id(&self) -> &str {
        &self.item.id
    }
}

fn one() -> u32 {
    1
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = Option::<u32>::deserialize(deserializer)?.unwrap_or(1);
    Ok(quantity.max(1))
}
