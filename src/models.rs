//! Frontend Models
//!
//! Marketplace types come from the core crate; this module adds the
//! view-only state around them.

pub use campus_swap_core::{CartEntry, InterestEntry, Item, NewItem, Request, UserContext};

/// Main view selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Browse,
    Cart,
    Interested,
    Post,
    Account,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Browse, Tab::Cart, Tab::Interested, Tab::Post, Tab::Account];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Browse => "Browse",
            Tab::Cart => "Cart",
            Tab::Interested => "Interested",
            Tab::Post => "Post an item",
            Tab::Account => "Account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A dismissable message shown above the main content
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// Category options for new listings
pub const CATEGORIES: &[&str] = &[
    "Furniture",
    "Books",
    "Electronics",
    "Kitchen",
    "Clothing",
    "Other",
];

pub fn format_price(price: f64) -> String {
    if price <= 0.0 {
        "Free".to_string()
    } else {
        format!("${:.2}", price)
    }
}

/// Parse the price field of the post form; blank means free
pub fn parse_price(raw: &str) -> Result<f64, String> {
    let raw = raw.trim().trim_start_matches('$');
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(format!("\"{}\" is not a valid price", raw)),
    }
}
