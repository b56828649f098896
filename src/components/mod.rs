//! UI Components
//!
//! Reusable Leptos components.

mod account_panel;
mod cart_view;
mod confirm_button;
mod interested_list;
mod item_card;
mod listing_grid;
mod nav_bar;
mod notice_bar;
mod post_item_form;

pub use account_panel::AccountPanel;
pub use cart_view::CartView;
pub use confirm_button::ConfirmButton;
pub use interested_list::InterestedList;
pub use item_card::ItemCard;
pub use listing_grid::ListingGrid;
pub use nav_bar::NavBar;
pub use notice_bar::NoticeBar;
pub use post_item_form::PostItemForm;
