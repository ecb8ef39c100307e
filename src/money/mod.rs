//! Personal money tracker
//!
//! - **types**: the persisted document and the per-session view state
//! - **tracker**: mutators (profile, transactions, goals, lists)
//! - **goals**: days-remaining and daily-need arithmetic
//! - **format**: amount parsing and Indian-grouped display
//! - **photo**: profile photo to `data:` URI
//! - **render**: the view

pub mod format;
pub mod goals;
pub mod photo;
pub mod render;
pub mod tracker;
pub mod types;

pub use tracker::MoneyTracker;
pub use types::{
    Goal, ListItem, MoneyData, MoneySession, Profile, ShoppingList, Tab, Totals, Transaction,
    TransactionKind,
};
