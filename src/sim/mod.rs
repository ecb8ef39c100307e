//! Prepaid SIM expiry tracker
//!
//! - **types**: records and operators
//! - **status**: Active / Warning / Inactive derived from the expiry date
//! - **tracker**: mutators (add, edit, delete, recharge)
//! - **render**: the card list

pub mod render;
pub mod status;
pub mod tracker;
pub mod types;

pub use status::SimStatus;
pub use tracker::SimTracker;
pub use types::{Operator, SimRecord};
