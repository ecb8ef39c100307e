//! App-launcher hub
//!
//! - **types**: persisted app entries and the per-session launch state
//! - **launcher**: app management, launching and the password gate
//! - **password**: argon2 hashing of the launch password
//! - **render**: the grid, password prompt and app frame

pub mod launcher;
pub mod password;
pub mod render;
pub mod types;

pub use launcher::Hub;
pub use types::{HubApp, HubSession, LaunchOutcome, OpenFrame};
