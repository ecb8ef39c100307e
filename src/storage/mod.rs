//! Pocketkit Storage
//!
//! This module provides state persistence shared by all three apps:
//!
//! - **slot**: the `SlotStorage` trait and the in-memory backend
//! - **sqlite**: SQLite-backed slots for the on-disk CLI
//! - **store**: `Store<T>`, an app's state tree mirrored to one slot
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//!   UI event → mutator validates → Store::commit → serialize → slot
//!
//! Read Path:
//!   startup → Store::load → slot → deserialize (or default)
//! ```

pub mod error;
pub mod slot;
pub mod sqlite;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use slot::{MemoryStorage, SlotStorage, DEFAULT_QUOTA_BYTES};
pub use sqlite::{SqliteStorage, DATABASE_FILE};
pub use store::Store;

/// Slot holding the money tracker document
pub const MONEY_SLOT: &str = "moneyTrackerData";
/// Slot holding the hub's app list
pub const HUB_APPS_SLOT: &str = "myHubApps";
/// Slot holding the hub password hash
pub const HUB_PASSWORD_SLOT: &str = "hubPassword";
/// Slot holding the SIM tracker records
pub const SIM_SLOT: &str = "simData";
