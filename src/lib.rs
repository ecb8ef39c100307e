//! # PocketKit
//!
//! Three small personal apps sharing one store/persist/render-on-write core:
//! a money tracker, an app-launcher hub with a launch password, and a
//! prepaid SIM expiry tracker.
//!
//! ## Features
//!
//! - **Slot storage**: each app owns one named JSON slot, in memory or in SQLite
//! - **Render-on-write**: every mutation persists, then the view is rebuilt
//! - **Structured views**: views are trees, painted as text or escaped HTML
//! - **Hashed launch password**: Argon2id, with legacy plaintext upgraded on use
//!
//! ## Modules
//!
//! - [`storage`]: slot backends and the `Store` that persists after each mutation
//! - [`shell`]: the event loop that dispatches mutators and re-renders
//! - [`view`]: view tree, HTML serializer and text painter
//! - [`money`], [`hub`], [`sim`]: the apps
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pocketkit::clock::SystemClock;
//! use pocketkit::config::SimConfig;
//! use pocketkit::interact::ConsoleInteraction;
//! use pocketkit::shell::{Shell, TerminalSurface};
//! use pocketkit::sim::SimTracker;
//! use pocketkit::storage::SqliteStorage;
//! use std::path::Path;
//! use std::rc::Rc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = Rc::new(SqliteStorage::open(Path::new("./data"), None)?);
//!     let sims = SimTracker::open(backend, SimConfig::default())?;
//!
//!     let mut shell = Shell::new(
//!         sims,
//!         (),
//!         Box::new(SystemClock),
//!         ConsoleInteraction::new(false),
//!         TerminalSurface::default(),
//!     );
//!     shell.start();
//!     shell.dispatch(|sims, _, ctx| {
//!         sims.add_sim(ctx.now, "Dad", "98300 11111", "Jio", "2026-12-31")
//!     });
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod hub;
pub mod ids;
pub mod interact;
pub mod logging;
pub mod money;
pub mod shell;
pub mod sim;
pub mod storage;
pub mod view;

// Re-export top-level types for convenience
pub use storage::{
    MemoryStorage, SlotStorage, SqliteStorage, StorageError, StorageResult, Store,
};

pub use error::{AppError, AppResult};

pub use shell::{MiniApp, RecordingSurface, Shell, Surface, TerminalSurface};

pub use money::{MoneySession, MoneyTracker};

pub use hub::{Hub, HubSession, LaunchOutcome};

pub use sim::{SimStatus, SimTracker};

pub use config::{Config, ConfigError, HubConfig, LoggingConfig, MoneyConfig, SimConfig};
