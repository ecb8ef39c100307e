//! Hub data model
//!
//! Apps are addressed by a stable id, never by their position in the list,
//! so deleting or editing one entry cannot hit a neighbour.

use crate::ids::Id;
use serde::{Deserialize, Serialize};

/// Icon of the app seeded on first start
pub const SIM_TRACKER_ICON: &str = "https://cdn-icons-png.flaticon.com/512/65/65686.png";

/// One launchable app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubApp {
    /// Zero on entries written before ids existed; replaced at load
    #[serde(default)]
    pub id: Id,
    pub name: String,
    pub icon: String,
    pub url: String,
}

/// The app list a fresh hub starts with
pub fn default_apps() -> Vec<HubApp> {
    vec![HubApp {
        id: Id(1),
        name: "SIM Tracker".to_string(),
        icon: SIM_TRACKER_ICON.to_string(),
        url: "sim-tracker/index.html".to_string(),
    }]
}

/// The app currently shown in the embedded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFrame {
    pub app_id: Id,
    pub name: String,
    pub url: String,
}

/// What a launch request led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// No password is set; the app is open
    Opened(OpenFrame),
    /// A password is set; the app waits for `unlock`
    PasswordRequired,
}

/// Per-session launch state; never persisted
#[derive(Debug, Clone, Default)]
pub struct HubSession {
    /// App waiting for the password
    pub pending: Option<Id>,
    /// App shown in the frame
    pub open: Option<OpenFrame>,
}
