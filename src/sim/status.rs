//! Expiry status, derived from today's date on every render
//!
//! ```text
//! days since expiry:   ≤ 0        1 .. window-1        ≥ window
//!                     Active        Warning         Safe/Inactive
//! ```

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimStatus {
    /// Still recharged; expires in `days_left` days
    Active { days_left: i64 },
    /// Recharge ended; counting up toward the inactivity window
    Warning { days_passed: i64, window: i64 },
    /// The full window has passed since expiry
    Inactive { days_passed: i64 },
}

impl SimStatus {
    pub fn classify(today: NaiveDate, expiry: NaiveDate, window: i64) -> Self {
        let days_passed = (today - expiry).num_days();
        if days_passed <= 0 {
            SimStatus::Active {
                days_left: -days_passed,
            }
        } else if days_passed < window {
            SimStatus::Warning {
                days_passed,
                window,
            }
        } else {
            SimStatus::Inactive { days_passed }
        }
    }

    pub fn label(&self) -> String {
        match self {
            SimStatus::Active { days_left } => format!("Active (Expires in {} days)", days_left),
            SimStatus::Warning {
                days_passed,
                window,
            } => format!("Warning! ({}/{} days passed)", days_passed, window),
            SimStatus::Inactive { days_passed } => {
                format!("Safe/Inactive ({} days passed)", days_passed)
            }
        }
    }

    /// Card class
    pub fn css_class(&self) -> &'static str {
        match self {
            SimStatus::Active { .. } => "status-black",
            SimStatus::Warning { .. } => "status-red",
            SimStatus::Inactive { .. } => "status-green",
        }
    }
}
