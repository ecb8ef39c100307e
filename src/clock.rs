//! Wall-clock access
//!
//! Derived values (days left on a goal, SIM status) depend on "now". Code
//! that needs the time asks a `Clock` so tests can pin it.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Current local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Noon (local time) on the given date
    ///
    /// Falls back to the current time if the date is not representable.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .and_then(|dt| Local.from_local_datetime(&dt).earliest())
            .unwrap_or_else(Local::now);
        Self(noon)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
