//! SIM records and operators

use crate::ids::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network operator; only used to colour the badge
///
/// Stored as its display name. Names outside the known set keep their text
/// in `Other` and get the neutral badge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    #[default]
    Jio,
    Airtel,
    Vi,
    BSNL,
    Other(String),
}

impl Operator {
    /// Operators with their own badge colour
    pub const KNOWN: [Operator; 4] = [Operator::Jio, Operator::Airtel, Operator::Vi, Operator::BSNL];

    pub fn name(&self) -> &str {
        match self {
            Operator::Jio => "Jio",
            Operator::Airtel => "Airtel",
            Operator::Vi => "Vi",
            Operator::BSNL => "BSNL",
            Operator::Other(name) => name,
        }
    }

    /// Badge background colour
    pub fn badge_color(&self) -> &'static str {
        match self {
            Operator::Jio => "#0057e7",
            Operator::Airtel => "#e40000",
            Operator::Vi => "#da291c",
            Operator::BSNL => "#008000",
            Operator::Other(_) => "#555",
        }
    }

    /// Case-insensitive lookup; unknown names are kept as `Other`
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return Operator::Other("Other".to_string());
        }
        Self::KNOWN
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
            .unwrap_or_else(|| Operator::Other(name.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::parse(&name)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

/// One tracked SIM card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimRecord {
    pub id: Id,
    pub name: String,
    pub number: String,
    pub operator: Operator,
    /// Last day of validity
    pub expiry: NaiveDate,
}
