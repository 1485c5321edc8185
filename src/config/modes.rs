//! Time zone selection for rendered dates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zone the `$y $m $d $h $i $s` placeholders are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The machine's local time zone (default).
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneMode::Local => write!(f, "local"),
            TimeZoneMode::Utc => write!(f, "utc"),
        }
    }
}

impl FromStr for TimeZoneMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(TimeZoneMode::Local),
            "utc" => Ok(TimeZoneMode::Utc),
            _ => Err(format!("Unknown time zone mode: {}", s)),
        }
    }
}
