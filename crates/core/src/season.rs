//! Calendar seasons and their ambient temperature bands.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// One of the four calendar seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

// Inclusive (month, day) ranges. Winter spans the year wrap (Dec 1 - Feb 28/29)
// and cannot be expressed as a single interval, so it doubles as the fallback.
const SPRING: ((u32, u32), (u32, u32)) = ((3, 1), (5, 31));
const SUMMER: ((u32, u32), (u32, u32)) = ((6, 1), (8, 31));
const AUTUMN: ((u32, u32), (u32, u32)) = ((9, 1), (11, 30));

fn in_range(month: u32, day: u32, range: ((u32, u32), (u32, u32))) -> bool {
    let (start, end) = range;
    (month, day) >= start && (month, day) <= end
}

impl Season {
    /// Resolve the season for a calendar date.
    ///
    /// Total over valid month/day input: any date outside the three explicit
    /// ranges falls into winter.
    pub fn for_date(month: u32, day: u32) -> Self {
        if in_range(month, day, SPRING) {
            Season::Spring
        } else if in_range(month, day, SUMMER) {
            Season::Summer
        } else if in_range(month, day, AUTUMN) {
            Season::Autumn
        } else {
            Season::Winter
        }
    }

    /// Resolve the season for a timestamp
    pub fn for_timestamp(ts: DateTime<Utc>) -> Self {
        Season::for_date(ts.month(), ts.day())
    }

    /// Ambient temperature band for this season, as (min, max) in celsius
    pub fn temperature_band(self) -> (f64, f64) {
        match self {
            Season::Winter => (-10.0, 5.0),
            Season::Spring | Season::Autumn => (5.0, 20.0),
            Season::Summer => (15.0, 35.0),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        };
        write!(f, "{name}")
    }
}
