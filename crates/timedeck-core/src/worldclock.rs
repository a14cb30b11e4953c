//! World-clock board: a read model over a curated city catalog.
//!
//! Offsets are standard-time UTC offsets in minutes east; daylight-saving
//! shifts are not modeled. The board itself has no internal logic beyond
//! membership - local times are derived from a shared `Utc` instant at
//! render time, so all clocks on the board agree to the second.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Cities offered by the add-clock picker, with standard UTC offsets in
/// minutes east.
pub const CITY_CATALOG: &[(&str, i32)] = &[
    ("New York", -5 * 60),
    ("London", 0),
    ("Paris", 60),
    ("Tokyo", 9 * 60),
    ("Sydney", 10 * 60),
    ("Dubai", 4 * 60),
    ("Los Angeles", -8 * 60),
    ("Hong Kong", 8 * 60),
    ("Singapore", 8 * 60),
    ("Mumbai", 5 * 60 + 30),
    ("Sao Paulo", -3 * 60),
    ("Moscow", 3 * 60),
    ("Shanghai", 8 * 60),
    ("Berlin", 60),
    ("Toronto", -5 * 60),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityClock {
    pub city: String,
    /// UTC offset in minutes east.
    pub offset_minutes: i32,
}

impl CityClock {
    /// Local time for this clock at the given instant.
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        // Catalog offsets are always within FixedOffset's +/-24h bounds.
        let offset = FixedOffset::east_opt(self.offset_minutes * 60).unwrap_or_else(|| Utc.fix());
        now.with_timezone(&offset)
    }

    /// `hh:mm:ss AM/PM` clock face.
    pub fn time_display(&self, now: DateTime<Utc>) -> String {
        self.local_time(now).format("%I:%M:%S %p").to_string()
    }

    /// `Wed, Aug 19, 2026` date line.
    pub fn date_display(&self, now: DateTime<Utc>) -> String {
        self.local_time(now).format("%a, %b %d, %Y").to_string()
    }
}

/// The set of clocks the user is tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockBoard {
    clocks: Vec<CityClock>,
}

impl ClockBoard {
    pub fn clocks(&self) -> &[CityClock] {
        &self.clocks
    }

    /// Add a clock for a catalog city.
    ///
    /// # Errors
    /// Unknown cities and duplicates are rejected.
    pub fn add(&mut self, city: &str) -> Result<(), ValidationError> {
        let (name, offset_minutes) = CITY_CATALOG
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(city))
            .ok_or_else(|| ValidationError::invalid("city", format!("unknown city '{city}'")))?;
        if self.clocks.iter().any(|c| c.city == *name) {
            return Err(ValidationError::invalid(
                "city",
                format!("'{name}' is already on the board"),
            ));
        }
        self.clocks.push(CityClock {
            city: (*name).to_string(),
            offset_minutes: *offset_minutes,
        });
        Ok(())
    }

    /// Remove a clock by city name. The last clock cannot be removed.
    ///
    /// # Errors
    /// Rejected when the city is not on the board or is the only clock.
    pub fn remove(&mut self, city: &str) -> Result<(), ValidationError> {
        if self.clocks.len() <= 1 {
            return Err(ValidationError::invalid(
                "city",
                "the last clock cannot be removed",
            ));
        }
        let pos = self
            .clocks
            .iter()
            .position(|c| c.city.eq_ignore_ascii_case(city))
            .ok_or_else(|| {
                ValidationError::invalid("city", format!("'{city}' is not on the board"))
            })?;
        self.clocks.remove(pos);
        Ok(())
    }
}

impl Default for ClockBoard {
    fn default() -> Self {
        let mut board = Self { clocks: Vec::new() };
        for city in ["New York", "London", "Tokyo"] {
            board.add(city).expect("default cities are in the catalog");
        }
        board
    }
}
