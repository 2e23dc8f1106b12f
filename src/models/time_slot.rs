//! Weekly meeting-time model.
//!
//! A time slot is an opaque label such as `"Tu 4:30-5:50 PM"`. Equality is
//! exact text match. For reporting, slots are ordered by weekday first and
//! then by start time on a 24-hour clock.
//!
//! # Format
//! `"<Day> <Start>-<End> <AM|PM>"`, where `Day` is one of
//! `M`, `Tu`, `W`, `Th`, `F`, `Sa`, `Su` and the meridiem applies to the
//! start time. Labels that do not follow this format remain valid slots;
//! they order after every parseable slot, by raw text.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Day of the week, numbered Monday = 1 through Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Parses the abbreviation used in availability labels.
    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        match abbr {
            "M" => Some(Self::Monday),
            "Tu" => Some(Self::Tuesday),
            "W" => Some(Self::Wednesday),
            "Th" => Some(Self::Thursday),
            "F" => Some(Self::Friday),
            "Sa" => Some(Self::Saturday),
            "Su" => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Position in the week (1..=7).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A parsed sort key: weekday and start time in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub weekday: Weekday,
    pub start_minute: u16,
}

/// A weekly meeting time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    /// Creates a time slot from its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The raw label.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the weekday and start time, if the label is well formed.
    pub fn key(&self) -> Option<SlotKey> {
        let mut parts = self.0.split_whitespace();
        let day = parts.next()?;
        let range = parts.next()?;
        let meridiem = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let weekday = Weekday::from_abbreviation(day)?;
        let (start, _end) = range.split_once('-')?;
        let start_minute = to_minutes_of_day(start, meridiem)?;

        Some(SlotKey {
            weekday,
            start_minute,
        })
    }

    /// Canonical reporting order: weekday, then start time.
    ///
    /// Slots with the same weekday and start compare equal, so a stable
    /// sort keeps their input order. Unparseable labels sort last, by text.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.key(), other.key()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }

    /// Splits a comma-delimited availability field into a set of slots.
    ///
    /// Tokens are trimmed; empty tokens are dropped.
    pub fn parse_set(field: &str) -> BTreeSet<TimeSlot> {
        field
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(TimeSlot::new)
            .collect()
    }
}

/// Converts `"h:mm"` plus an `AM`/`PM` marker to minutes after midnight.
fn to_minutes_of_day(clock: &str, meridiem: &str) -> Option<u16> {
    let (hour, minute) = clock.split_once(':')?;
    let hour: u16 = hour.parse().ok()?;
    let minute: u16 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) || minute >= 60 {
        return None;
    }

    let offset = if meridiem.eq_ignore_ascii_case("AM") {
        0
    } else if meridiem.eq_ignore_ascii_case("PM") {
        12
    } else {
        return None;
    };

    Some(((hour % 12) + offset) * 60 + minute)
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chronological_cmp(other)
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for TimeSlot {
    fn from(label: String) -> Self {
        Self(label)
    }
}
