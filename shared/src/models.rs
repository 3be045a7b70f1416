use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a calendar event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Expired,
}

/// Fixed color palette an event can be tagged with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
}

impl EventColor {
    pub const PALETTE: [EventColor; 5] = [
        EventColor::Blue,
        EventColor::Green,
        EventColor::Purple,
        EventColor::Red,
        EventColor::Yellow,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Green => "green",
            EventColor::Purple => "purple",
            EventColor::Red => "red",
            EventColor::Yellow => "yellow",
        }
    }
}

/// Half-open `[start, end)` slot within a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// True if `self` and `other` share at least one minute.
    ///
    /// Touching ranges (one ends exactly when the other starts) do not
    /// intersect.
    pub fn intersects(&self, other: &TimeRange) -> bool {
        let starts_inside = self.start >= other.start && self.start < other.end;
        let ends_inside = self.end > other.start && self.end <= other.end;
        let contains = self.start <= other.start && self.end >= other.end;

        starts_inside || ends_inside || contains
    }
}

/// Calendar event model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub date: NaiveDate,
    pub color: EventColor,
    pub status: EventStatus,
}

impl Event {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    /// Whether the event's slot has fully elapsed at `now`.
    ///
    /// The end is exclusive, so an event counts as ended from its end
    /// minute onwards: a 09:00-10:00 slot has ended at 10:00.
    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        self.ends_at() <= now
    }

    pub fn is_expired(&self) -> bool {
        self.status == EventStatus::Expired
    }
}

/// Public holiday, read-only and externally sourced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(deserialize_with = "lenient_date::deserialize")]
    pub date: NaiveDate,
    pub name: String,
}

/// `"HH:MM"` wire format for event times
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
    }

    /// Parse a zero-padded `HH:MM` string; `9:05` and the like are refused.
    pub fn parse(raw: &str) -> Option<NaiveTime> {
        let raw = raw.trim();
        if raw.len() != 5 {
            return None;
        }
        NaiveTime::parse_from_str(raw, FORMAT).ok()
    }
}

// The holiday service sends either `2025-01-01` or `2025-01-01T00:00:00`
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let day = raw.split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| serde::de::Error::custom(format!("invalid holiday date '{raw}': {e}")))
    }
}
