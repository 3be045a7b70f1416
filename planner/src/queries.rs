//! Read-only queries over an event collection.
//!
//! These never mutate and never sort unless documented; results borrow from
//! the input slice.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime};
use shared::{Event, TimeRange};
use uuid::Uuid;

use crate::dates::date_in_month;

/// Maximum number of entries in the upcoming list
pub const UPCOMING_LIMIT: usize = 5;

/// Events of one day in the agenda view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
}

/// Events on `date`, in input order.
pub fn events_on(date: NaiveDate, events: &[Event]) -> Vec<&Event> {
    events.iter().filter(|event| event.date == date).collect()
}

/// Events on `day` of the month displayed by `current_date`, in input order.
pub fn events_on_day(day: u32, current_date: NaiveDate, events: &[Event]) -> Vec<&Event> {
    match date_in_month(current_date, day) {
        Some(target) => events_on(target, events),
        None => Vec::new(),
    }
}

/// Distinct day-of-month numbers across all events, whatever their month.
///
/// Callers must pre-filter to one month; see `days_with_events_in_month`.
pub fn days_with_events(events: &[Event]) -> BTreeSet<u32> {
    events.iter().map(|event| event.date.day()).collect()
}

/// Days of the month displayed by `current_date` that have events.
pub fn days_with_events_in_month(events: &[Event], current_date: NaiveDate) -> BTreeSet<u32> {
    events
        .iter()
        .filter(|event| {
            event.date.year() == current_date.year() && event.date.month() == current_date.month()
        })
        .map(|event| event.date.day())
        .collect()
}

/// Up to five events dated today or later, earliest first.
///
/// Events on the same day are ordered by start time; ties keep input order.
pub fn upcoming_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|event| event.date >= today).collect();
    upcoming.sort_by_key(|event| (event.date, event.start_time));
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// Events on `date` whose slot intersects `candidate`, skipping `excluding`.
pub fn conflicting_events<'a>(
    candidate: TimeRange,
    date: NaiveDate,
    events: &'a [Event],
    excluding: Option<Uuid>,
) -> impl Iterator<Item = &'a Event> + 'a {
    events.iter().filter(move |event| {
        event.date == date
            && Some(event.id) != excluding
            && candidate.intersects(&event.time_range())
    })
}

/// Whether `candidate` on `date` would collide with any event but `excluding`.
pub fn overlaps(
    candidate: TimeRange,
    date: NaiveDate,
    events: &[Event],
    excluding: Option<Uuid>,
) -> bool {
    conflicting_events(candidate, date, events, excluding)
        .next()
        .is_some()
}

/// Events of the displayed month grouped by day, days ascending and each
/// day's events by start time.
pub fn agenda(events: &[Event], current_date: NaiveDate) -> Vec<AgendaDay<'_>> {
    days_with_events_in_month(events, current_date)
        .into_iter()
        .filter_map(|day| date_in_month(current_date, day))
        .map(|date| {
            let mut day_events = events_on(date, events);
            day_events.sort_by_key(|event| event.start_time);
            AgendaDay {
                date,
                events: day_events,
            }
        })
        .collect()
}

/// Events from one day that occupy any part of `hour` (0-23).
pub fn events_in_hour<'a>(day_events: &[&'a Event], hour: u32) -> Vec<&'a Event> {
    let Some(slot_start) = NaiveTime::from_hms_opt(hour, 0, 0) else {
        return Vec::new();
    };
    // hour 23 has no representable end; it runs to midnight
    let slot_end = NaiveTime::from_hms_opt(hour + 1, 0, 0);

    day_events
        .iter()
        .copied()
        .filter(|event| {
            event.end_time > slot_start && slot_end.map_or(true, |end| event.start_time < end)
        })
        .collect()
}
