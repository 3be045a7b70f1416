//! In-memory event store.
//!
//! `CalendarStore` is a plain value: construct as many as needed, hand out
//! `&mut` for mutations. Every action either completes or leaves the store
//! untouched.

use chrono::{Local, NaiveDate, NaiveDateTime};
use shared::{Event, EventStatus};
use uuid::Uuid;

use crate::dates;
use crate::error::{StoreError, StoreResult};
use crate::queries;

/// Events in insertion order plus the month currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarStore {
    events: Vec<Event>,
    current_date: NaiveDate,
}

impl Default for CalendarStore {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl CalendarStore {
    pub fn new(current_date: NaiveDate) -> Self {
        Self {
            events: Vec::new(),
            current_date,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Date whose month and year are displayed
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn get(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append `event` unless it collides with an event on the same day.
    pub fn add(&mut self, event: Event) -> StoreResult<()> {
        if self.get(event.id).is_some() {
            tracing::warn!("Rejected event {}: id already in store", event.id);
            return Err(StoreError::DuplicateId(event.id));
        }

        check_range(&event)?;
        self.check_free(&event)?;

        tracing::debug!(
            "Added event {} on {} ({}-{})",
            event.id,
            event.date,
            event.start_time,
            event.end_time
        );
        self.events.push(event);
        Ok(())
    }

    /// Replace the event with the same id, keeping its position.
    ///
    /// The new slot is checked against every other event, same as `add`.
    pub fn update(&mut self, event: Event) -> StoreResult<()> {
        let index = self
            .events
            .iter()
            .position(|existing| existing.id == event.id)
            .ok_or(StoreError::NotFound(event.id))?;

        check_range(&event)?;
        self.check_free(&event)?;

        tracing::debug!("Updated event {} ({:?})", event.id, event.status);
        self.events[index] = event;
        Ok(())
    }

    /// Remove the event with `id`; absent ids are ignored.
    pub fn delete(&mut self, id: Uuid) -> Option<Event> {
        let index = self.events.iter().position(|event| event.id == id)?;
        tracing::debug!("Deleted event {}", id);
        Some(self.events.remove(index))
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    pub fn show_previous_month(&mut self) {
        self.set_current_date(dates::previous_month(self.current_date));
    }

    pub fn show_next_month(&mut self) {
        self.set_current_date(dates::next_month(self.current_date));
    }

    pub fn show_today(&mut self, today: NaiveDate) {
        self.set_current_date(today);
    }

    /// Mark every active event whose slot ended at or before `now` as
    /// expired. Returns the ids that changed.
    pub fn expire_past(&mut self, now: NaiveDateTime) -> Vec<Uuid> {
        let ended: Vec<Event> = self
            .events
            .iter()
            .filter(|event| !event.is_expired() && event.has_ended(now))
            .cloned()
            .collect();

        let mut expired = Vec::with_capacity(ended.len());
        for mut event in ended {
            let id = event.id;
            event.status = EventStatus::Expired;
            match self.update(event) {
                Ok(()) => expired.push(id),
                Err(e) => tracing::warn!("Could not expire event {}: {}", id, e),
            }
        }

        expired
    }

    fn check_free(&self, event: &Event) -> StoreResult<()> {
        if let Some(existing) = queries::conflicting_events(
            event.time_range(),
            event.date,
            &self.events,
            Some(event.id),
        )
        .next()
        {
            tracing::warn!(
                "Rejected event {} on {}: overlaps {} ({}-{})",
                event.id,
                event.date,
                existing.id,
                existing.start_time,
                existing.end_time
            );
            return Err(StoreError::Overlap {
                date: existing.date,
                start: existing.start_time,
                end: existing.end_time,
            });
        }
        Ok(())
    }
}

fn check_range(event: &Event) -> StoreResult<()> {
    if event.start_time >= event.end_time {
        tracing::warn!(
            "Rejected event {}: end {} is not after start {}",
            event.id,
            event.end_time,
            event.start_time
        );
        return Err(StoreError::InvalidRange {
            start: event.start_time,
            end: event.end_time,
        });
    }
    Ok(())
}
