//! Create/edit controller sitting between the event form and the store.
//!
//! Validation runs in a fixed order and stops at the first failure:
//! required fields, time order, past date, overlap. Only a successful
//! submit touches the store or clears the form.

use chrono::NaiveDate;
use shared::models::hhmm;
use shared::{ErrorResponse, Event, EventFormData, EventStatus, TimeRange};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::clock::Clock;
use crate::dates;
use crate::error::StoreError;
use crate::queries;
use crate::store::CalendarStore;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

/// Why a submit was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("title, start time and end time are required")]
    MissingFields,

    #[error("'{0}' is not a valid HH:MM time")]
    InvalidTime(String),

    #[error("end time must be after start time")]
    EndBeforeStart,

    #[error("events cannot be scheduled on past dates")]
    PastDate,

    #[error("another event is already scheduled in this time slot")]
    Overlap,

    /// The store refused the mutation after validation passed
    #[error("could not save event: {0}")]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// Machine-readable code for the notice shown to the user
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::MissingFields => "missing_fields",
            SubmitError::InvalidTime(_) => "invalid_time",
            SubmitError::EndBeforeStart => "end_before_start",
            SubmitError::PastDate => "past_date",
            SubmitError::Overlap => "overlap",
            SubmitError::Store(_) => "store_error",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            SubmitError::MissingFields => "Please fill in all required fields".to_string(),
            SubmitError::Store(_) => "Error while saving the event".to_string(),
            other => capitalize(&other.to_string()),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            SubmitError::Store(e) => {
                ErrorResponse::with_details(self.code(), self.user_message(), e.to_string())
            }
            _ => ErrorResponse::new(self.code(), self.user_message()),
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of clicking a day cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySelection {
    /// The day has events: show them
    Preview(Vec<Event>),
    /// The day is free: open an empty form for this date
    Create(NaiveDate),
}

/// Form state plus the event being edited, if any
#[derive(Debug, Clone, Default)]
pub struct EventEditor {
    form: EventFormData,
    selected: Option<Event>,
}

impl EventEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &EventFormData {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventFormData {
        &mut self.form
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.selected.is_some()
    }

    /// Load `event` into the form and target it for submit/delete.
    pub fn start_edit(&mut self, event: &Event) {
        self.form = EventFormData::from_event(event);
        self.selected = Some(event.clone());
    }

    pub fn reset_form(&mut self) {
        self.form = EventFormData::default();
        self.selected = None;
    }

    /// Fresh form pre-filled with the one-hour slot starting at `hour`.
    pub fn start_create_at(&mut self, hour: u32) {
        let hour = hour.min(23);
        self.reset_form();
        self.form.start_time = format!("{hour:02}:00");
        self.form.end_time = if hour == 23 {
            "23:59".to_string()
        } else {
            format!("{:02}:00", hour + 1)
        };
    }

    /// Decide what clicking `day` of the displayed month should open.
    ///
    /// Returns `None` when `day` does not exist in that month.
    pub fn select_day(&mut self, store: &CalendarStore, day: u32) -> Option<DaySelection> {
        let date = dates::date_in_month(store.current_date(), day)?;
        let day_events = queries::events_on(date, store.events());

        if day_events.is_empty() {
            self.reset_form();
            Some(DaySelection::Create(date))
        } else {
            Some(DaySelection::Preview(day_events.into_iter().cloned().collect()))
        }
    }

    /// Validate the form and save it on `selected_date`.
    ///
    /// Edits keep the selected event's id; new events get a fresh id and
    /// start out active. On success the form is reset and the saved event
    /// returned.
    pub fn submit(
        &mut self,
        store: &mut CalendarStore,
        selected_date: NaiveDate,
        clock: &dyn Clock,
    ) -> Result<Event, SubmitError> {
        let event = self.build_event(store, selected_date, clock)?;

        if self.is_editing() {
            store.update(event.clone())?;
            tracing::info!("Updated event {} on {}", event.id, event.date);
        } else {
            store.add(event.clone())?;
            tracing::info!("Created event {} on {}", event.id, event.date);
        }

        self.reset_form();
        Ok(event)
    }

    /// Delete `id` after the user confirms. Returns whether it was removed.
    pub fn request_delete(
        &mut self,
        store: &mut CalendarStore,
        id: Uuid,
        confirm: &impl Confirm,
    ) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!("Deletion of event {} cancelled", id);
            return false;
        }

        if self.selected.as_ref().is_some_and(|event| event.id == id) {
            self.reset_form();
        }

        store.delete(id).is_some()
    }

    fn build_event(
        &self,
        store: &CalendarStore,
        selected_date: NaiveDate,
        clock: &dyn Clock,
    ) -> Result<Event, SubmitError> {
        if self.form.validate().is_err() {
            return Err(SubmitError::MissingFields);
        }

        let start_time = parse_time(&self.form.start_time)?;
        let end_time = parse_time(&self.form.end_time)?;
        if start_time >= end_time {
            return Err(SubmitError::EndBeforeStart);
        }

        if selected_date < clock.today() {
            return Err(SubmitError::PastDate);
        }

        let range = TimeRange::new(start_time, end_time);
        let editing = self.selected.as_ref().map(|event| event.id);
        if queries::overlaps(range, selected_date, store.events(), editing) {
            tracing::debug!("Slot {}-{} on {} is taken", start_time, end_time, selected_date);
            return Err(SubmitError::Overlap);
        }

        let mut event = Event {
            id: editing.unwrap_or_else(Uuid::new_v4),
            title: self.form.title.trim().to_string(),
            description: self.form.description.clone(),
            start_time,
            end_time,
            date: selected_date,
            color: self.form.color,
            status: EventStatus::Active,
        };

        if editing.is_some() && event.has_ended(clock.now()) {
            event.status = EventStatus::Expired;
        }

        Ok(event)
    }
}

fn parse_time(raw: &str) -> Result<chrono::NaiveTime, SubmitError> {
    hhmm::parse(raw).ok_or_else(|| SubmitError::InvalidTime(raw.trim().to_string()))
}
