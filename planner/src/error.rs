//! Errors raised by the event store.
//!
//! Store errors are conditions the caller is expected to turn into a
//! user-facing message; none of them leave the store in a partial state.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

/// Rejected store mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The slot intersects an event already scheduled on the same day
    #[error("event overlaps an existing event on {date} between {start} and {end}")]
    Overlap {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    /// No event with this id is in the store
    #[error("event {0} not found")]
    NotFound(Uuid),

    /// The event ends at or before it starts
    #[error("event must end after it starts ({start} - {end})")]
    InvalidRange { start: NaiveTime, end: NaiveTime },

    /// An event with this id is already in the store
    #[error("event {0} already exists")]
    DuplicateId(Uuid),
}

impl StoreError {
    pub fn is_overlap(&self) -> bool {
        matches!(self, StoreError::Overlap { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
