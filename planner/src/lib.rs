//! Scheduling core for the calendar: month layout, event queries, the
//! event store, the create/edit controller and holiday bookkeeping.
//!
//! Nothing in here performs I/O or spawns tasks; time enters through
//! [`clock::Clock`] and holidays through [`holidays::HolidayBook`].

pub mod clock;
pub mod dates;
pub mod editor;
pub mod error;
pub mod holidays;
pub mod queries;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use editor::{Confirm, DaySelection, EventEditor, SubmitError};
pub use error::{StoreError, StoreResult};
pub use holidays::{HolidayBook, RequestToken};
pub use store::CalendarStore;
