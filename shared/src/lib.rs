//! Types shared between the planning core and the background services.

pub mod api;
pub mod models;

pub use api::{ErrorResponse, EventFormData};
pub use models::{Event, EventColor, EventStatus, Holiday, TimeRange};
