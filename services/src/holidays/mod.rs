//! Public holiday lookup: the HTTP source and the background loader.

pub mod client;
pub mod loader;

pub use client::{HolidayError, HolidaySource, HttpHolidaySource};
pub use loader::HolidayLoader;
