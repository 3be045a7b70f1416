//! Background services around the calendar planner: holiday loading and
//! the periodic expiry sweep.

pub mod config;
pub mod expiry;
pub mod holidays;
pub mod scheduler;
pub mod task;

use std::sync::Arc;

use planner::{CalendarStore, HolidayBook};
use tokio::sync::Mutex;

/// Event store shared between the UI side and background tasks
pub type SharedStore = Arc<Mutex<CalendarStore>>;

/// Holiday cache shared with the loader task
pub type SharedHolidays = Arc<Mutex<HolidayBook>>;

pub use config::ServicesConfig;
pub use scheduler::CalendarScheduler;
