//! Holidays for the displayed year.
//!
//! Fetching happens elsewhere; this module only decides which response is
//! allowed to land. Each request gets a token and only the newest token's
//! response is kept, so a slow answer for a year the user already left
//! cannot overwrite the current one.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use shared::Holiday;

use crate::dates::date_in_month;

/// Ticket identifying one holiday request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    year: i32,
    generation: u64,
}

impl RequestToken {
    pub fn year(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone, Default)]
pub struct HolidayBook {
    year: Option<i32>,
    generation: u64,
    holidays: Vec<Holiday>,
}

impl HolidayBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Year of the most recent request
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Start a request for `year`, superseding any request in flight.
    ///
    /// Switching to a different year drops the old list right away.
    pub fn begin(&mut self, year: i32) -> RequestToken {
        if self.year != Some(year) {
            self.holidays.clear();
        }
        self.year = Some(year);
        self.generation += 1;

        RequestToken {
            year,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.generation == self.generation
    }

    /// Store the response for `token`. Returns false if it was superseded.
    pub fn complete(&mut self, token: RequestToken, holidays: Vec<Holiday>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(
                "Discarding stale holidays for {} ({} entries)",
                token.year,
                holidays.len()
            );
            return false;
        }

        tracing::info!("Loaded {} holidays for {}", holidays.len(), token.year);
        self.holidays = holidays;
        true
    }

    /// Record a failed request; the list stays as it is.
    pub fn fail(&mut self, token: RequestToken, error: &dyn fmt::Display) {
        if self.is_current(token) {
            tracing::error!("Failed to fetch holidays for {}: {}", token.year, error);
        } else {
            tracing::debug!("Ignoring failure of stale holiday request for {}", token.year);
        }
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|holiday| holiday.date == date)
    }

    /// Holiday on `day` of the month displayed by `current_date`
    pub fn holiday_in_month(&self, day: u32, current_date: NaiveDate) -> Option<&Holiday> {
        self.holiday_on(date_in_month(current_date, day)?)
    }

    /// Day numbers of the displayed month that are holidays
    pub fn holiday_days_in_month(&self, current_date: NaiveDate) -> BTreeSet<u32> {
        self.holidays
            .iter()
            .filter(|holiday| {
                holiday.date.year() == current_date.year()
                    && holiday.date.month() == current_date.month()
            })
            .map(|holiday| holiday.date.day())
            .collect()
    }
}
