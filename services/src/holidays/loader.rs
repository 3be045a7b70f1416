use std::sync::Arc;

use planner::RequestToken;

use super::client::HolidaySource;
use crate::task::BackgroundTask;
use crate::SharedHolidays;

/// Fetches holidays in the background, one request at a time.
///
/// Starting a load aborts the previous request; the request token kept in
/// the [`planner::HolidayBook`] covers a response that was already on its
/// way when the abort landed.
pub struct HolidayLoader {
    source: Arc<dyn HolidaySource>,
    book: SharedHolidays,
    in_flight: Option<BackgroundTask>,
}

impl HolidayLoader {
    pub fn new(source: Arc<dyn HolidaySource>, book: SharedHolidays) -> Self {
        Self {
            source,
            book,
            in_flight: None,
        }
    }

    pub fn book(&self) -> SharedHolidays {
        Arc::clone(&self.book)
    }

    /// Request `year`, replacing any request still running.
    pub async fn load(&mut self, year: i32) -> RequestToken {
        let token = self.book.lock().await.begin(year);

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let source = Arc::clone(&self.source);
        let book = Arc::clone(&self.book);
        self.in_flight = Some(BackgroundTask::spawn("holiday-fetch", async move {
            let result = source.fetch_year(year).await;
            let mut book = book.lock().await;
            match result {
                Ok(holidays) => {
                    book.complete(token, holidays);
                }
                Err(e) => book.fail(token, &e),
            }
        }));

        token
    }

    /// Wait for the current request, if any, to finish.
    pub async fn wait(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.join().await;
        }
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
