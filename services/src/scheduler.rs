use std::sync::Arc;

use chrono::Datelike;
use planner::{CalendarStore, Clock, HolidayBook, RequestToken};
use tokio::sync::Mutex;

use crate::config::ServicesConfig;
use crate::expiry::ExpirySweeper;
use crate::holidays::{HolidayLoader, HolidaySource};
use crate::task::BackgroundTask;
use crate::{SharedHolidays, SharedStore};

/// Owns the calendar state and the background work around it.
pub struct CalendarScheduler {
    config: ServicesConfig,
    store: SharedStore,
    holidays: SharedHolidays,
    loader: HolidayLoader,
    clock: Arc<dyn Clock>,
    sweep: Option<BackgroundTask>,
}

impl CalendarScheduler {
    pub fn new(
        config: ServicesConfig,
        source: Arc<dyn HolidaySource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = Arc::new(Mutex::new(CalendarStore::new(clock.today())));
        let holidays = Arc::new(Mutex::new(HolidayBook::new()));
        let loader = HolidayLoader::new(source, Arc::clone(&holidays));

        Self {
            config,
            store,
            holidays,
            loader,
            clock,
            sweep: None,
        }
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    pub fn holidays(&self) -> SharedHolidays {
        Arc::clone(&self.holidays)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn is_running(&self) -> bool {
        self.sweep.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start the expiry sweep and load holidays for the displayed year.
    pub async fn start(&mut self) {
        tracing::info!("Starting calendar scheduler");

        if self.sweep.is_none() {
            let sweeper = ExpirySweeper::new(
                Arc::clone(&self.store),
                Arc::clone(&self.clock),
                self.config.expiry_sweep_interval,
            );
            self.sweep = Some(sweeper.spawn());
        }

        self.sync_holidays().await;
    }

    /// Request holidays when the displayed year differs from the loaded
    /// one. Call after every month navigation.
    pub async fn sync_holidays(&mut self) -> Option<RequestToken> {
        let year = self.store.lock().await.current_date().year();
        let loaded = self.holidays.lock().await.year();

        if loaded == Some(year) {
            return None;
        }

        tracing::debug!("Displayed year changed to {}, loading holidays", year);
        Some(self.loader.load(year).await)
    }

    /// Wait for the pending holiday request, if any.
    pub async fn holidays_settled(&mut self) {
        self.loader.wait().await;
    }

    pub fn shutdown(&mut self) {
        tracing::info!("Stopping calendar scheduler");
        self.loader.cancel();
        if let Some(task) = self.sweep.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::HolidayError;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use planner::FixedClock;
    use shared::{Event, EventColor, EventStatus, Holiday};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use uuid::Uuid;

    /// Records requested years and answers with one holiday per year
    #[derive(Default)]
    struct RecordingSource {
        years: StdMutex<Vec<i32>>,
    }

    #[async_trait]
    impl HolidaySource for RecordingSource {
        async fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, HolidayError> {
            self.years.lock().unwrap().push(year);
            Ok(vec![Holiday {
                date: NaiveDate::from_ymd_opt(year, 12, 25).unwrap(),
                name: "Navidad".to_string(),
            }])
        }
    }

    fn clock() -> Arc<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        Arc::new(FixedClock(now))
    }

    fn scheduler(source: Arc<RecordingSource>) -> CalendarScheduler {
        CalendarScheduler::new(ServicesConfig::default(), source, clock())
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_loads_current_year() {
        let source = Arc::new(RecordingSource::default());
        let mut scheduler = scheduler(source.clone());

        scheduler.start().await;
        scheduler.holidays_settled().await;

        assert!(scheduler.is_running());
        let holidays = scheduler.holidays();
        let book = holidays.lock().await;
        assert_eq!(book.year(), Some(2025));
        assert!(book
            .holiday_on(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap())
            .is_some());
        assert_eq!(*source.years.lock().unwrap(), vec![2025]);

        drop(book);
        scheduler.shutdown();
        assert!(!scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_only_on_year_change() {
        let source = Arc::new(RecordingSource::default());
        let mut scheduler = scheduler(source.clone());

        scheduler.start().await;
        scheduler.holidays_settled().await;

        // December -> November stays in 2025
        scheduler.store().lock().await.show_previous_month();
        assert!(scheduler.sync_holidays().await.is_none());

        // November -> December -> January crosses into 2026
        scheduler.store().lock().await.show_next_month();
        scheduler.store().lock().await.show_next_month();
        let token = scheduler.sync_holidays().await.unwrap();
        assert_eq!(token.year(), 2026);
        scheduler.holidays_settled().await;

        assert_eq!(*source.years.lock().unwrap(), vec![2025, 2026]);
        assert_eq!(scheduler.holidays().lock().await.year(), Some(2026));
        scheduler.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_runs_against_store() {
        let source = Arc::new(RecordingSource::default());
        let mut scheduler = scheduler(source);

        let past = Event {
            id: Uuid::new_v4(),
            title: "Review".to_string(),
            description: String::new(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 12, 9).unwrap(),
            color: EventColor::Green,
            status: EventStatus::Active,
        };
        let id = past.id;
        scheduler.store().lock().await.add(past).unwrap();

        scheduler.start().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(scheduler.store().lock().await.get(id).unwrap().is_expired());
        scheduler.shutdown();
    }
}
