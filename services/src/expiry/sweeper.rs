use std::sync::Arc;
use std::time::Duration;

use planner::Clock;
use tokio::time;
use uuid::Uuid;

use crate::task::BackgroundTask;
use crate::SharedStore;

pub struct ExpirySweeper {
    store: SharedStore,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(store: SharedStore, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// Expire everything that has ended as of the clock's current time.
    pub async fn sweep_once(&self) -> Vec<Uuid> {
        let now = self.clock.now();
        let expired = self.store.lock().await.expire_past(now);

        if !expired.is_empty() {
            tracing::info!("Marked {} event(s) as expired", expired.len());
        }
        expired
    }

    /// Run a sweep on every tick until the returned task is dropped.
    /// The first sweep happens immediately.
    pub fn spawn(self) -> BackgroundTask {
        BackgroundTask::spawn("expiry-sweep", async move {
            let mut ticker = time::interval(self.interval);
            tracing::info!("Expiry sweeper started (interval: {:?})", self.interval);

            loop {
                ticker.tick().await;
                tracing::debug!("Running expiry sweep");
                self.sweep_once().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use planner::{CalendarStore, FixedClock};
    use shared::{Event, EventColor, EventStatus};
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;

    fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    fn event(date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Standup".to_string(),
            description: String::new(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            date,
            color: EventColor::Blue,
            status: EventStatus::Active,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    /// Clock whose time can be moved by the test
    struct ManualClock(StdMutex<NaiveDateTime>);

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    #[tokio::test]
    async fn test_sweep_expires_yesterdays_event() {
        let yesterday = today().pred_opt().unwrap();
        let past = event(yesterday, (10, 0), (11, 0));
        let later = event(today(), (15, 0), (16, 0));
        let past_id = past.id;

        let mut store = CalendarStore::new(today());
        store.add(past).unwrap();
        store.add(later.clone()).unwrap();
        let store = Arc::new(Mutex::new(store));

        let clock = Arc::new(FixedClock(at(today(), 9, 0)));
        let sweeper = ExpirySweeper::new(Arc::clone(&store), clock, Duration::from_secs(60));

        assert_eq!(sweeper.sweep_once().await, vec![past_id]);

        let store = store.lock().await;
        assert!(store.get(past_id).unwrap().is_expired());
        assert!(!store.get(later.id).unwrap().is_expired());
    }

    #[tokio::test]
    async fn test_sweep_is_idempotent() {
        let mut store = CalendarStore::new(today());
        store.add(event(today(), (8, 0), (8, 30))).unwrap();
        let store = Arc::new(Mutex::new(store));

        let clock = Arc::new(FixedClock(at(today(), 9, 0)));
        let sweeper = ExpirySweeper::new(store, clock, Duration::from_secs(60));

        assert_eq!(sweeper.sweep_once().await.len(), 1);
        assert!(sweeper.sweep_once().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_sweeper_picks_up_later_expiry() {
        let meeting = event(today(), (10, 0), (11, 0));
        let id = meeting.id;
        let mut store = CalendarStore::new(today());
        store.add(meeting).unwrap();
        let store = Arc::new(Mutex::new(store));

        let clock = Arc::new(ManualClock(StdMutex::new(at(today(), 10, 30))));
        let task = ExpirySweeper::new(
            Arc::clone(&store),
            clock.clone(),
            Duration::from_secs(60),
        )
        .spawn();

        // First tick runs right away, while the meeting is still going
        time::sleep(Duration::from_secs(1)).await;
        assert!(!store.lock().await.get(id).unwrap().is_expired());

        *clock.0.lock().unwrap() = at(today(), 11, 0);
        time::sleep(Duration::from_secs(60)).await;
        assert!(store.lock().await.get(id).unwrap().is_expired());
        assert!(!task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_task_stops_sweeps() {
        let meeting = event(today(), (10, 0), (11, 0));
        let id = meeting.id;
        let mut store = CalendarStore::new(today());
        store.add(meeting).unwrap();
        let store = Arc::new(Mutex::new(store));

        let clock = Arc::new(ManualClock(StdMutex::new(at(today(), 10, 30))));
        let task = ExpirySweeper::new(
            Arc::clone(&store),
            clock.clone(),
            Duration::from_secs(60),
        )
        .spawn();
        time::sleep(Duration::from_secs(1)).await;
        drop(task);

        *clock.0.lock().unwrap() = at(today(), 12, 0);
        time::sleep(Duration::from_secs(300)).await;
        assert!(!store.lock().await.get(id).unwrap().is_expired());
    }
}
