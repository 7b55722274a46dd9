use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime, TimeZone};
use std::future::Future;

/// Runs a job once a day at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// Today at `at` if that is still ahead of `now`, otherwise tomorrow.
    pub fn next_run_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.at);
        if today > now {
            today
        } else {
            today + ChronoDuration::days(1)
        }
    }

    fn next_local_run(&self, now: DateTime<Local>) -> DateTime<Local> {
        let mut next = self.next_run_after(now.naive_local());
        // A wall-clock time skipped by a DST jump has no local mapping; try the next day.
        loop {
            if let Some(dt) = Local.from_local_datetime(&next).earliest() {
                return dt;
            }
            next += ChronoDuration::days(1);
        }
    }

    /// Runs `job` immediately, then at every scheduled time. Failures are logged
    /// and the loop carries on.
    pub async fn run_forever<F, Fut, T, E>(&self, mut job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        loop {
            if let Err(e) = job().await {
                tracing::error!("❌ Scheduled run failed: {}", e);
            }

            let now = Local::now();
            let next = self.next_local_run(now);
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::info!("⏰ Next run at {} (in {:?})", next.format("%Y-%m-%d %H:%M"), wait);
            tokio::time::sleep(wait).await;
        }
    }
}
