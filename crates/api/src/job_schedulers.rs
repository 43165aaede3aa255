use crate::{reminder::run_reminder_sweep::RunReminderSweepUseCase, shared::usecase::execute};
use actix_web::rt::task::JoinHandle;
use actix_web::rt::time::{interval_at, Instant};
use student_progress_domain::days_to_millis;
use student_progress_infra::ProgressContext;
use std::time::Duration;
use tracing::{error, info};

const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;

/// Millis from `now` until the next time the clock shows `hour_utc`:00 UTC.
/// Returns 0 when `now` is exactly at the run time.
pub fn millis_until_next_daily_run(now: i64, hour_utc: u32) -> i64 {
    let millis_per_day = days_to_millis(1);
    let millis_into_day = now.rem_euclid(millis_per_day);
    let delay = i64::from(hour_utc) * MILLIS_PER_HOUR - millis_into_day;
    if delay >= 0 {
        delay
    } else {
        delay + millis_per_day
    }
}

/// Runs the reminder sweep once a day at `Config::reminder_sweep_hour_utc`
pub struct ReminderJobScheduler {
    ctx: ProgressContext,
}

/// Handle to a started `ReminderJobScheduler`
pub struct ReminderJobHandle {
    handle: JoinHandle<()>,
}

impl ReminderJobHandle {
    /// Stops the scheduler. A sweep that is in progress is abandoned at its
    /// next suspension point.
    pub fn stop(self) {
        info!("Stopping the reminder job scheduler");
        self.handle.abort();
    }
}

impl ReminderJobScheduler {
    pub fn new(ctx: ProgressContext) -> Self {
        Self { ctx }
    }

    pub fn start(self) -> ReminderJobHandle {
        let ctx = self.ctx;
        let handle = actix_web::rt::spawn(async move {
            let now = ctx.sys.get_timestamp_millis();
            let delay = millis_until_next_daily_run(now, ctx.config.reminder_sweep_hour_utc);
            info!(
                "Reminder sweep scheduled daily at {:02}:00 UTC, first run in {} seconds",
                ctx.config.reminder_sweep_hour_utc,
                delay / 1000
            );

            let start = Instant::now() + Duration::from_millis(delay as u64);
            let mut daily_interval =
                interval_at(start, Duration::from_millis(days_to_millis(1) as u64));
            loop {
                daily_interval.tick().await;
                // Awaited before the next tick so that sweeps never overlap
                if let Err(e) = execute(RunReminderSweepUseCase {}, &ctx).await {
                    error!("Scheduled reminder sweep failed: {:?}", e);
                }
            }
        });

        ReminderJobHandle { handle }
    }
}
