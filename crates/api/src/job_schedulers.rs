use crate::{reminder::scan_reminders::ScanRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use nag_scheduler_infra::{NagContext, MAX_SCAN_INTERVAL_MINUTES};
use std::time::Duration;
use tracing::{error, info};

/// Seconds until the next wall clock multiple of `interval_secs`.
/// A full interval is returned when `now_millis` is exactly on a multiple.
pub fn get_start_delay(now_millis: i64, interval_secs: i64) -> i64 {
    if interval_secs <= 0 {
        return 0;
    }
    let now_secs = now_millis.div_euclid(1000);
    interval_secs - now_secs.rem_euclid(interval_secs)
}

pub fn start_scan_reminders_job(ctx: NagContext) {
    let interval_minutes = ctx.config.scan_interval_minutes;
    if interval_minutes == 0 {
        info!("Scan interval is set to 0, the reminders scan job will not run.");
        return;
    }
    let interval_minutes = interval_minutes.min(MAX_SCAN_INTERVAL_MINUTES);
    let interval_secs = interval_minutes * 60;

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now, interval_secs as i64);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
        info!(
            "Reminders scan job will first run in {} seconds and then every {} minutes",
            secs_to_next_run, interval_minutes
        );

        let mut scan_interval = interval_at(start, Duration::from_secs(interval_secs));
        loop {
            scan_interval.tick().await;
            // Awaited inline so that two scans never run at the same time
            if let Err(e) = execute(ScanRemindersUseCase {}, &ctx).await {
                error!("Scheduled reminders scan failed: {:?}", e);
            }
        }
    });
}
