//! Cycle scheduler.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use common::config::{ScheduleConfig, MAX_INTERVAL_MINUTES};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::cycle::SlipGenerator;

/// Run the first cycle immediately, then one per interval until `shutdown`
/// resolves. With scheduling disabled exactly one cycle runs. Shutdown is
/// only observed between cycles. Returns the number of cycles run.
pub async fn run<F>(generator: &mut SlipGenerator, schedule: &ScheduleConfig, shutdown: F) -> u64
where
    F: Future<Output = ()>,
{
    if !schedule.enabled {
        info!("Scheduling disabled, running a single cycle");
        generator.run_once().await;
        return 1;
    }

    let minutes = schedule.interval_minutes.clamp(1, MAX_INTERVAL_MINUTES);
    if minutes != schedule.interval_minutes {
        warn!(
            "interval_minutes={} out of range, using {}",
            schedule.interval_minutes, minutes
        );
    }
    let period = Duration::from_secs(minutes.saturating_mul(60));
    info!("Scheduled to run every {} minute(s). Press Ctrl+C to stop.", minutes);

    generator.run_once().await;
    let mut cycles: u64 = 1;
    log_next_due(minutes);

    let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        // Shutdown wins when a tick is also due.
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Stopping slip generator after {} cycle(s)", cycles);
                break;
            }
            _ = ticker.tick() => {
                generator.run_once().await;
                cycles = cycles.saturating_add(1);
                log_next_due(minutes);
            }
        }
    }

    cycles
}

fn log_next_due(minutes: u64) {
    let next = i64::try_from(minutes)
        .ok()
        .and_then(chrono::Duration::try_minutes)
        .and_then(|wait| Local::now().checked_add_signed(wait));
    if let Some(next) = next {
        info!("Next cycle due around {}", next.format("%Y-%m-%d %H:%M:%S"));
    }
}
