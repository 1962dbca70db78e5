use chrono::{DateTime, ParseError, Utc};
use log::debug;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Time left until the wedding, broken into display units
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Whole seconds of `max(0, target - now)` split by 86400/3600/60/1.
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (target - now).num_seconds().max(0);
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }
}

#[cfg(test)]
impl Countdown {
    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    pub fn is_over(&self) -> bool {
        self.total_seconds() == 0
    }
}

pub fn parse_target(target_iso: &str) -> Result<DateTime<Utc>, ParseError> {
    Ok(DateTime::parse_from_rfc3339(target_iso)?.with_timezone(&Utc))
}

pub fn compute_countdown(target_iso: &str, now: DateTime<Utc>) -> Result<Countdown, ParseError> {
    Ok(Countdown::between(parse_target(target_iso)?, now))
}

/// Recomputes the countdown once per period while it is alive.
///
/// Dropping the ticker aborts its timer task.
pub struct CountdownTicker {
    receiver: watch::Receiver<Countdown>,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    pub fn spawn(target: DateTime<Utc>) -> Self {
        Self::spawn_with_period(target, TICK_PERIOD)
    }

    pub fn spawn_with_period(target: DateTime<Utc>, period: Duration) -> Self {
        let (sender, receiver) = watch::channel(Countdown::between(target, Utc::now()));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if sender.send(Countdown::between(target, Utc::now())).is_err() {
                    break;
                }
            }
        });
        debug!("Countdown ticker started for {}", target);

        Self { receiver, handle }
    }

    pub fn subscribe(&self) -> watch::Receiver<Countdown> {
        self.receiver.clone()
    }

    /// The latest published value
    pub fn current(&self) -> Countdown {
        *self.receiver.borrow()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Countdown ticker stopped");
    }
}
