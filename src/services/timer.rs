// src/services/timer.rs

use std::{future::Future, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

const TICK: Duration = Duration::from_secs(1);

/// What the tick callback wants the countdown to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// A once-per-second countdown running on its own task.
///
/// The callback receives the seconds left after each tick; the task ends after
/// the tick that reports zero or as soon as the callback returns `Stop`.
#[derive(Debug)]
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn start<F, Fut>(duration_secs: u64, mut on_tick: F) -> Self
    where
        F: FnMut(u64) -> Fut + Send + 'static,
        Fut: Future<Output = TickControl> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + TICK, TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut remaining = duration_secs;
            while remaining > 0 {
                ticks.tick().await;
                remaining -= 1;
                if on_tick(remaining).await == TickControl::Stop {
                    break;
                }
            }
        });
        Countdown { handle }
    }

    /// Aborts the task. Must not be called from inside the tick callback.
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(300), "5:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_zero_once_per_second() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let countdown = Countdown::start(3, move |left| {
            sink.lock().push(left);
            async { TickControl::Continue }
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(*seen.lock(), vec![2]);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(*seen.lock(), vec![2, 1, 0]);
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_stop_early() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _countdown = Countdown::start(10, move |left| {
            sink.lock().push(left);
            async move {
                if left == 8 { TickControl::Stop } else { TickControl::Continue }
            }
        });

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(*seen.lock(), vec![9, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_aborts_pending_ticks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let countdown = Countdown::start(10, move |left| {
            sink.lock().push(left);
            async { TickControl::Continue }
        });

        tokio::time::sleep(Duration::from_millis(2500)).await;
        countdown.stop();
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(*seen.lock(), vec![9, 8]);
    }
}
