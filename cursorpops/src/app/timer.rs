use std::time::{Duration, Instant};

/// Used when the monitor does not report a refresh rate.
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Rate to tick at: the mode the display is running now, else the fastest
/// mode it offers. 0 and 1 both mean the hardware default and are skipped.
pub fn pick_refresh_rate(current: Option<u32>, fastest_mode: Option<u32>) -> u32 {
    current
        .into_iter()
        .chain(fastest_mode)
        .find(|hz| *hz > 1)
        .unwrap_or(0)
}

/// One tick per monitor refresh, in whole milliseconds.
pub fn tick_period(refresh_rate: u32) -> Duration {
    let hz = if refresh_rate == 0 {
        DEFAULT_REFRESH_RATE
    } else {
        refresh_rate
    };

    Duration::from_millis((1000 / hz as u64).max(1))
}

/// Fixed-rate schedule for the popup's tick. The event loop sleeps until the
/// instant returned by [`Ticker::advance`] and then asks whether a tick is due.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(refresh_rate: u32, now: Instant) -> Ticker {
        Ticker {
            period: tick_period(refresh_rate),
            next: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn restart(&mut self, now: Instant) {
        self.next = now;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Schedules the tick after `now`. Missed ticks are dropped, not replayed.
    pub fn advance(&mut self, now: Instant) -> Instant {
        self.next += self.period;
        if now > self.next {
            self.next = now;
        }
        self.next
    }
}
