//! Flash and auto-close timing for the alert window.

use std::time::Duration;

use crate::config::TimingConfig;

/// Extra time the watchdog allows past the display duration.
const WATCHDOG_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashSchedule {
    interval: Duration,
    duration: Duration,
}

impl FlashSchedule {
    pub fn new(interval: Duration, duration: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            duration,
        }
    }

    /// Invalid (negative, NaN) durations fall back to the defaults.
    pub fn from_config(timing: &TimingConfig) -> Self {
        let fallback = TimingConfig::default();
        let duration = Duration::try_from_secs_f64(timing.display_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(fallback.display_secs));
        Self::new(Duration::from_millis(timing.flash_interval_ms), duration)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Bright on even intervals, dimmed on odd ones, for the whole duration.
    pub fn is_bright(&self, elapsed: Duration) -> bool {
        (elapsed.as_nanos() / self.interval.as_nanos()) % 2 == 0
    }

    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Time until the next toggle or the close, whichever comes first.
    pub fn next_change(&self, elapsed: Duration) -> Duration {
        let interval = self.interval.as_nanos();
        let into_phase = elapsed.as_nanos() % interval;
        let to_toggle = Duration::from_nanos((interval - into_phase) as u64);
        to_toggle.min(self.duration.saturating_sub(elapsed))
    }

    /// Hard deadline after which the renderer process exits regardless.
    pub fn watchdog_deadline(&self) -> Duration {
        self.duration.saturating_add(WATCHDOG_GRACE)
    }
}

/// Full color when bright, 45% brightness otherwise.
pub fn shade(rgb: [u8; 3], bright: bool) -> [u8; 3] {
    if bright {
        return rgb;
    }
    rgb.map(|c| (u16::from(c) * 45 / 100) as u8)
}
