use std::time::Duration;

use seerr_config::LoaderTiming;
use tokio::time::Instant;

/// Minimum spacing between page fetches, chosen from how the load trigger
/// has moved since the last fetch completed.
///
/// A trigger that left the viewport and came back means the user is
/// scrolling, so the short delay applies. A trigger that never left means
/// the user is parked at the bottom and the long delay applies.
#[derive(Debug, Clone)]
pub struct FetchThrottle {
    scroll_delay: Duration,
    parked_delay: Duration,
    last_completed: Option<Instant>,
    trigger_left: bool,
}

impl FetchThrottle {
    pub fn new(timing: &LoaderTiming) -> Self {
        Self {
            scroll_delay: timing.scroll_delay,
            parked_delay: timing.parked_delay,
            last_completed: None,
            trigger_left: false,
        }
    }

    pub fn required_delay(&self) -> Duration {
        if self.trigger_left {
            self.scroll_delay
        } else {
            self.parked_delay
        }
    }

    /// Time still to wait before the next fetch may start. `None` means a
    /// fetch may start now; the first fetch of a session is never delayed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let elapsed = now.saturating_duration_since(last);
        self.required_delay()
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
    }

    /// A fetch is starting; trigger movement is tracked afresh from here.
    pub fn record_start(&mut self) {
        self.trigger_left = false;
    }

    pub fn record_completion(&mut self, now: Instant, trigger_visible: bool) {
        self.last_completed = Some(now);
        // Out of view at completion already counts as having left. A leave
        // seen while the fetch was in flight is kept.
        if !trigger_visible {
            self.trigger_left = true;
        }
    }

    pub fn note_trigger_left(&mut self) {
        self.trigger_left = true;
    }

    pub fn last_completed(&self) -> Option<Instant> {
        self.last_completed
    }
}
