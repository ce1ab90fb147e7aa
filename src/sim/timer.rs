//! Epoch-guarded tick timers
//!
//! Banners and countdowns are plain tick counters owned by the game state
//! and polled once per tick. Each timer remembers the session epoch it was
//! armed in; a restart bumps the epoch, so a timer left over from an older
//! session reports [`TimerStatus::Stale`] instead of firing into the new one.

use serde::{Deserialize, Serialize};

/// Result of advancing a timer by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Still counting down
    Pending,
    /// Reached zero on this tick (reported exactly once)
    Fired,
    /// Armed in a different epoch; must be discarded
    Stale,
}

/// A one-shot countdown in simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    epoch: u32,
    remaining: u32,
}

impl Timer {
    pub fn new(epoch: u32, ticks: u32) -> Self {
        Self {
            epoch,
            remaining: ticks,
        }
    }

    /// Ticks left before firing
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Advance by one tick within `current_epoch`
    pub fn tick(&mut self, current_epoch: u32) -> TimerStatus {
        if self.epoch != current_epoch {
            return TimerStatus::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            TimerStatus::Fired
        } else {
            TimerStatus::Pending
        }
    }
}

/// Poll an optional timer slot, clearing it once it fires or goes stale.
/// Returns true only when the timer fired in the current epoch.
pub fn poll(slot: &mut Option<Timer>, current_epoch: u32) -> bool {
    let Some(timer) = slot.as_mut() else {
        return false;
    };
    match timer.tick(current_epoch) {
        TimerStatus::Pending => false,
        TimerStatus::Fired => {
            *slot = None;
            true
        }
        TimerStatus::Stale => {
            log::debug!("Dropping stale timer from epoch {}", timer.epoch());
            *slot = None;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once_after_duration() {
        let mut slot = Some(Timer::new(0, 3));
        assert!(!poll(&mut slot, 0));
        assert!(!poll(&mut slot, 0));
        assert!(poll(&mut slot, 0));
        assert!(slot.is_none());
        assert!(!poll(&mut slot, 0));
    }

    #[test]
    fn test_stale_timer_never_fires() {
        let mut slot = Some(Timer::new(1, 1));
        assert!(!poll(&mut slot, 2));
        assert!(slot.is_none());
    }

    #[test]
    fn test_timer_status_sequence() {
        let mut timer = Timer::new(4, 2);
        assert_eq!(timer.tick(4), TimerStatus::Pending);
        assert_eq!(timer.remaining(), 1);
        assert_eq!(timer.tick(4), TimerStatus::Fired);
        assert_eq!(timer.tick(5), TimerStatus::Stale);
    }
}
