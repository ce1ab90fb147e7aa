//! Fixed-step frame clock
//!
//! The host calls [`FrameClock::advance`] once per display refresh with a
//! millisecond timestamp and runs the returned number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    last_time_ms: Option<f64>,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            last_time_ms: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp, returning how many fixed ticks to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            // First frame only establishes the baseline
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.track_fps(now_ms);
        ticks
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (60_000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget the last timestamp (tab hidden / resumed)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_runs_no_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1000.0), 0);
    }

    #[test]
    fn test_steady_60hz_runs_one_tick_per_frame() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let mut total = 0;
        let mut t = 0.0;
        for _ in 0..60 {
            t += 1000.0 / 60.0 + 0.01;
            total += clock.advance(t);
        }
        assert!((59..=60).contains(&total), "ran {total} ticks");
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        // A 5 second hitch is clamped to MAX_FRAME_DT and MAX_SUBSTEPS
        let ticks = clock.advance(5000.0);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!((5..=6).contains(&ticks), "ran {ticks} ticks");
    }

    #[test]
    fn test_reset_forgets_baseline() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0);
    }

    proptest! {
        #[test]
        fn prop_substeps_never_exceed_cap(
            gaps in proptest::collection::vec(0.0f64..10_000.0, 1..100),
        ) {
            let mut clock = FrameClock::new();
            let mut t = 0.0;
            clock.advance(t);
            for gap in gaps {
                t += gap;
                prop_assert!(clock.advance(t) <= MAX_SUBSTEPS);
            }
        }
    }
}
