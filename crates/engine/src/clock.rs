//! Fixed-timestep clock.
//!
//! Time is accumulated in units of `nanoseconds × tick rate`, so one fixed step
//! is exactly one second's worth of nanoseconds. This keeps step counting
//! exact for rates that do not divide a millisecond evenly (60 Hz and 50ms
//! elapsed are exactly three steps, not two and a rounding error).

use std::time::{Duration, Instant};

use tracing::warn;

use crate::types::FPS_WINDOW_MS;

const STEP_UNITS: u128 = 1_000_000_000;

/// What one wake-up of the clock produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Fixed steps to simulate this wake-up (zero, one or many).
    pub fixed_steps: u32,
    /// Wall-clock time credited to this wake-up, after clamping.
    pub elapsed: Duration,
    /// Fraction of the next fixed step already elapsed, in `[0, 1)`.
    pub interpolation: f64,
    /// Frames counted over the last second, reported once per second.
    pub fps: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    tick_rate_hz: u32,
    max_frame: Duration,
    accumulator: u128,
    last: Option<Instant>,
    fps_window_start: Option<Instant>,
    frames: u32,
}

impl FixedClock {
    /// A rate of zero is treated as one step per second.
    pub fn new(tick_rate_hz: u32, max_frame: Duration) -> Self {
        Self {
            tick_rate_hz: tick_rate_hz.max(1),
            max_frame,
            accumulator: 0,
            last: None,
            fps_window_start: None,
            frames: 0,
        }
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    pub fn max_frame(&self) -> Duration {
        self.max_frame
    }

    /// Duration of one fixed step in milliseconds (16.667 at 60 Hz).
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.tick_rate_hz as f64
    }

    /// Start measuring from `now`, discarding accumulated time.
    pub fn reset(&mut self, now: Instant) {
        self.accumulator = 0;
        self.last = Some(now);
        self.fps_window_start = Some(now);
        self.frames = 0;
    }

    /// Account for the time since the previous wake-up.
    pub fn advance(&mut self, now: Instant) -> Step {
        let last = self.last.replace(now).unwrap_or(now);
        let raw = now.saturating_duration_since(last);
        let elapsed = if raw > self.max_frame {
            warn!(
                elapsed_ms = raw.as_millis() as u64,
                max_ms = self.max_frame.as_millis() as u64,
                "stall detected; dropping excess time"
            );
            self.max_frame
        } else {
            raw
        };

        self.accumulator += elapsed.as_nanos() * self.tick_rate_hz as u128;
        let fixed_steps = (self.accumulator / STEP_UNITS) as u32;
        self.accumulator %= STEP_UNITS;
        let interpolation = self.accumulator as f64 / STEP_UNITS as f64;

        self.frames += 1;
        let window_start = *self.fps_window_start.get_or_insert(now);
        let fps = if now.saturating_duration_since(window_start)
            >= Duration::from_millis(FPS_WINDOW_MS as u64)
        {
            let fps = self.frames;
            self.frames = 0;
            self.fps_window_start = Some(now);
            Some(fps)
        } else {
            None
        };

        Step {
            fixed_steps,
            elapsed,
            interpolation,
            fps,
        }
    }

    /// Time left from `now` until the accumulator reaches the next step.
    pub fn until_next_step(&self, now: Instant) -> Duration {
        let since = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        let pending = self.accumulator + since.as_nanos() * self.tick_rate_hz as u128;
        if pending >= STEP_UNITS {
            return Duration::ZERO;
        }
        let nanos = (STEP_UNITS - pending) / self.tick_rate_hz as u128;
        Duration::from_nanos(nanos as u64)
    }
}
