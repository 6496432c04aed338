//! Display animation for the running totals.
//!
//! `Tween` is the pure interpolation; `FieldAnimation` drives one tween per
//! displayed value on a tokio task and publishes frames over a watch
//! channel. Neither touches roster state.

pub mod animator;

pub use animator::{AnimationTiming, DisplayAnimator, DisplayField, FieldAnimation};

use std::time::Duration;

/// `1 - (1 - t)^3`, clamped to [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: f64,
    pub end: f64,
    pub duration: Duration,
}

impl Tween {
    pub fn new(start: f64, end: f64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let ratio = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        ratio.clamp(0.0, 1.0)
    }

    /// Interpolated value; exactly `end` once the duration has elapsed.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * ease_out_cubic(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }
}
