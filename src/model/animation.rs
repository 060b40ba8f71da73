//! Indicator animation
//!
//! The indicator slides with a fixed duration and an accelerate-decelerate
//! curve. Time is fed in explicitly through [`IndicatorAnimation::advance`],
//! so the interpolation is deterministic and does not depend on a clock.

use std::f32::consts::PI;
use std::time::Duration;

/// Duration of every indicator transition.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Map linear progress in `[0, 1]` onto a curve that starts slow, speeds up
/// through the middle and slows down at the end.
pub fn accelerate_decelerate(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// A single run of the indicator from one offset to another.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorAnimation {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl IndicatorAnimation {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Current offset. Equals `to` once the animation is finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let fraction = accelerate_decelerate(self.progress());
        self.from + (self.to - self.from) * fraction
    }

    /// Move the animation forward and return the new offset.
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(elapsed).min(self.duration);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
