//! Easing and offset animations for sliding row content.

use std::time::{Duration, Instant};

/// Easing function for row offset animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A running horizontal offset animation for one row.
///
/// The row's logical offset jumps to `to` immediately; this only describes
/// what the renderer should draw while the content slides there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetAnimation {
    pub from: i32,
    pub to: i32,
    pub start: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl OffsetAnimation {
    pub fn new(from: i32, to: i32, duration: Duration) -> Self {
        Self {
            from,
            to,
            start: Instant::now(),
            duration,
            easing: Easing::default(),
        }
    }

    /// Eased progress in 0.0..=1.0 at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.easing.apply(t)
    }

    /// Interpolated offset at `now`.
    pub fn value_at(&self, now: Instant) -> i32 {
        let t = self.progress(now);
        self.from + ((self.to - self.from) as f32 * t).round() as i32
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}
