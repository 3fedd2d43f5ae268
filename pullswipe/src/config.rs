//! List interaction configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a menu closes when the user touches a different row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseStyle {
    /// Animate over the configured menu duration.
    #[default]
    Smooth,
    /// Snap shut.
    Instant,
}

/// Per-list configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeListConfig {
    /// Pixels a pointer must travel before a drag is recognised.
    pub touch_slop: u32,

    /// Duration of menu open/close animations, in milliseconds.
    pub menu_duration_ms: u64,

    /// How an open menu closes when another row is touched.
    pub close_on_foreign_touch: CloseStyle,

    /// Whether pull-to-refresh is enabled.
    pub refresh_enabled: bool,

    /// Whether load-more is enabled.
    pub load_more_enabled: bool,

    /// Whether load-more may fire before any load has reported.
    pub initial_has_more: bool,

    /// Fraction of a menu's width past which a released drag opens it.
    pub settle_threshold: f32,
}

impl Default for SwipeListConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8,
            menu_duration_ms: 200,
            close_on_foreign_touch: CloseStyle::Smooth,
            refresh_enabled: false,
            load_more_enabled: false,
            initial_has_more: true,
            settle_threshold: 0.5,
        }
    }
}

impl SwipeListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_slop(mut self, slop: u32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn menu_duration(mut self, duration: Duration) -> Self {
        self.menu_duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn close_on_foreign_touch(mut self, style: CloseStyle) -> Self {
        self.close_on_foreign_touch = style;
        self
    }

    /// Enable pull-to-refresh and/or load-more.
    pub fn pull_enable(mut self, refresh: bool, load_more: bool) -> Self {
        self.refresh_enabled = refresh;
        self.load_more_enabled = load_more;
        self
    }

    pub fn initial_has_more(mut self, has_more: bool) -> Self {
        self.initial_has_more = has_more;
        self
    }

    pub fn settle_threshold(mut self, threshold: f32) -> Self {
        self.settle_threshold = threshold;
        self
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.menu_duration_ms)
    }

    /// Duration used to close a menu when a different row is touched.
    pub fn foreign_touch_duration(&self) -> Duration {
        match self.close_on_foreign_touch {
            CloseStyle::Smooth => self.animation_duration(),
            CloseStyle::Instant => Duration::ZERO,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch_slop == 0 {
            return Err(ConfigError::ZeroSlop);
        }
        if !(self.settle_threshold > 0.0 && self.settle_threshold <= 1.0) {
            return Err(ConfigError::SettleThreshold(self.settle_threshold));
        }
        Ok(())
    }
}
