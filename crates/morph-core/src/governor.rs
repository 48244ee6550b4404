//! Frame-rate driven quality tiers.
//!
//! The governor counts frames over a fixed window and picks a tier only when
//! the window closes. Between boundaries the previous tier stays active, so a
//! single slow frame never changes the parameters mid-second.

use crate::config::{GovernorConfig, TierProfile};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PerformanceLevel {
    #[default]
    High,
    Medium,
    Low,
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PerformanceLevel::High => "high",
            PerformanceLevel::Medium => "medium",
            PerformanceLevel::Low => "low",
        })
    }
}

/// Active parameters for the current tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceProfile {
    pub level: PerformanceLevel,
    pub update_interval_ms: f64,
    pub position_batch_size: usize,
    pub color_batch_size: usize,
    pub noise_amplitude: f32,
}

impl PerformanceProfile {
    fn from_tier(level: PerformanceLevel, tier: &TierProfile) -> Self {
        Self {
            level,
            update_interval_ms: tier.update_interval_ms,
            position_batch_size: tier.position_batch_size,
            color_batch_size: tier.color_batch_size,
            noise_amplitude: tier.noise_amplitude,
        }
    }
}

/// Closed sampling window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    pub fps: u32,
    pub level: PerformanceLevel,
    pub changed: bool,
}

#[derive(Clone, Debug)]
pub struct PerformanceGovernor {
    config: GovernorConfig,
    level: PerformanceLevel,
    frame_count: u32,
    window_start_ms: f64,
    last_fps: Option<u32>,
}

impl PerformanceGovernor {
    /// Start a governor whose first window opens at `now_ms`.
    pub fn new(config: GovernorConfig, now_ms: f64) -> Self {
        Self {
            config,
            level: PerformanceLevel::High,
            frame_count: 0,
            window_start_ms: now_ms,
            last_fps: None,
        }
    }

    #[inline]
    pub fn level(&self) -> PerformanceLevel {
        self.level
    }

    /// Frame count of the last closed window, if any window has closed yet.
    #[inline]
    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }

    pub fn profile(&self) -> PerformanceProfile {
        let tier = match self.level {
            PerformanceLevel::High => &self.config.high,
            PerformanceLevel::Medium => &self.config.medium,
            PerformanceLevel::Low => &self.config.low,
        };
        PerformanceProfile::from_tier(self.level, tier)
    }

    pub fn classify(&self, fps: u32) -> PerformanceLevel {
        if fps < self.config.low_fps {
            PerformanceLevel::Low
        } else if fps < self.config.medium_fps {
            PerformanceLevel::Medium
        } else {
            PerformanceLevel::High
        }
    }

    /// Count one rendered frame. Returns the sample when this frame closes
    /// the current window.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<FpsSample> {
        self.frame_count += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed < self.config.sample_window_ms {
            return None;
        }

        // normalise to frames per second; a stalled tab overshoots the window
        let fps = (self.frame_count as f64 * 1000.0 / elapsed).round() as u32;
        self.frame_count = 0;
        self.window_start_ms = now_ms;
        self.last_fps = Some(fps);

        let level = self.classify(fps);
        let changed = level != self.level;
        self.level = level;
        log::debug!("FPS: {}, Performance Level: {}", fps, level);
        Some(FpsSample {
            fps,
            level,
            changed,
        })
    }
}
