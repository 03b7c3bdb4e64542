//! Timing profiles for the spin sequence

use serde::{Deserialize, Serialize};

/// Milliseconds per frame-delta unit at 60 fps
pub const FRAME_DURATION_MS_60FPS: f64 = 1000.0 / 60.0;

/// Timing profile for the spin sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// Studio mode (slow, wide gaps for inspecting each reel)
    Studio,
    /// Custom timing multiplier
    Custom,
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Delay between consecutive reel starts (ms)
    pub reel_start_stagger_ms: f64,

    /// Delay between consecutive reel stops (ms)
    pub reel_stop_stagger_ms: f64,

    /// Fixed part of the delay from spin start to the stop sequence (ms)
    pub spin_duration_base_ms: f64,

    /// Per-reel part of the delay from spin start to the stop sequence (ms)
    pub spin_duration_per_reel_ms: f64,

    /// Pause between the last reel settling and win evaluation (ms)
    pub settle_delay_ms: f64,

    /// After the last stop, reels still moving by this deadline are snapped (ms)
    pub settle_timeout_ms: f64,

    /// Milliseconds represented by one frame-delta unit
    pub frame_duration_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_start_stagger_ms: 100.0,
            reel_stop_stagger_ms: 100.0,
            spin_duration_base_ms: 100.0,
            spin_duration_per_reel_ms: 220.0,
            settle_delay_ms: 500.0,
            settle_timeout_ms: 5000.0,
            frame_duration_ms: FRAME_DURATION_MS_60FPS,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_start_stagger_ms: 50.0,
            reel_stop_stagger_ms: 50.0,
            spin_duration_base_ms: 50.0,
            spin_duration_per_reel_ms: 110.0,
            settle_delay_ms: 250.0,
            settle_timeout_ms: 3000.0,
            frame_duration_ms: FRAME_DURATION_MS_60FPS,
        }
    }

    /// Studio mode (wide gaps between reels)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            reel_start_stagger_ms: 250.0,
            reel_stop_stagger_ms: 350.0,
            spin_duration_base_ms: 600.0,
            spin_duration_per_reel_ms: 300.0,
            settle_delay_ms: 800.0,
            settle_timeout_ms: 8000.0,
            frame_duration_ms: FRAME_DURATION_MS_60FPS,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale sequence timing by factor (< 1.0 = faster). Frame duration is not scaled.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            reel_start_stagger_ms: self.reel_start_stagger_ms * factor,
            reel_stop_stagger_ms: self.reel_stop_stagger_ms * factor,
            spin_duration_base_ms: self.spin_duration_base_ms * factor,
            spin_duration_per_reel_ms: self.spin_duration_per_reel_ms * factor,
            settle_delay_ms: self.settle_delay_ms * factor,
            settle_timeout_ms: self.settle_timeout_ms * factor,
            frame_duration_ms: self.frame_duration_ms,
        }
    }

    /// Delay of reel `index`'s start from the spin call
    pub fn start_delay(&self, index: usize) -> f64 {
        index as f64 * self.reel_start_stagger_ms
    }

    /// Delay of reel `index`'s stop from the stop trigger
    pub fn stop_delay(&self, index: usize) -> f64 {
        index as f64 * self.reel_stop_stagger_ms
    }

    /// Delay from the spin call to the stop sequence
    pub fn stop_trigger_delay(&self, reel_count: usize) -> f64 {
        self.spin_duration_base_ms
            + reel_count.saturating_sub(1) as f64 * self.spin_duration_per_reel_ms
    }

    /// Earliest time a cycle can complete, assuming every reel settles instantly
    pub fn min_cycle_duration(&self, reel_count: usize) -> f64 {
        self.stop_trigger_delay(reel_count)
            + self.stop_delay(reel_count.saturating_sub(1))
            + self.settle_delay_ms
    }

    /// Convert a frame delta to milliseconds
    #[inline]
    pub fn delta_to_ms(&self, delta: f32) -> f64 {
        delta as f64 * self.frame_duration_ms
    }

    /// Reel `index` receives its stop strictly after its start
    pub fn stop_follows_start(&self, index: usize, reel_count: usize) -> bool {
        self.stop_trigger_delay(reel_count) + self.stop_delay(index) > self.start_delay(index)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}
