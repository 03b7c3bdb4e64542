//! Reel motion and strip configuration

use serde::{Deserialize, Serialize};

use crate::error::{ReelError, ReelResult};

/// Speed a reel jumps to on `start_spin()` (pixels per frame-delta unit)
pub const DEFAULT_START_SPEED: f32 = 50.0;

/// Per-update speed multiplier while decelerating
pub const DEFAULT_SLOWDOWN_RATE: f32 = 0.95;

/// Half-width of the snap band around the rest offset (pixels)
pub const DEFAULT_SNAP_RANGE: f32 = 25.0;

/// Motion and layout parameters for a single reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Constant speed while spinning (pixels per frame-delta unit)
    pub start_speed: f32,

    /// Geometric decay applied every update while slowing, in (0, 1)
    pub slowdown_rate: f32,

    /// Snap band half-width; a slowing reel inside `[-snap_range, snap_range]` lands at 0
    pub snap_range: f32,

    /// Number of symbols on the strip
    pub symbols_per_reel: usize,

    /// Symbol sprite size (pixels, square)
    pub symbol_size: f32,

    /// Gap between neighbouring symbols (pixels)
    pub symbol_spacing: f32,

    /// Texture names symbols are drawn from, uniformly
    pub symbol_textures: Vec<String>,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            start_speed: DEFAULT_START_SPEED,
            slowdown_rate: DEFAULT_SLOWDOWN_RATE,
            snap_range: DEFAULT_SNAP_RANGE,
            symbols_per_reel: 5,
            symbol_size: 150.0,
            symbol_spacing: 10.0,
            symbol_textures: (1..=5).map(|i| format!("symbol{}.png", i)).collect(),
        }
    }
}

impl ReelConfig {
    /// Override the snap band half-width
    pub fn with_snap_range(mut self, snap_range: f32) -> Self {
        self.snap_range = snap_range;
        self
    }

    /// Override the slowdown rate
    pub fn with_slowdown_rate(mut self, slowdown_rate: f32) -> Self {
        self.slowdown_rate = slowdown_rate;
        self
    }

    /// Override the start speed
    pub fn with_start_speed(mut self, start_speed: f32) -> Self {
        self.start_speed = start_speed;
        self
    }

    /// Horizontal distance between consecutive symbol origins
    pub fn symbol_pitch(&self) -> f32 {
        self.symbol_size + self.symbol_spacing
    }

    /// Check every field is in range
    pub fn validate(&self) -> ReelResult<()> {
        if !self.start_speed.is_finite() || self.start_speed <= 0.0 {
            return Err(ReelError::invalid(
                "start_speed",
                format!("must be a positive number, got {}", self.start_speed),
            ));
        }
        if !(self.slowdown_rate > 0.0 && self.slowdown_rate < 1.0) {
            return Err(ReelError::invalid(
                "slowdown_rate",
                format!("must be in (0, 1), got {}", self.slowdown_rate),
            ));
        }
        if !self.snap_range.is_finite() || self.snap_range < 0.0 {
            return Err(ReelError::invalid(
                "snap_range",
                format!("must be >= 0, got {}", self.snap_range),
            ));
        }
        if self.symbols_per_reel == 0 {
            return Err(ReelError::invalid("symbols_per_reel", "must be at least 1"));
        }
        if !self.symbol_size.is_finite() || self.symbol_size <= 0.0 {
            return Err(ReelError::invalid(
                "symbol_size",
                format!("must be positive, got {}", self.symbol_size),
            ));
        }
        if !self.symbol_spacing.is_finite() || self.symbol_spacing < 0.0 {
            return Err(ReelError::invalid(
                "symbol_spacing",
                format!("must be >= 0, got {}", self.symbol_spacing),
            ));
        }
        if self.symbol_textures.is_empty() {
            return Err(ReelError::invalid("symbol_textures", "must not be empty"));
        }
        Ok(())
    }
}
