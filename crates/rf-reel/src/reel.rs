//! Reel — per-frame motion state machine

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ReelConfig;
use crate::error::ReelResult;
use crate::strip::SymbolStrip;
use crate::viewport::ViewportSize;

/// Below this speed a slowing reel is considered stalled
pub const STALL_SPEED: f32 = 1e-3;

// ═══════════════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Observable motion state of a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReelState {
    /// Not spinning, speed 0
    #[default]
    Idle,
    /// Spinning at constant start speed
    Spinning,
    /// Stop requested, still moving
    Slowing,
}

/// Notification produced by [`Reel::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReelEvent {
    /// Strip scrolled past the viewport and jumped back to `-strip_width`
    Wrapped,
    /// Slowing reel entered the snap band and landed on its rest offset
    Settled,
    /// Slowing reel decayed below [`STALL_SPEED`] outside the snap band and was put at rest
    Stalled,
}

impl ReelEvent {
    /// Reel is at rest after this event
    #[inline]
    pub fn is_rest(&self) -> bool {
        matches!(self, ReelEvent::Settled | ReelEvent::Stalled)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REEL
// ═══════════════════════════════════════════════════════════════════════════════

/// A horizontally scrolling symbol strip.
///
/// Call [`Reel::update`] once per frame with the frame delta. The host renders
/// the strip at [`Reel::position_offset`].
pub struct Reel {
    config: ReelConfig,
    strip: SymbolStrip,
    viewport: Arc<dyn ViewportSize>,
    /// Horizontal displacement of the strip from rest
    position_offset: f32,
    /// Pixels advanced per frame-delta unit
    speed: f32,
    spinning: bool,
    /// Wraparounds since the current spin started
    wrap_count: u32,
}

impl Reel {
    /// Create an idle reel at its rest offset
    pub fn new(
        config: ReelConfig,
        strip: SymbolStrip,
        viewport: Arc<dyn ViewportSize>,
    ) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            strip,
            viewport,
            position_offset: 0.0,
            speed: 0.0,
            spinning: false,
            wrap_count: 0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONTROL
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start spinning at the configured start speed.
    ///
    /// Calling this while already spinning only resets speed and flag. Calling
    /// it from any other state begins a new spin and clears the wrap counter.
    pub fn start_spin(&mut self) {
        if !self.spinning {
            self.wrap_count = 0;
        }
        self.spinning = true;
        self.speed = self.config.start_speed;
    }

    /// Request a stop. Deceleration happens in [`Reel::update`].
    pub fn stop_spin(&mut self) {
        self.spinning = false;
    }

    /// Put the reel at rest immediately
    pub fn snap_to_rest(&mut self) {
        self.spinning = false;
        self.speed = 0.0;
        self.position_offset = 0.0;
    }

    /// Advance motion by one frame
    pub fn update(&mut self, delta: f32) -> Option<ReelEvent> {
        if self.is_idle() {
            return None;
        }

        let mut event = None;
        self.position_offset += delta * self.speed;

        if self.position_offset > self.viewport.width() {
            self.position_offset = -self.strip.width();
            self.wrap_count += 1;
            event = Some(ReelEvent::Wrapped);
        }

        if !self.spinning && self.speed > 0.0 && self.wrap_count > 0 {
            self.speed *= self.config.slowdown_rate;

            if self.position_offset.abs() <= self.config.snap_range {
                self.snap_to_rest();
                return Some(ReelEvent::Settled);
            }

            if self.speed < STALL_SPEED {
                log::debug!(
                    "[Reel] Stalled at offset {:.1}, snapping to rest",
                    self.position_offset
                );
                self.snap_to_rest();
                return Some(ReelEvent::Stalled);
            }
        }

        event
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn state(&self) -> ReelState {
        if self.spinning {
            ReelState::Spinning
        } else if self.speed > 0.0 {
            ReelState::Slowing
        } else {
            ReelState::Idle
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.spinning && self.speed == 0.0
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    #[inline]
    pub fn position_offset(&self) -> f32 {
        self.position_offset
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn wrap_count(&self) -> u32 {
        self.wrap_count
    }

    pub fn strip(&self) -> &SymbolStrip {
        &self.strip
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }
}

impl std::fmt::Debug for Reel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reel")
            .field("state", &self.state())
            .field("position_offset", &self.position_offset)
            .field("speed", &self.speed)
            .field("wrap_count", &self.wrap_count)
            .field("symbols", &self.strip.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
