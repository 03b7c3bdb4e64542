//! # rf-reel — Reel motion for the slot machine
//!
//! A reel is a horizontally scrolling strip of symbol sprites with a
//! one-dimensional motion model:
//!
//! ```text
//! Idle ──start_spin()──▶ Spinning ──stop_spin()──▶ Slowing ──snap──▶ Idle
//!  speed = 0             speed = start_speed        speed *= decay    offset = 0
//! ```
//!
//! - **Wraparound**: once the strip scrolls past the viewport width it jumps
//!   back to `-strip_width` and the wrap counter increments.
//! - **Slowdown**: only after at least one wrap since the spin started, so a
//!   reel always visibly moves before it stops.
//! - **Snap**: inside the snap band the reel lands exactly on its rest offset.
//!
//! Rendering is not done here. The strip exposes symbol positions and texture
//! handles; the host draws them at `position_offset`.

pub mod config;
pub mod error;
pub mod reel;
pub mod strip;
pub mod texture;
pub mod viewport;

pub use config::*;
pub use error::*;
pub use reel::*;
pub use strip::*;
pub use texture::*;
pub use viewport::*;
