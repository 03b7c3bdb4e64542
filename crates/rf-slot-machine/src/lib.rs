//! # rf-slot-machine — Spin sequencing for the slot machine
//!
//! Owns a fixed row of [`rf_reel::Reel`]s and runs full spin cycles on the
//! host's frame loop: staggered reel starts, a staggered stop sequence, an
//! explicit settle barrier and a single win check per cycle.
//!
//! ## Features
//!
//! - **Timer queue**: all delayed work is a cancellable task advanced by `update`
//! - **Settle barrier**: the win check waits for every reel to come to rest
//! - **Settle deadline**: reels still moving long after their stop are snapped
//! - **Timing profiles**: Normal, Turbo, Studio (slow, wide gaps between reels) sequencing
//! - **Capability interfaces**: sound, spin trigger, animations, textures and
//!   viewport are injected, each with a no-op default
//! - **Event log**: timestamped record of every step, drained with `take_events`
//!
//! ## Architecture
//!
//! ```text
//! SlotMachineController
//!     │
//!     ├── Vec<Reel>        (motion, one per column)
//!     ├── TimerQueue       (start / stop / deadline / evaluate tasks)
//!     ├── WinCheck         (Bernoulli trial)
//!     └── Collaborators    (SoundPlayer, SpinTrigger, AnimationHandle, ...)
//!           │
//!           v
//!     Vec<MachineEvent>
//! ```

pub mod button;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod machine;
pub mod sound;
pub mod timer;
pub mod timing;
pub mod win;

pub use button::*;
pub use collaborators::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use layout::*;
pub use machine::*;
pub use sound::*;
pub use timer::*;
pub use timing::*;
pub use win::*;

pub use rf_reel;
