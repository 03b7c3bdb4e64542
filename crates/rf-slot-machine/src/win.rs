//! Win check — one Bernoulli trial per completed spin

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Chance a spin pays out
pub const DEFAULT_WIN_PROBABILITY: f64 = 0.3;

/// Result of a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinOutcome {
    Win,
    Loss,
}

impl SpinOutcome {
    #[inline]
    pub fn is_win(&self) -> bool {
        *self == SpinOutcome::Win
    }
}

/// Draws one uniform sample per evaluation; below `probability` is a win.
///
/// Independent of where the reels stopped.
pub struct WinCheck {
    probability: f64,
    rng: Box<dyn RngCore + Send>,
}

impl WinCheck {
    /// Entropy-seeded check
    pub fn new(probability: f64) -> Self {
        Self::with_rng(probability, StdRng::from_os_rng())
    }

    /// Reproducible check
    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::with_rng(probability, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(probability: f64, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng: Box::new(rng),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn evaluate(&mut self) -> SpinOutcome {
        let sample: f64 = self.rng.random();
        if sample < self.probability {
            SpinOutcome::Win
        } else {
            SpinOutcome::Loss
        }
    }
}

impl std::fmt::Debug for WinCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinCheck")
            .field("probability", &self.probability)
            .finish()
    }
}
