//! Slot machine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use rf_reel::ReelConfig;

use crate::button::ButtonTextures;
use crate::error::{SlotError, SlotResult};
use crate::layout::LayoutConfig;
use crate::timing::TimingConfig;
use crate::win::DEFAULT_WIN_PROBABILITY;

/// Sound aliases the controller cues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundCues {
    /// Loop played from spin start until the cycle completes
    pub spin_loop: String,
    /// One-shot on a win
    pub win: String,
}

impl Default for SoundCues {
    fn default() -> Self {
        Self {
            spin_loop: "Reel spin".into(),
            win: "win".into(),
        }
    }
}

/// Animation names looked up on the animation handles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationCues {
    /// Looped on the frame animation
    pub idle: String,
    /// Played once on the win animation
    pub win_start: String,
}

impl Default for AnimationCues {
    fn default() -> Self {
        Self {
            idle: "idle".into(),
            win_start: "start".into(),
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Number of reels, fixed for the machine's lifetime
    pub reel_count: usize,
    /// Chance a completed spin is a win, in [0, 1]
    pub win_probability: f64,
    pub reel: ReelConfig,
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub sounds: SoundCues,
    pub animations: AnimationCues,
    pub button: ButtonTextures,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            reel_count: 3,
            win_probability: DEFAULT_WIN_PROBABILITY,
            reel: ReelConfig::default(),
            timing: TimingConfig::default(),
            layout: LayoutConfig::default(),
            sounds: SoundCues::default(),
            animations: AnimationCues::default(),
            button: ButtonTextures::default(),
        }
    }
}

impl MachineConfig {
    pub fn with_reel_count(mut self, reel_count: usize) -> Self {
        self.reel_count = reel_count;
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_win_probability(mut self, win_probability: f64) -> Self {
        self.win_probability = win_probability;
        self
    }

    pub fn with_reel(mut self, reel: ReelConfig) -> Self {
        self.reel = reel;
        self
    }

    /// Every texture name the machine may request
    pub fn texture_names(&self) -> Vec<String> {
        let mut names = self.reel.symbol_textures.clone();
        names.push(self.button.enabled.clone());
        names.push(self.button.disabled.clone());
        names
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn validate(&self) -> SlotResult<()> {
        if self.reel_count == 0 {
            return Err(SlotError::invalid("reel_count", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.win_probability) {
            return Err(SlotError::invalid(
                "win_probability",
                format!("must be in [0, 1], got {}", self.win_probability),
            ));
        }

        self.reel.validate()?;

        let timing = &self.timing;
        let durations = [
            ("timing.reel_start_stagger_ms", timing.reel_start_stagger_ms),
            ("timing.reel_stop_stagger_ms", timing.reel_stop_stagger_ms),
            ("timing.spin_duration_base_ms", timing.spin_duration_base_ms),
            ("timing.spin_duration_per_reel_ms", timing.spin_duration_per_reel_ms),
            ("timing.settle_delay_ms", timing.settle_delay_ms),
            ("timing.settle_timeout_ms", timing.settle_timeout_ms),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(SlotError::invalid(field, format!("must be >= 0, got {}", value)));
            }
        }
        if !timing.frame_duration_ms.is_finite() || timing.frame_duration_ms <= 0.0 {
            return Err(SlotError::invalid(
                "timing.frame_duration_ms",
                format!("must be positive, got {}", timing.frame_duration_ms),
            ));
        }
        if let Some(reel) = (0..self.reel_count).find(|&i| !timing.stop_follows_start(i, self.reel_count)) {
            return Err(SlotError::invalid(
                "timing",
                format!("reel {} would be stopped before it starts", reel),
            ));
        }

        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> SlotResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> SlotResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> SlotResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match extension.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            other => return Err(SlotError::UnsupportedFormat(other.to_string())),
        };
        log::info!("[SlotMachine] Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn to_json(&self) -> SlotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> SlotResult<String> {
        Ok(serde_yml::to_string(self)?)
    }
}
