//! rf-spin-sim — headless frame driver for the slot machine controller
//!
//! Usage:
//!   rf-spin-sim --spins 100                 - Run 100 spins, print a summary
//!   rf-spin-sim --profile turbo --fps 144   - Turbo timing at 144 fps
//!   rf-spin-sim --config machine.yaml       - Load a JSON/YAML machine config
//!   rf-spin-sim --json                      - Print the event log as JSON lines

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use rf_reel::{SharedViewport, TextureAtlas};
use rf_slot_machine::{
    Collaborators, MachineConfig, SessionStats, SlotMachineController, SoundBank, SoundClip,
    SpinButton, TimingConfig, TimingProfile,
};

/// Frame rate the frame-delta unit is defined at
const REFERENCE_FPS: f32 = 60.0;

#[derive(Parser)]
#[command(name = "rf-spin-sim", about = "Run slot machine spin cycles without a renderer")]
struct Cli {
    /// Number of spins to run
    #[arg(short, long, default_value_t = 10)]
    spins: u32,

    /// Override the reel count
    #[arg(short, long)]
    reels: Option<usize>,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Seed for symbol strips and the win check
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Machine config file (.json, .yaml, .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Timing profile (overrides the config file)
    #[arg(short, long, value_enum)]
    profile: Option<Profile>,

    /// Override the win probability
    #[arg(long)]
    win_probability: Option<f64>,

    /// Give up on a spin after this many simulated seconds
    #[arg(long, default_value_t = 60.0)]
    max_seconds: f32,

    /// Print every machine event as a JSON line instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Normal,
    Turbo,
    Studio,
}

impl From<Profile> for TimingProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Normal => TimingProfile::Normal,
            Profile::Turbo => TimingProfile::Turbo,
            Profile::Studio => TimingProfile::Studio,
        }
    }
}

/// Clip that only reports what it would play
struct LogClip {
    alias: String,
}

impl SoundClip for LogClip {
    fn play(&mut self) {
        log::info!("[SoundBank] ▶ {}", self.alias);
    }

    fn stop(&mut self) {
        log::info!("[SoundBank] ■ {}", self.alias);
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    spins: u32,
    reels: usize,
    profile: TimingProfile,
    frames: u64,
    simulated_ms: f64,
    avg_cycle_ms: f64,
    stats: &'a SessionStats,
    hit_rate: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let mut machine = build_machine(config, cli.seed)?;

    if cli.fps <= 0.0 {
        bail!("--fps must be positive, got {}", cli.fps);
    }
    let delta = REFERENCE_FPS / cli.fps;
    let max_frames = (cli.max_seconds * cli.fps).ceil() as u64;

    log::info!(
        "[SpinSim] {} spins, {} reels, {:?} timing, {} fps, seed {}",
        cli.spins,
        machine.reel_count(),
        machine.config().timing.profile,
        cli.fps,
        cli.seed
    );

    let mut frames = 0u64;
    for spin in 1..=cli.spins {
        machine.spin();

        let mut spin_frames = 0u64;
        while machine.is_spin_in_progress() {
            if spin_frames >= max_frames {
                bail!("spin {} did not complete within {} s", spin, cli.max_seconds);
            }
            machine.update(delta);
            spin_frames += 1;
        }
        frames += spin_frames;

        if cli.json {
            for event in machine.take_events() {
                println!("{}", serde_json::to_string(&event)?);
            }
        } else {
            machine.take_events();
        }
    }

    if !cli.json {
        print_summary(&machine, cli.spins, frames)?;
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<MachineConfig> {
    let mut config = match &cli.config {
        Some(path) => MachineConfig::load(path)
            .with_context(|| format!("Failed to load machine config from {}", path.display()))?,
        None => MachineConfig::default(),
    };

    if let Some(reels) = cli.reels {
        config.reel_count = reels;
    }
    if let Some(profile) = cli.profile {
        config.timing = TimingConfig::from_profile(profile.into());
    }
    if let Some(win_probability) = cli.win_probability {
        config.win_probability = win_probability;
    }

    config.validate().context("Invalid machine config")?;
    Ok(config)
}

fn build_machine(config: MachineConfig, seed: u64) -> Result<SlotMachineController> {
    let textures = Arc::new(TextureAtlas::with_textures(config.texture_names()));

    let mut sounds = SoundBank::new();
    for alias in [&config.sounds.spin_loop, &config.sounds.win] {
        sounds.add(alias.as_str(), LogClip { alias: alias.clone() });
    }

    let button = SpinButton::new(textures.clone(), config.button.clone());
    let viewport = Arc::new(SharedViewport::new(config.layout.screen_width));

    let collaborators = Collaborators::default()
        .with_sound(sounds)
        .with_trigger(button)
        .with_textures(textures)
        .with_viewport(viewport);

    SlotMachineController::with_rng(config, collaborators, ChaCha8Rng::seed_from_u64(seed))
        .context("Failed to create slot machine")
}

fn print_summary(machine: &SlotMachineController, spins: u32, frames: u64) -> Result<()> {
    let stats = machine.stats();
    let simulated_ms = machine.now_ms();
    let summary = Summary {
        spins,
        reels: machine.reel_count(),
        profile: machine.config().timing.profile,
        frames,
        simulated_ms,
        avg_cycle_ms: if spins > 0 {
            simulated_ms / spins as f64
        } else {
            0.0
        },
        stats,
        hit_rate: stats.hit_rate(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("rf-spin-sim").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.spins, 10);
        assert_eq!(cli.fps, 60.0);
        assert!(!cli.json);
        assert!(cli.profile.is_none());
    }

    #[test]
    fn test_overrides_applied() {
        let cli = parse(&["--reels", "5", "--profile", "turbo", "--win-probability", "1"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.reel_count, 5);
        assert_eq!(config.timing.profile, TimingProfile::Turbo);
        assert_eq!(config.win_probability, 1.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = parse(&["--reels", "0"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_machine_runs_a_spin() {
        let config = build_config(&parse(&[])).unwrap();
        let mut machine = build_machine(config, 7).unwrap();

        machine.spin();
        for _ in 0..60 * 30 {
            machine.update(1.0);
        }
        assert_eq!(machine.stats().total_spins, 1);
    }
}
