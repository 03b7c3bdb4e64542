//! Slot machine controller — spin sequencing
//!
//! One spin cycle:
//!
//! ```text
//! spin()
//!   ├── reel[i].start_spin()      at i * start_stagger
//!   └── stop sequence             at spin duration
//!         ├── reel[i].stop_spin() at i * stop_stagger
//!         └── last stop arms the settle deadline
//! every reel settled (or snapped at the deadline)
//!   └── win check                 after settle delay
//!         └── guard cleared, spin loop stopped, trigger re-enabled
//! ```
//!
//! Everything runs on the caller's frame loop through [`SlotMachineController::update`].

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use rf_reel::{Reel, ReelEvent, SymbolStrip};

use crate::collaborators::{AnimationHandle, Collaborators, SpinTrigger};
use crate::config::MachineConfig;
use crate::error::SlotResult;
use crate::event::{MachineEvent, MachineEventKind};
use crate::layout::MachineLayout;
use crate::timer::{TaskHandle, TimerQueue};
use crate::win::{SpinOutcome, WinCheck};

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION STATS
// ═══════════════════════════════════════════════════════════════════════════════

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Completed spin cycles
    pub total_spins: u64,
    pub wins: u64,
    pub losses: u64,
    /// `spin()` calls ignored because a cycle was running
    pub rejected_spins: u64,
    /// Reels snapped at the settle deadline
    pub forced_snaps: u64,
    /// Reels that decayed to a stall outside the snap band and jumped to rest
    pub stalled_snaps: u64,
}

impl SessionStats {
    /// Calculate hit rate (percent)
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SPIN CYCLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Delayed work inside a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinTask {
    StartReel(usize),
    BeginStop,
    StopReel(usize),
    SettleDeadline,
    Evaluate,
}

/// Where the running cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyclePhase {
    /// Reels starting / spinning at full speed
    Spinning,
    /// Stop sequence running, waiting for every reel to settle
    Stopping,
    /// All reels at rest, win check scheduled
    Evaluating,
}

/// How a reel came to rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestKind {
    /// Landed in the snap band
    Settled,
    /// Decayed below stall speed and was put at rest
    Stalled,
    /// Snapped at the settle deadline
    Forced,
}

#[derive(Debug)]
struct SpinCycle {
    spin_id: u64,
    phase: CyclePhase,
    stops_issued: usize,
    settled: Vec<bool>,
    /// Every task scheduled for this cycle
    tasks: Vec<TaskHandle>,
    deadline: Option<TaskHandle>,
}

impl SpinCycle {
    fn new(spin_id: u64, reel_count: usize) -> Self {
        Self {
            spin_id,
            phase: CyclePhase::Spinning,
            stops_issued: 0,
            settled: vec![false; reel_count],
            tasks: Vec::new(),
            deadline: None,
        }
    }

    fn all_settled(&self) -> bool {
        self.stops_issued == self.settled.len() && self.settled.iter().all(|&s| s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTROLLER
// ═══════════════════════════════════════════════════════════════════════════════

/// Owns the reels and runs spin cycles
pub struct SlotMachineController {
    config: MachineConfig,
    reels: Vec<Reel>,
    layout: MachineLayout,
    timers: TimerQueue<SpinTask>,
    cycle: Option<SpinCycle>,
    collaborators: Collaborators,
    win_check: WinCheck,
    events: Vec<MachineEvent>,
    stats: SessionStats,
    spin_count: u64,
    last_outcome: Option<SpinOutcome>,
}

impl SlotMachineController {
    /// Create a controller with entropy-seeded symbol strips and win check
    pub fn new(config: MachineConfig, collaborators: Collaborators) -> SlotResult<Self> {
        Self::with_rng(config, collaborators, StdRng::from_os_rng())
    }

    /// Create a controller drawing strips and win samples from `rng`
    pub fn with_rng(
        config: MachineConfig,
        mut collaborators: Collaborators,
        mut rng: impl RngCore + Send + 'static,
    ) -> SlotResult<Self> {
        config.validate()?;

        let reels = (0..config.reel_count)
            .map(|_| {
                let strip =
                    SymbolStrip::random(&config.reel, collaborators.textures.as_ref(), &mut rng);
                Reel::new(config.reel.clone(), strip, collaborators.viewport.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let layout = MachineLayout::compute(&config.layout, &config.reel, config.reel_count);

        init_animations(&config, &mut collaborators);

        log::info!(
            "[SlotMachine] Created with {} reels ({:?} timing)",
            config.reel_count,
            config.timing.profile
        );

        Ok(Self {
            win_check: WinCheck::with_rng(config.win_probability, rng),
            config,
            reels,
            layout,
            timers: TimerQueue::new(),
            cycle: None,
            collaborators,
            events: Vec::new(),
            stats: SessionStats::default(),
            spin_count: 0,
            last_outcome: None,
        })
    }

    /// Swap the spin trigger (e.g. once the button sprite exists)
    pub fn set_spin_trigger(&mut self, trigger: impl SpinTrigger + 'static) {
        let mut trigger: Box<dyn SpinTrigger> = Box::new(trigger);
        trigger.set_enabled(self.cycle.is_none());
        self.collaborators.trigger = trigger;
    }

    /// Swap the win animation
    pub fn set_win_animation(&mut self, animation: impl AnimationHandle + 'static) {
        let mut animation: Box<dyn AnimationHandle> = Box::new(animation);
        animation.set_visible(false);
        self.collaborators.win_animation = animation;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a spin cycle. Returns false (and does nothing else) if one is running.
    pub fn spin(&mut self) -> bool {
        if self.cycle.is_some() {
            log::debug!("[SlotMachine] Spin ignored, cycle in progress");
            self.stats.rejected_spins += 1;
            self.record(MachineEventKind::SpinRejected);
            return false;
        }

        let stale = self.timers.cancel_all();
        if stale > 0 {
            log::warn!("[SlotMachine] Cancelled {} stale timers", stale);
        }

        self.spin_count += 1;
        let spin_id = self.spin_count;
        let reel_count = self.reels.len();
        let mut cycle = SpinCycle::new(spin_id, reel_count);

        self.collaborators.sound.play(&self.config.sounds.spin_loop);
        self.collaborators.trigger.set_enabled(false);
        self.collaborators.win_animation.set_visible(false);

        let timing = &self.config.timing;
        for reel in 0..reel_count {
            cycle
                .tasks
                .push(self.timers.schedule(timing.start_delay(reel), SpinTask::StartReel(reel)));
        }
        cycle.tasks.push(
            self.timers
                .schedule(timing.stop_trigger_delay(reel_count), SpinTask::BeginStop),
        );

        self.cycle = Some(cycle);
        self.record(MachineEventKind::SpinStarted { spin_id });
        log::info!("[SlotMachine] Spin #{} started", spin_id);
        true
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FRAME UPDATE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Per-frame update: fire due timers, then move every reel by `delta`
    pub fn update(&mut self, delta: f32) {
        self.timers.advance(self.config.timing.delta_to_ms(delta));
        while let Some((_, task)) = self.timers.pop_due() {
            self.run_task(task);
        }

        let rested: Vec<(usize, RestKind)> = self
            .reels
            .iter_mut()
            .enumerate()
            .filter_map(|(i, reel)| match reel.update(delta) {
                Some(ReelEvent::Settled) => Some((i, RestKind::Settled)),
                Some(ReelEvent::Stalled) => Some((i, RestKind::Stalled)),
                _ => None,
            })
            .collect();

        for (reel, kind) in rested {
            self.mark_settled(reel, kind);
        }
    }

    fn run_task(&mut self, task: SpinTask) {
        match task {
            SpinTask::StartReel(reel) => {
                self.reels[reel].start_spin();
                log::debug!("[SlotMachine] Reel {} started", reel);
                self.record(MachineEventKind::ReelStarted { reel });
            }
            SpinTask::BeginStop => self.begin_stop(),
            SpinTask::StopReel(reel) => self.stop_reel(reel),
            SpinTask::SettleDeadline => self.settle_deadline(),
            SpinTask::Evaluate => self.evaluate(),
        }
    }

    fn begin_stop(&mut self) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        cycle.phase = CyclePhase::Stopping;

        let timing = &self.config.timing;
        for reel in 0..self.reels.len() {
            cycle
                .tasks
                .push(self.timers.schedule(timing.stop_delay(reel), SpinTask::StopReel(reel)));
        }
        self.record(MachineEventKind::StopSequenceStarted);
    }

    fn stop_reel(&mut self, reel: usize) {
        self.reels[reel].stop_spin();
        log::debug!("[SlotMachine] Reel {} stopping", reel);
        self.record(MachineEventKind::ReelStopRequested { reel });

        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        cycle.stops_issued += 1;

        if cycle.stops_issued == self.reels.len() {
            let deadline = self
                .timers
                .schedule(self.config.timing.settle_timeout_ms, SpinTask::SettleDeadline);
            cycle.tasks.push(deadline);
            cycle.deadline = Some(deadline);
            // reels that came to rest before the last stop already count
            self.try_schedule_evaluation();
        }
    }

    fn settle_deadline(&mut self) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        cycle.deadline = None;

        let stragglers: Vec<usize> = cycle
            .settled
            .iter()
            .enumerate()
            .filter(|(_, settled)| !**settled)
            .map(|(i, _)| i)
            .collect();

        for reel in stragglers {
            log::warn!("[SlotMachine] Reel {} still moving at settle deadline, snapping", reel);
            self.reels[reel].snap_to_rest();
            self.mark_settled(reel, RestKind::Forced);
        }
    }

    /// Count a reel as settled for the running cycle
    fn mark_settled(&mut self, reel: usize, kind: RestKind) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        if cycle.phase != CyclePhase::Stopping || cycle.settled[reel] {
            return;
        }
        cycle.settled[reel] = true;

        match kind {
            RestKind::Settled => {
                log::debug!("[SlotMachine] Reel {} settled", reel);
                self.record(MachineEventKind::ReelSettled { reel });
            }
            RestKind::Stalled => {
                log::warn!("[SlotMachine] Reel {} stalled outside the snap band", reel);
                self.stats.stalled_snaps += 1;
                self.record(MachineEventKind::ReelStalled { reel });
            }
            RestKind::Forced => {
                self.stats.forced_snaps += 1;
                self.record(MachineEventKind::ReelForceSnapped { reel });
            }
        }

        self.try_schedule_evaluation();
    }

    /// Schedule the win check once every reel is stopped and settled
    fn try_schedule_evaluation(&mut self) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        if cycle.phase != CyclePhase::Stopping || !cycle.all_settled() {
            return;
        }

        if let Some(deadline) = cycle.deadline.take() {
            self.timers.cancel(deadline);
        }
        cycle.phase = CyclePhase::Evaluating;
        cycle
            .tasks
            .push(self.timers.schedule(self.config.timing.settle_delay_ms, SpinTask::Evaluate));
    }

    fn evaluate(&mut self) {
        let Some(cycle) = self.cycle.take() else {
            return;
        };

        let outcome = self.win_check.evaluate();
        self.record(MachineEventKind::WinEvaluated { outcome });

        if outcome.is_win() {
            log::info!("[SlotMachine] Spin #{}: Winner!", cycle.spin_id);
            self.collaborators.sound.play(&self.config.sounds.win);

            let win_start = &self.config.animations.win_start;
            let animation = &mut self.collaborators.win_animation;
            animation.set_visible(true);
            if animation.has_animation(win_start) {
                animation.set_animation(0, win_start, false);
            }
            self.stats.wins += 1;
        } else {
            log::info!("[SlotMachine] Spin #{}: no win", cycle.spin_id);
            self.stats.losses += 1;
        }

        self.collaborators.sound.stop(&self.config.sounds.spin_loop);
        self.collaborators.trigger.set_enabled(true);

        self.stats.total_spins += 1;
        self.last_outcome = Some(outcome);
        self.record(MachineEventKind::SpinCompleted {
            spin_id: cycle.spin_id,
            outcome,
        });
    }

    fn record(&mut self, kind: MachineEventKind) {
        self.events
            .push(MachineEvent::new(kind, self.timers.now_ms()));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// A spin cycle is running; `spin()` would be ignored
    pub fn is_spin_in_progress(&self) -> bool {
        self.cycle.is_some()
    }

    /// Phase of the running cycle
    pub fn phase(&self) -> Option<CyclePhase> {
        self.cycle.as_ref().map(|c| c.phase)
    }

    /// Handles of every task scheduled for the running cycle
    pub fn cycle_tasks(&self) -> &[TaskHandle] {
        self.cycle.as_ref().map(|c| c.tasks.as_slice()).unwrap_or(&[])
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Controller clock (ms since construction)
    pub fn now_ms(&self) -> f64 {
        self.timers.now_ms()
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn reel(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index)
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn layout(&self) -> &MachineLayout {
        &self.layout
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Number of spins started so far
    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }

    pub fn last_outcome(&self) -> Option<SpinOutcome> {
        self.last_outcome
    }

    /// Events recorded since the last call
    pub fn take_events(&mut self) -> Vec<MachineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[MachineEvent] {
        &self.events
    }
}

impl std::fmt::Debug for SlotMachineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotMachineController")
            .field("reels", &self.reels)
            .field("phase", &self.phase())
            .field("pending_timers", &self.timers.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Start the frame idle loop and hide the win burst
fn init_animations(config: &MachineConfig, collaborators: &mut Collaborators) {
    let idle = &config.animations.idle;
    if collaborators.idle_animation.has_animation(idle) {
        collaborators.idle_animation.set_animation(0, idle, true);
    }
    collaborators.win_animation.set_visible(false);
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingConfig;
    use rand_chacha::ChaCha8Rng;

    fn controller(config: MachineConfig) -> SlotMachineController {
        SlotMachineController::with_rng(config, Collaborators::default(), ChaCha8Rng::seed_from_u64(3))
            .unwrap()
    }

    fn run_frames(machine: &mut SlotMachineController, frames: usize) {
        for _ in 0..frames {
            machine.update(1.0);
        }
    }

    fn count(events: &[MachineEvent], name: &str) -> usize {
        events.iter().filter(|e| e.type_name() == name).count()
    }

    #[test]
    fn test_construction() {
        let machine = controller(MachineConfig::default());
        assert_eq!(machine.reel_count(), 3);
        assert!(!machine.is_spin_in_progress());
        assert_eq!(machine.pending_timers(), 0);
        assert!(machine.reels().iter().all(|r| r.is_idle()));
    }

    #[test]
    fn test_invalid_config_fails() {
        let result = SlotMachineController::new(
            MachineConfig::default().with_reel_count(0),
            Collaborators::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_spin_schedules_starts_and_stop() {
        let mut machine = controller(MachineConfig::default());
        assert!(machine.spin());

        // 3 starts + stop trigger
        assert_eq!(machine.pending_timers(), 4);
        assert_eq!(machine.cycle_tasks().len(), 4);
        assert_eq!(machine.phase(), Some(CyclePhase::Spinning));
    }

    #[test]
    fn test_first_reel_starts_on_next_frame() {
        let mut machine = controller(MachineConfig::default());
        machine.spin();
        machine.update(1.0);

        assert!(machine.reel(0).unwrap().is_spinning());
        assert!(!machine.reel(1).unwrap().is_spinning());
    }

    #[test]
    fn test_second_spin_rejected() {
        let mut machine = controller(MachineConfig::default());
        assert!(machine.spin());
        assert!(!machine.spin());
        assert_eq!(machine.stats().rejected_spins, 1);
        assert_eq!(machine.pending_timers(), 4);
    }

    #[test]
    fn test_update_without_spin_keeps_reels_idle() {
        let mut machine = controller(MachineConfig::default());
        run_frames(&mut machine, 120);
        assert!(machine.reels().iter().all(|r| r.position_offset() == 0.0));
        assert!(machine.take_events().is_empty());
    }

    #[test]
    fn test_full_cycle_completes() {
        let mut machine = controller(MachineConfig::default());
        machine.spin();
        run_frames(&mut machine, 60 * 15);

        assert!(!machine.is_spin_in_progress());
        assert_eq!(machine.stats().total_spins, 1);
        assert!(machine.last_outcome().is_some());
        assert!(machine.reels().iter().all(|r| r.is_idle() && r.position_offset() == 0.0));

        let events = machine.take_events();
        assert_eq!(count(&events, "reel_started"), 3);
        assert_eq!(count(&events, "reel_stop_requested"), 3);
        assert_eq!(
            count(&events, "reel_settled")
                + count(&events, "reel_stalled")
                + count(&events, "reel_force_snapped"),
            3
        );
        assert_eq!(count(&events, "win_evaluated"), 1);
        assert_eq!(count(&events, "spin_completed"), 1);
    }

    #[test]
    fn test_deadline_snaps_reel_that_never_wraps() {
        // viewport far wider than any travel: reels never wrap, so never decelerate
        let collaborators = Collaborators::default()
            .with_viewport(std::sync::Arc::new(rf_reel::FixedViewport(1.0e9)));
        let timing = TimingConfig {
            settle_timeout_ms: 1000.0,
            ..TimingConfig::normal()
        };
        let mut machine = SlotMachineController::with_rng(
            MachineConfig::default().with_timing(timing),
            collaborators,
            ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();

        machine.spin();
        run_frames(&mut machine, 60 * 5);

        assert!(!machine.is_spin_in_progress());
        assert_eq!(machine.stats().forced_snaps, 3);
        assert!(machine.reels().iter().all(|r| r.is_idle() && r.position_offset() == 0.0));

        let events = machine.take_events();
        assert_eq!(count(&events, "reel_force_snapped"), 3);
        assert_eq!(count(&events, "win_evaluated"), 1);
    }

    #[test]
    fn test_stall_outside_snap_band_is_reported() {
        // A zero-width band only catches an exact landing on rest
        let config =
            MachineConfig::default().with_reel(rf_reel::ReelConfig::default().with_snap_range(0.0));
        let mut machine = controller(config);

        machine.spin();
        run_frames(&mut machine, 60 * 15);

        assert!(!machine.is_spin_in_progress());
        assert_eq!(machine.stats().stalled_snaps, 3);
        assert_eq!(machine.stats().forced_snaps, 0);

        let events = machine.take_events();
        assert_eq!(count(&events, "reel_stalled"), 3);
        assert_eq!(count(&events, "reel_settled"), 0);
        assert_eq!(count(&events, "win_evaluated"), 1);
        assert!(machine.reels().iter().all(|r| r.is_idle() && r.position_offset() == 0.0));
    }

    #[test]
    fn test_evaluation_waits_for_settle_delay() {
        let collaborators = Collaborators::default()
            .with_viewport(std::sync::Arc::new(rf_reel::FixedViewport(1.0e9)));
        let timing = TimingConfig {
            settle_timeout_ms: 0.0,
            settle_delay_ms: 500.0,
            ..TimingConfig::normal()
        };
        let mut machine = SlotMachineController::with_rng(
            MachineConfig::default().with_timing(timing),
            collaborators,
            ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();

        machine.spin();
        let mut snapped_at = None;
        let mut evaluated_at = None;
        for _ in 0..600 {
            machine.update(1.0);
            for event in machine.take_events() {
                match event.kind {
                    MachineEventKind::ReelForceSnapped { .. } => {
                        snapped_at.get_or_insert(event.timestamp_ms);
                    }
                    MachineEventKind::WinEvaluated { .. } => evaluated_at = Some(event.timestamp_ms),
                    _ => {}
                }
            }
        }

        let (snapped_at, evaluated_at) = (snapped_at.unwrap(), evaluated_at.unwrap());
        assert!(evaluated_at - snapped_at >= 500.0);
    }

    #[test]
    fn test_session_stats_hit_rate() {
        let stats = SessionStats {
            total_spins: 10,
            wins: 3,
            losses: 7,
            ..SessionStats::default()
        };
        assert!((stats.hit_rate() - 30.0).abs() < 1e-9);
        assert_eq!(SessionStats::default().hit_rate(), 0.0);
    }
}
