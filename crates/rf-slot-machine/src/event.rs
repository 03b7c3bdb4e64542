//! MachineEvent — timestamped record of what the controller did

use serde::{Deserialize, Serialize};

use crate::win::SpinOutcome;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MachineEventKind {
    /// Spin accepted, sequence scheduled
    SpinStarted { spin_id: u64 },
    /// Spin requested while another was in progress
    SpinRejected,
    /// Start timer fired for a reel
    ReelStarted { reel: usize },
    /// Spin duration elapsed, stop timers scheduled
    StopSequenceStarted,
    /// Stop timer fired for a reel
    ReelStopRequested { reel: usize },
    /// Reel came to rest on its own
    ReelSettled { reel: usize },
    /// Reel decayed to a stall outside the snap band and jumped to rest
    ReelStalled { reel: usize },
    /// Reel was still moving at the settle deadline and got snapped
    ReelForceSnapped { reel: usize },
    /// Win check ran
    WinEvaluated { outcome: SpinOutcome },
    /// Trigger re-enabled, machine ready for the next spin
    SpinCompleted { spin_id: u64, outcome: SpinOutcome },
}

/// An event with the controller clock time it happened at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineEvent {
    pub kind: MachineEventKind,
    /// Controller clock (ms since construction)
    pub timestamp_ms: f64,
}

impl MachineEvent {
    pub fn new(kind: MachineEventKind, timestamp_ms: f64) -> Self {
        Self { kind, timestamp_ms }
    }

    /// Get event type name
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            MachineEventKind::SpinStarted { .. } => "spin_started",
            MachineEventKind::SpinRejected => "spin_rejected",
            MachineEventKind::ReelStarted { .. } => "reel_started",
            MachineEventKind::StopSequenceStarted => "stop_sequence_started",
            MachineEventKind::ReelStopRequested { .. } => "reel_stop_requested",
            MachineEventKind::ReelSettled { .. } => "reel_settled",
            MachineEventKind::ReelStalled { .. } => "reel_stalled",
            MachineEventKind::ReelForceSnapped { .. } => "reel_force_snapped",
            MachineEventKind::WinEvaluated { .. } => "win_evaluated",
            MachineEventKind::SpinCompleted { .. } => "spin_completed",
        }
    }

    /// Reel index, for per-reel events
    pub fn reel(&self) -> Option<usize> {
        match self.kind {
            MachineEventKind::ReelStarted { reel }
            | MachineEventKind::ReelStopRequested { reel }
            | MachineEventKind::ReelSettled { reel }
            | MachineEventKind::ReelStalled { reel }
            | MachineEventKind::ReelForceSnapped { reel } => Some(reel),
            _ => None,
        }
    }
}
