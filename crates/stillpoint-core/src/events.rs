//! Cue events and tick-subscription intents.
//!
//! Every transition operation returns a [`SessionUpdate`]: the cues the host
//! should actuate (haptic pulses) plus the tick-subscription intent. The core
//! never drives hardware itself -- it hands side effects back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{Mode, SessionPhase, Timestamp};

/// A side-effect intent emitted by a state transition for the host to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cue {
    /// Periodic pulse during a timed running session.
    Anchor,
    /// One-shot pulse at the halfway bead.
    Halfway { bead_index: u32 },
    /// Session reached Done.
    Completion,
}

impl Cue {
    /// Suggested haptic pulse duration in milliseconds.
    pub fn pulse_ms(&self) -> u32 {
        match self {
            Cue::Anchor => 30,
            Cue::Halfway { .. } => 60,
            Cue::Completion => 120,
        }
    }
}

/// Tick-subscription intent returned to the host.
///
/// The host only delivers ticks while a session asks for them, so an Idle or
/// Done session costs no wakeups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickRequest {
    /// Begin delivering ticks.
    Subscribe,
    /// Keep the existing subscription alive.
    Keep,
    /// Stop delivering ticks.
    Cancel,
}

/// Result of a transition operation: cues to actuate plus the tick intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub cues: Vec<Cue>,
    pub tick: TickRequest,
}

impl SessionUpdate {
    pub fn new(cues: Vec<Cue>, tick: TickRequest) -> Self {
        Self { cues, tick }
    }

    /// An update with no cues that leaves the subscription alone.
    pub fn quiet(tick: TickRequest) -> Self {
        Self { cues: Vec::new(), tick }
    }
}

/// Full display snapshot for the host to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub mode: Mode,
    /// Seconds left in the primary goal (Timed mode, zero otherwise).
    pub remaining_s: u64,
    /// 0.0 .. 1.0 progress toward the primary goal.
    pub progress: f64,
    pub bead_index: u32,
    pub bead_target: u32,
    /// Textual status for the display: `MM:SS` remaining or `Complete`.
    pub status: String,
    pub at: DateTime<Utc>,
}

/// Convert a host-supplied timestamp (epoch seconds) to a UTC datetime.
pub(crate) fn snapshot_time(now: Timestamp) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(now as i64, 0).unwrap_or_default()
}
