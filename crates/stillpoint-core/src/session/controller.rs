//! Session controller.
//!
//! A wall-clock state machine driven entirely by the host: `start`, `tick`
//! and `handle_interaction` each take the current timestamp and return the
//! cues the host should actuate. There are no internal threads or timers --
//! all periodic behavior is computed lazily from the supplied time, which
//! keeps every transition deterministic and idempotent under repeated ticks
//! with non-decreasing timestamps.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Fading -> Done        (fade_style != None)
//! Idle -> Running -> Done                  (fade_style == None)
//! ```
//!
//! Done is terminal until the host calls `reset()`.

use serde::{Deserialize, Serialize};

use super::{anchors, beads, fade};
use super::{FadeStyle, Mode, SessionPhase, SessionState, Settings, Timestamp};
use crate::error::{CoreError, Result};
use crate::events::{snapshot_time, Cue, SessionSnapshot, SessionUpdate, TickRequest};
use crate::render;

/// Top-level session state machine.
///
/// Owns the [`SessionState`] and the [`Settings`] captured when the session
/// started. Rejected operations leave both untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionController {
    settings: Settings,
    state: SessionState,
}

impl SessionController {
    /// Create an idle controller with the given settings on hand.
    ///
    /// The settings become binding (and are validated) when a session starts.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: SessionState::idle(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Seconds left toward the primary goal. Zero outside a timed run.
    pub fn remaining_s(&self, now: Timestamp) -> u64 {
        match self.state.end_ts {
            Some(end) => end.saturating_sub(now),
            None => 0,
        }
    }

    /// 0.0 .. 1.0 progress toward the primary goal.
    pub fn progress(&self, now: Timestamp) -> f64 {
        match self.state.phase {
            SessionPhase::Idle => 0.0,
            SessionPhase::Fading | SessionPhase::Done => 1.0,
            SessionPhase::Running => match self.settings.mode {
                Mode::Timed => {
                    let (Some(start), Some(end)) = (self.state.start_ts, self.state.end_ts)
                    else {
                        return 0.0;
                    };
                    if end <= start {
                        return 0.0;
                    }
                    let elapsed = now.saturating_sub(start) as f64;
                    (elapsed / (end - start) as f64).clamp(0.0, 1.0)
                }
                Mode::BeadCount => {
                    if self.settings.bead_target == 0 {
                        return 0.0;
                    }
                    f64::from(self.state.bead_index) / f64::from(self.settings.bead_target)
                }
            },
        }
    }

    /// Build a full display snapshot.
    pub fn snapshot(&self, now: Timestamp) -> SessionSnapshot {
        let status = match (self.state.phase, self.settings.mode) {
            (SessionPhase::Done, _) => "Complete".to_string(),
            (SessionPhase::Idle, Mode::Timed) => {
                render::format_remaining(u64::from(self.settings.duration_s))
            }
            (_, Mode::Timed) => render::format_remaining(self.remaining_s(now)),
            (_, Mode::BeadCount) => {
                format!("{}/{}", self.state.bead_index, self.settings.bead_target)
            }
        };
        SessionSnapshot {
            phase: self.state.phase,
            mode: self.settings.mode,
            remaining_s: self.remaining_s(now),
            progress: self.progress(now),
            bead_index: self.state.bead_index,
            bead_target: self.settings.bead_target,
            status,
            at: snapshot_time(now),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. Valid only from Idle.
    ///
    /// # Errors
    ///
    /// `IllegalTransition` when not Idle; `InvalidConfig` when the settings
    /// are unusable for their mode (`duration_s == 0` in Timed,
    /// `bead_target == 0` in BeadCount). State is unchanged on error.
    pub fn start(&mut self, settings: Settings, now: Timestamp) -> Result<SessionUpdate> {
        if self.state.phase != SessionPhase::Idle {
            return Err(CoreError::illegal_transition("start", self.state.phase));
        }
        match settings.mode {
            Mode::Timed if settings.duration_s == 0 => {
                return Err(CoreError::invalid_config(
                    "duration_s",
                    "timed sessions need a positive duration",
                ));
            }
            Mode::BeadCount if settings.bead_target == 0 => {
                return Err(CoreError::invalid_config(
                    "bead_target",
                    "bead sessions need a positive target",
                ));
            }
            _ => {}
        }

        self.settings = settings;
        self.state = SessionState {
            phase: SessionPhase::Running,
            start_ts: Some(now),
            end_ts: None,
            next_anchor_ts: None,
            fade_start_ts: None,
            bead_index: 0,
        };
        match settings.mode {
            Mode::Timed => {
                self.state.end_ts = Some(now.saturating_add(u64::from(settings.duration_s)));
                self.state.next_anchor_ts = anchors::first_anchor(now, settings.anchor_interval_s);
            }
            Mode::BeadCount => {
                self.state.bead_index = 0;
            }
        }
        Ok(SessionUpdate::quiet(TickRequest::Subscribe))
    }

    /// Advance time-driven behavior. No-op outside Running/Fading.
    pub fn tick(&mut self, now: Timestamp) -> SessionUpdate {
        match self.state.phase {
            SessionPhase::Running => match self.settings.mode {
                Mode::Timed => {
                    if let Some(end) = self.state.end_ts {
                        if now >= end {
                            // Goal reached; pending anchors at this instant
                            // are dropped in favor of the transition.
                            return self.leave_running(now);
                        }
                    }
                    let check = anchors::check(
                        self.state.next_anchor_ts,
                        self.settings.anchor_interval_s,
                        now,
                    );
                    self.state.next_anchor_ts = check.next_anchor_ts;
                    let cues = if check.fire { vec![Cue::Anchor] } else { Vec::new() };
                    SessionUpdate::new(cues, TickRequest::Keep)
                }
                // Bead progress is interaction-driven; time changes nothing.
                Mode::BeadCount => SessionUpdate::quiet(TickRequest::Keep),
            },
            SessionPhase::Fading => {
                if let Some(fade_start) = self.state.fade_start_ts {
                    if fade::fade_complete(fade_start, self.settings.fade_duration_s, now) {
                        return self.complete();
                    }
                }
                SessionUpdate::quiet(TickRequest::Keep)
            }
            SessionPhase::Idle | SessionPhase::Done => SessionUpdate::quiet(TickRequest::Cancel),
        }
    }

    /// Route a raw user interaction.
    ///
    /// Idle: starts a session with the configured settings. Running in
    /// BeadCount mode: advances the count. Anything else leaves state alone.
    pub fn handle_interaction(&mut self, now: Timestamp) -> Result<SessionUpdate> {
        match (self.state.phase, self.settings.mode) {
            (SessionPhase::Idle, _) => {
                let settings = self.settings;
                self.start(settings, now)
            }
            (SessionPhase::Running, Mode::BeadCount) => {
                let advance = beads::advance(self.state.bead_index, self.settings.bead_target);
                self.state.bead_index = advance.bead_index;
                if advance.target_reached {
                    let mut update = self.leave_running(now);
                    let mut cues = advance.cues;
                    cues.extend(update.cues);
                    update.cues = cues;
                    return Ok(update);
                }
                Ok(SessionUpdate::new(advance.cues, TickRequest::Keep))
            }
            _ => {
                let tick = if self.state.is_active() {
                    TickRequest::Keep
                } else {
                    TickRequest::Cancel
                };
                Ok(SessionUpdate::quiet(tick))
            }
        }
    }

    /// External reset back to Idle. Settings are kept for the next start.
    pub fn reset(&mut self) {
        self.state = SessionState::idle();
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Leave Running once the primary goal is reached: into the fade, or
    /// straight to Done when no fade is configured.
    fn leave_running(&mut self, now: Timestamp) -> SessionUpdate {
        self.state.end_ts = None;
        self.state.next_anchor_ts = None;
        if self.settings.fade_style == FadeStyle::None {
            return self.complete();
        }
        self.state.phase = SessionPhase::Fading;
        self.state.fade_start_ts = Some(now);
        SessionUpdate::quiet(TickRequest::Keep)
    }

    /// Enter Done. The completion cue fires here and nowhere else, so it is
    /// emitted exactly once per session whichever path reaches Done.
    fn complete(&mut self) -> SessionUpdate {
        self.state.phase = SessionPhase::Done;
        self.state.fade_start_ts = None;
        SessionUpdate::new(vec![Cue::Completion], TickRequest::Cancel)
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
