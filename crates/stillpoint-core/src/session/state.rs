use serde::{Deserialize, Serialize};

/// Host-supplied time, in seconds. Monotonic enough for subtraction and
/// comparison; the core never reads a clock of its own.
pub type Timestamp = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Running,
    Fading,
    Done,
}

/// The single mutable entity of a session.
///
/// Exclusively owned by `SessionController`; phases move only along
/// `Idle -> Running -> (Fading ->) Done`, and Done is terminal until the host
/// resets. Timed-mode fields (`end_ts`, `next_anchor_ts`) are present only
/// while Running; `fade_start_ts` only while Fading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    #[serde(default)]
    pub start_ts: Option<Timestamp>,
    #[serde(default)]
    pub end_ts: Option<Timestamp>,
    #[serde(default)]
    pub next_anchor_ts: Option<Timestamp>,
    #[serde(default)]
    pub fade_start_ts: Option<Timestamp>,
    /// Beads completed so far; never decreases, never exceeds the target.
    #[serde(default)]
    pub bead_index: u32,
}

impl SessionState {
    pub fn idle() -> Self {
        Self {
            phase: SessionPhase::Idle,
            start_ts: None,
            end_ts: None,
            next_anchor_ts: None,
            fade_start_ts: None,
            bead_index: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Running | SessionPhase::Fading)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_has_no_timestamps() {
        let s = SessionState::idle();
        assert_eq!(s.phase, SessionPhase::Idle);
        assert!(s.start_ts.is_none());
        assert!(s.end_ts.is_none());
        assert!(s.next_anchor_ts.is_none());
        assert!(s.fade_start_ts.is_none());
        assert_eq!(s.bead_index, 0);
        assert!(!s.is_active());
    }

    #[test]
    fn state_roundtrips_through_json() {
        let s = SessionState {
            phase: SessionPhase::Running,
            start_ts: Some(1000),
            end_ts: Some(1600),
            next_anchor_ts: Some(1120),
            fade_start_ts: None,
            bead_index: 0,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
