//! Anchor cue scheduling.
//!
//! Anchors are periodic pulses during a timed running session. The schedule
//! is computed lazily from the timestamp supplied at each tick -- there is no
//! internal timer. When ticks arrive late the schedule catches up in one step:
//! a single cue fires and the next due time is advanced past `now`, so a slow
//! host neither double-fires nor starves future anchors.

use super::Timestamp;

/// Outcome of consulting the anchor schedule at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorCheck {
    /// Whether exactly one anchor cue is due.
    pub fire: bool,
    /// The advanced schedule; `None` once anchors are disabled.
    pub next_anchor_ts: Option<Timestamp>,
}

/// First anchor time for a session starting at `now`; `None` when the
/// interval is zero (anchors disabled).
pub fn first_anchor(now: Timestamp, anchor_interval_s: u32) -> Option<Timestamp> {
    if anchor_interval_s == 0 {
        return None;
    }
    Some(now.saturating_add(u64::from(anchor_interval_s)))
}

/// Check whether an anchor is due and advance the schedule past `now`.
///
/// At most one cue fires per call, however many intervals were missed.
pub fn check(
    next_anchor_ts: Option<Timestamp>,
    anchor_interval_s: u32,
    now: Timestamp,
) -> AnchorCheck {
    let Some(mut next) = next_anchor_ts else {
        return AnchorCheck {
            fire: false,
            next_anchor_ts: None,
        };
    };
    if now < next {
        return AnchorCheck {
            fire: false,
            next_anchor_ts: Some(next),
        };
    }
    let interval = u64::from(anchor_interval_s);
    if interval == 0 {
        // Schedule exists but can no longer advance; drop it.
        return AnchorCheck {
            fire: false,
            next_anchor_ts: None,
        };
    }
    while next <= now {
        next = next.saturating_add(interval);
    }
    AnchorCheck {
        fire: true,
        next_anchor_ts: Some(next),
    }
}
