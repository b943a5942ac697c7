//! Terminal fade phase.
//!
//! After the primary goal is reached the session lingers in Fading for
//! `fade_duration_s` before it is marked Done. A weakening "thinning" pulse
//! during the fade has been discussed but has no defined cadence, so the fade
//! is silent.

use super::Timestamp;

/// Seconds spent in the fade so far.
pub fn fade_elapsed(fade_start_ts: Timestamp, now: Timestamp) -> u64 {
    now.saturating_sub(fade_start_ts)
}

/// Whether the fade has run its full duration.
pub fn fade_complete(fade_start_ts: Timestamp, fade_duration_s: u32, now: Timestamp) -> bool {
    fade_elapsed(fade_start_ts, now) >= u64::from(fade_duration_s)
}
