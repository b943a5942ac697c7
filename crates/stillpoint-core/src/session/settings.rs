//! Per-session settings.
//!
//! Immutable once a session starts. Unknown or missing keys fall back to the
//! documented defaults, so a partially filled config table still yields a
//! usable session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Timed,
    #[serde(alias = "beads")]
    BeadCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeStyle {
    None,
    Thin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Primary goal length in seconds (Timed mode).
    #[serde(default = "default_duration_s")]
    pub duration_s: u32,
    /// Spacing of anchor cues in seconds; 0 disables anchors.
    #[serde(default = "default_anchor_interval_s")]
    pub anchor_interval_s: u32,
    #[serde(default = "default_fade_style")]
    pub fade_style: FadeStyle,
    /// Length of the terminal fade phase in seconds.
    #[serde(default = "default_fade_duration_s")]
    pub fade_duration_s: u32,
    /// Beads that complete a session (BeadCount mode).
    #[serde(default = "default_bead_target")]
    pub bead_target: u32,
}

// Default functions
fn default_mode() -> Mode {
    Mode::Timed
}
fn default_duration_s() -> u32 {
    600
}
fn default_anchor_interval_s() -> u32 {
    120
}
fn default_fade_style() -> FadeStyle {
    FadeStyle::Thin
}
fn default_fade_duration_s() -> u32 {
    60
}
fn default_bead_target() -> u32 {
    108
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            duration_s: default_duration_s(),
            anchor_interval_s: default_anchor_interval_s(),
            fade_style: default_fade_style(),
            fade_duration_s: default_fade_duration_s(),
            bead_target: default_bead_target(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::default();
        assert_eq!(s.mode, Mode::Timed);
        assert_eq!(s.duration_s, 600);
        assert_eq!(s.anchor_interval_s, 120);
        assert_eq!(s.fade_style, FadeStyle::Thin);
        assert_eq!(s.fade_duration_s, 60);
        assert_eq!(s.bead_target, 108);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s: Settings = serde_json::from_str(r#"{"mode":"beadcount"}"#).unwrap();
        assert_eq!(s.mode, Mode::BeadCount);
        assert_eq!(s.bead_target, 108);
        assert_eq!(s.fade_style, FadeStyle::Thin);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let s: Settings =
            serde_json::from_str(r#"{"duration_s":300,"pattern":"none"}"#).unwrap();
        assert_eq!(s.duration_s, 300);
    }

    #[test]
    fn settings_roundtrip_through_toml() {
        let s = Settings::default();
        let text = toml::to_string(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, s);
    }
}
