//! Discrete-count progress model.
//!
//! Each interaction advances the count by one. The halfway cue is a one-shot,
//! exact-index check at `bead_target / 2` (integer division); since the count
//! only ever moves by +1 it cannot be skipped.

use crate::events::Cue;

/// Outcome of advancing the bead count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeadAdvance {
    pub bead_index: u32,
    pub cues: Vec<Cue>,
    /// The count reached the target; the controller should leave Running.
    pub target_reached: bool,
}

/// Advance the count by one, saturating at `bead_target`.
///
/// Calling at the target is a no-op with no cues. The caller guarantees
/// `bead_target > 0` (validated at session start).
pub fn advance(bead_index: u32, bead_target: u32) -> BeadAdvance {
    if bead_index >= bead_target {
        return BeadAdvance {
            bead_index,
            cues: Vec::new(),
            target_reached: false,
        };
    }
    let next = bead_index + 1;
    let mut cues = Vec::new();
    if next == bead_target / 2 {
        cues.push(Cue::Halfway { bead_index: next });
    }
    BeadAdvance {
        bead_index: next,
        cues,
        target_reached: next >= bead_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_increments_by_one() {
        let a = advance(0, 108);
        assert_eq!(a.bead_index, 1);
        assert!(a.cues.is_empty());
        assert!(!a.target_reached);
    }

    #[test]
    fn halfway_cue_fires_exactly_at_half() {
        let a = advance(53, 108);
        assert_eq!(a.bead_index, 54);
        assert_eq!(a.cues, vec![Cue::Halfway { bead_index: 54 }]);

        let before = advance(52, 108);
        assert!(before.cues.is_empty());
        let after = advance(54, 108);
        assert!(after.cues.is_empty());
    }

    #[test]
    fn halfway_uses_integer_division_for_odd_targets() {
        // target 7 -> halfway at 3
        let a = advance(2, 7);
        assert_eq!(a.cues, vec![Cue::Halfway { bead_index: 3 }]);
    }

    #[test]
    fn reaching_the_target_signals_transition() {
        let a = advance(107, 108);
        assert_eq!(a.bead_index, 108);
        assert!(a.target_reached);
    }

    #[test]
    fn advance_at_target_is_a_noop() {
        let a = advance(108, 108);
        assert_eq!(a.bead_index, 108);
        assert!(a.cues.is_empty());
        assert!(!a.target_reached);
    }
}
