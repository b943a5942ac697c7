//! Progress-rendering math.
//!
//! Pure functions mapping session progress to renderable geometry. The host
//! owns the drawing primitives; these functions only return ordered dot
//! sequences and status text, so they test without any display.

use serde::{Deserialize, Serialize};

/// Rendered beads around the ring in BeadCount mode.
pub const DEFAULT_BEAD_DOTS: u32 = 36;

/// Dots around the progress ring in Timed mode.
pub const DEFAULT_RING_STEPS: u32 = 60;

/// One renderable point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub lit: bool,
}

/// Dots of a progress ring, clockwise from twelve o'clock.
///
/// `frac` is clamped to `[0, 1]` before use, so a timestamp earlier than the
/// session start (or a degenerate fraction from the caller) still renders.
/// Dot `i` is lit iff `i <= floor(frac * steps)`; dot 0 is always lit.
pub fn ring_geometry(frac: f64, steps: u32, center: (f64, f64), radius: f64) -> Vec<Dot> {
    let frac = if frac.is_nan() { 0.0 } else { frac.clamp(0.0, 1.0) };
    let lit_upto = (frac * f64::from(steps)).floor() as u32;
    circle_dots(steps, center, radius, |i| i <= lit_upto)
}

/// Dots of a bead ring, clockwise from twelve o'clock.
///
/// `bead_index` out of `bead_target` is projected onto `rendered` dots; a dot
/// is lit iff its index is at or below the projected completion point.
/// `bead_target > 0` is guaranteed by the session invariants.
pub fn bead_geometry(
    bead_index: u32,
    bead_target: u32,
    rendered: u32,
    center: (f64, f64),
    radius: f64,
) -> Vec<Dot> {
    let completed =
        (f64::from(bead_index) / f64::from(bead_target) * f64::from(rendered)).floor() as u32;
    circle_dots(rendered, center, radius, |i| i <= completed)
}

fn circle_dots(count: u32, center: (f64, f64), radius: f64, lit: impl Fn(u32) -> bool) -> Vec<Dot> {
    (0..count)
        .map(|i| {
            let angle =
                2.0 * std::f64::consts::PI * f64::from(i) / f64::from(count)
                    - std::f64::consts::FRAC_PI_2;
            Dot {
                x: center.0 + angle.cos() * radius,
                y: center.1 + angle.sin() * radius,
                lit: lit(i),
            }
        })
        .collect()
}

/// Remaining time as `MM:SS`.
pub fn format_remaining(remaining_s: u64) -> String {
    format!("{:02}:{:02}", remaining_s / 60, remaining_s % 60)
}
