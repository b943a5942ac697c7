//! End-to-end session scenarios across the controller, scheduler and renderer.

use stillpoint_core::{
    render, Cue, FadeStyle, Mode, SessionController, SessionPhase, Settings, TickRequest,
};

fn timed_settings() -> Settings {
    Settings {
        mode: Mode::Timed,
        duration_s: 600,
        anchor_interval_s: 120,
        fade_style: FadeStyle::Thin,
        fade_duration_s: 60,
        bead_target: 108,
    }
}

fn bead_settings() -> Settings {
    Settings {
        mode: Mode::BeadCount,
        bead_target: 108,
        ..timed_settings()
    }
}

#[test]
fn anchor_cadence_over_a_full_timed_session() {
    let mut c = SessionController::new(timed_settings());
    c.start(timed_settings(), 0).unwrap();

    // One second early: nothing.
    assert!(c.tick(119).cues.is_empty());
    // On the boundary: exactly one anchor.
    assert_eq!(c.tick(120).cues, vec![Cue::Anchor]);
    // Same timestamp again: nothing (no double fire).
    assert!(c.tick(120).cues.is_empty());

    // Ticking every second, anchors land at 240, 360, 480 and nowhere else.
    let mut anchor_times = Vec::new();
    for now in 121..600 {
        let update = c.tick(now);
        if update.cues.contains(&Cue::Anchor) {
            anchor_times.push(now);
        }
    }
    assert_eq!(anchor_times, vec![240, 360, 480]);
}

#[test]
fn missed_ticks_yield_one_catchup_anchor() {
    // Long session so the goal is still far away at the late tick.
    let mut c = SessionController::new(timed_settings());
    c.start(
        Settings {
            duration_s: 3600,
            ..timed_settings()
        },
        0,
    )
    .unwrap();

    // Ticks stalled from t=0 to t=650: anchors at 120/240/360/480/600 were
    // missed, but only one cue fires and the schedule lands beyond now.
    let update = c.tick(650);
    assert_eq!(update.cues, vec![Cue::Anchor]);
    assert_eq!(c.state().next_anchor_ts, Some(720));

    // The following seconds stay quiet until the next boundary.
    for now in 651..720 {
        assert!(c.tick(now).cues.is_empty());
    }
    assert_eq!(c.tick(720).cues, vec![Cue::Anchor]);
}

#[test]
fn completion_cue_fires_once_timed_without_fade() {
    let mut c = SessionController::new(timed_settings());
    c.start(
        Settings {
            fade_style: FadeStyle::None,
            ..timed_settings()
        },
        0,
    )
    .unwrap();

    let mut completions = 0;
    for now in 0..700 {
        completions += c
            .tick(now)
            .cues
            .iter()
            .filter(|cue| matches!(cue, Cue::Completion))
            .count();
    }
    assert_eq!(completions, 1);
    assert_eq!(c.phase(), SessionPhase::Done);
}

#[test]
fn completion_cue_fires_once_timed_with_fade() {
    let mut c = SessionController::new(timed_settings());
    c.start(timed_settings(), 0).unwrap();

    let mut completions = 0;
    for now in 0..800 {
        completions += c
            .tick(now)
            .cues
            .iter()
            .filter(|cue| matches!(cue, Cue::Completion))
            .count();
    }
    assert_eq!(completions, 1);
    assert_eq!(c.phase(), SessionPhase::Done);
}

#[test]
fn completion_cue_fires_once_beads_with_fade() {
    let mut c = SessionController::new(bead_settings());
    c.start(bead_settings(), 0).unwrap();

    let mut completions = 0;
    for i in 0..108 {
        let update = c.handle_interaction(i).unwrap();
        completions += update
            .cues
            .iter()
            .filter(|cue| matches!(cue, Cue::Completion))
            .count();
    }
    assert_eq!(c.phase(), SessionPhase::Fading);
    for now in 108..300 {
        completions += c
            .tick(now)
            .cues
            .iter()
            .filter(|cue| matches!(cue, Cue::Completion))
            .count();
    }
    assert_eq!(completions, 1);
    assert_eq!(c.phase(), SessionPhase::Done);
}

#[test]
fn halfway_cue_fires_only_at_bead_54() {
    let mut c = SessionController::new(bead_settings());
    c.start(bead_settings(), 0).unwrap();

    let mut halfway_at = Vec::new();
    for i in 0..108u64 {
        let update = c.handle_interaction(i).unwrap();
        for cue in &update.cues {
            if let Cue::Halfway { bead_index } = cue {
                halfway_at.push(*bead_index);
            }
        }
    }
    assert_eq!(halfway_at, vec![54]);
}

#[test]
fn advancing_past_the_target_is_a_noop() {
    let settings = Settings {
        bead_target: 5,
        fade_style: FadeStyle::Thin,
        ..bead_settings()
    };
    let mut c = SessionController::new(settings);
    c.start(settings, 0).unwrap();
    for i in 0..5 {
        c.handle_interaction(i).unwrap();
    }
    assert_eq!(c.state().bead_index, 5);
    assert_eq!(c.phase(), SessionPhase::Fading);

    // Further taps land in Fading and change nothing.
    let update = c.handle_interaction(10).unwrap();
    assert!(update.cues.is_empty());
    assert_eq!(c.state().bead_index, 5);
}

#[test]
fn fade_boundary_is_inclusive() {
    let mut c = SessionController::new(timed_settings());
    c.start(timed_settings(), 0).unwrap();
    c.tick(600);
    assert_eq!(c.phase(), SessionPhase::Fading);

    assert!(c.tick(659).cues.is_empty());
    assert_eq!(c.phase(), SessionPhase::Fading);
    assert_eq!(c.tick(660).cues, vec![Cue::Completion]);
    assert_eq!(c.phase(), SessionPhase::Done);
}

#[test]
fn tick_subscription_follows_the_session_lifecycle() {
    let mut c = SessionController::new(timed_settings());
    assert_eq!(c.tick(0).tick, TickRequest::Cancel);

    let started = c.start(timed_settings(), 0).unwrap();
    assert_eq!(started.tick, TickRequest::Subscribe);
    assert_eq!(c.tick(300).tick, TickRequest::Keep);
    assert_eq!(c.tick(600).tick, TickRequest::Keep); // Fading
    assert_eq!(c.tick(660).tick, TickRequest::Cancel); // Done
    assert_eq!(c.tick(661).tick, TickRequest::Cancel);
}

#[test]
fn snapshot_drives_the_renderer() {
    let mut c = SessionController::new(timed_settings());
    c.start(timed_settings(), 0).unwrap();

    let snap = c.snapshot(150);
    let dots = render::ring_geometry(snap.progress, render::DEFAULT_RING_STEPS, (60.0, 60.0), 55.0);
    // A quarter of the way in: floor(0.25 * 60) = 15, dots 0..=15 lit.
    assert_eq!(dots.iter().filter(|d| d.lit).count(), 16);
    assert_eq!(snap.status, "07:30");

    // A snapshot earlier than start still renders (frac clamps to zero).
    c.reset();
    c.start(timed_settings(), 1000).unwrap();
    let early = c.snapshot(999);
    let dots = render::ring_geometry(early.progress, render::DEFAULT_RING_STEPS, (60.0, 60.0), 55.0);
    assert_eq!(dots.iter().filter(|d| d.lit).count(), 1);
}

#[test]
fn bead_snapshot_drives_the_renderer() {
    let mut c = SessionController::new(bead_settings());
    c.start(bead_settings(), 0).unwrap();
    for i in 0..54 {
        c.handle_interaction(i).unwrap();
    }
    let snap = c.snapshot(60);
    let dots = render::bead_geometry(
        snap.bead_index,
        snap.bead_target,
        render::DEFAULT_BEAD_DOTS,
        (60.0, 60.0),
        50.0,
    );
    assert_eq!(dots.iter().filter(|d| d.lit).count(), 19);
    assert_eq!(snap.status, "54/108");
}
