use clap::Subcommand;
use stillpoint_core::{
    render, Config, Cue, Database, FadeStyle, Mode, SessionController, SessionUpdate,
    Settings, TickRequest, Timestamp,
};

const CONTROLLER_KEY: &str = "session_controller";

#[derive(Subcommand)]
pub enum SessionAction {
    /// Begin a session (settings from config, overridable per flag)
    Start {
        /// Progress model: timed | beadcount
        #[arg(long, value_parser = parse_mode)]
        mode: Option<Mode>,
        /// Session length in seconds (timed mode)
        #[arg(long)]
        duration: Option<u32>,
        /// Seconds between anchor pulses; 0 disables them
        #[arg(long)]
        anchor_interval: Option<u32>,
        /// Fade-out style: none | thin
        #[arg(long, value_parser = parse_fade_style)]
        fade_style: Option<FadeStyle>,
        /// Fade-out length in seconds
        #[arg(long)]
        fade_duration: Option<u32>,
        /// Beads that complete a session (beadcount mode)
        #[arg(long)]
        bead_target: Option<u32>,
    },
    /// Deliver one tick at the current wall-clock time
    Tick,
    /// Route a user tap (starts when idle, advances beads when counting)
    Tap,
    /// Print the current session snapshot as JSON
    Status,
    /// Drive the session live, ticking until the core cancels its subscription
    Run,
    /// Draw the progress ring as ASCII art
    View,
    /// Reset to idle, abandoning any session in flight
    Reset,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    match s {
        "timed" => Ok(Mode::Timed),
        "beadcount" | "beads" => Ok(Mode::BeadCount),
        other => Err(format!("unknown mode '{other}' (expected timed|beadcount)")),
    }
}

fn parse_fade_style(s: &str) -> Result<FadeStyle, String> {
    match s {
        "none" => Ok(FadeStyle::None),
        "thin" => Ok(FadeStyle::Thin),
        other => Err(format!("unknown fade style '{other}' (expected none|thin)")),
    }
}

fn now() -> Timestamp {
    chrono::Utc::now().timestamp().max(0) as Timestamp
}

fn load_controller(db: &Database, config: &Config) -> SessionController {
    if let Ok(Some(json)) = db.kv_get(CONTROLLER_KEY) {
        if let Ok(controller) = serde_json::from_str::<SessionController>(&json) {
            return controller;
        }
    }
    SessionController::new(config.session)
}

fn save_controller(
    db: &Database,
    controller: &SessionController,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(controller)?;
    db.kv_set(CONTROLLER_KEY, &json)?;
    Ok(())
}

/// Actuate cues on behalf of the host: pulse lines on stderr, and the session
/// log entry once the completion cue arrives.
fn handle_cues(
    db: &Database,
    controller: &SessionController,
    update: &SessionUpdate,
    haptics: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for cue in &update.cues {
        if haptics {
            eprintln!("pulse {}ms", cue.pulse_ms());
        }
        if matches!(cue, Cue::Completion) {
            record_completion(db, controller)?;
        }
    }
    Ok(())
}

fn record_completion(
    db: &Database,
    controller: &SessionController,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = controller.settings();
    let goal = match settings.mode {
        Mode::Timed => u64::from(settings.duration_s),
        Mode::BeadCount => u64::from(settings.bead_target),
    };
    let started_at = controller
        .state()
        .start_ts
        .and_then(|ts| chrono::DateTime::from_timestamp(ts as i64, 0))
        .unwrap_or_else(chrono::Utc::now);
    db.record_session(settings.mode, goal, started_at, chrono::Utc::now())?;
    Ok(())
}

/// Render a dot ring onto a character grid.
fn ascii_ring(dots: &[render::Dot], size: usize) -> String {
    let mut grid = vec![vec![' '; size]; size];
    for dot in dots {
        let x = dot.x.round() as isize;
        let y = dot.y.round() as isize;
        if (0..size as isize).contains(&x) && (0..size as isize).contains(&y) {
            grid[y as usize][x as usize] = if dot.lit { 'o' } else { '.' };
        }
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn print_view(controller: &SessionController, at: Timestamp) {
    const SIZE: usize = 21;
    let center = (SIZE as f64 / 2.0, SIZE as f64 / 2.0);
    let radius = SIZE as f64 / 2.0 - 1.0;
    let snap = controller.snapshot(at);
    let dots = match snap.mode {
        Mode::Timed => {
            render::ring_geometry(snap.progress, render::DEFAULT_RING_STEPS, center, radius)
        }
        Mode::BeadCount => render::bead_geometry(
            snap.bead_index,
            snap.bead_target.max(1),
            render::DEFAULT_BEAD_DOTS,
            center,
            radius,
        ),
    };
    println!("{}", ascii_ring(&dots, SIZE));
    println!("{}", snap.status);
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut controller = load_controller(&db, &config);

    match action {
        SessionAction::Start {
            mode,
            duration,
            anchor_interval,
            fade_style,
            fade_duration,
            bead_target,
        } => {
            let defaults = config.session;
            let settings = Settings {
                mode: mode.unwrap_or(defaults.mode),
                duration_s: duration.unwrap_or(defaults.duration_s),
                anchor_interval_s: anchor_interval.unwrap_or(defaults.anchor_interval_s),
                fade_style: fade_style.unwrap_or(defaults.fade_style),
                fade_duration_s: fade_duration.unwrap_or(defaults.fade_duration_s),
                bead_target: bead_target.unwrap_or(defaults.bead_target),
            };
            let update = controller.start(settings, now())?;
            handle_cues(&db, &controller, &update, config.host.haptics)?;
            println!("{}", serde_json::to_string_pretty(&controller.snapshot(now()))?);
        }
        SessionAction::Tick => {
            let update = controller.tick(now());
            handle_cues(&db, &controller, &update, config.host.haptics)?;
            println!("{}", serde_json::to_string_pretty(&update)?);
        }
        SessionAction::Tap => {
            let update = controller.handle_interaction(now())?;
            handle_cues(&db, &controller, &update, config.host.haptics)?;
            println!("{}", serde_json::to_string_pretty(&update)?);
        }
        SessionAction::Status => {
            let snapshot = controller.snapshot(now());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        SessionAction::Run => {
            if !controller.state().is_active() {
                return Err("no active session (run `session start` first)".into());
            }
            let interval = std::time::Duration::from_secs(u64::from(
                config.host.tick_interval_s.max(1),
            ));
            loop {
                std::thread::sleep(interval);
                let at = now();
                let update = controller.tick(at);
                handle_cues(&db, &controller, &update, config.host.haptics)?;
                println!("{}", controller.snapshot(at).status);
                if update.tick == TickRequest::Cancel {
                    break;
                }
            }
        }
        SessionAction::View => {
            print_view(&controller, now());
        }
        SessionAction::Reset => {
            controller.reset();
            println!("{{\"type\": \"session_reset\"}}");
        }
    }

    save_controller(&db, &controller)?;
    Ok(())
}
