//! # Stillpoint Core Library
//!
//! Core logic for Stillpoint, a guided-practice session timer. The library
//! implements a host-driven session state machine: the host supplies the
//! current time to `start`, `tick` and `handle_interaction`, and gets back
//! the new state plus the cue events (haptic pulses, tick subscription
//! intents) to actuate. The display, haptic driver and clock live with the
//! host; nothing here blocks, spawns, or reads hardware.
//!
//! ## Key Components
//!
//! - [`SessionController`]: the session state machine
//! - [`render`]: pure progress-geometry and status-text math
//! - [`Config`] / [`Database`]: TOML settings and the session log

pub mod error;
pub mod events;
pub mod render;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::{Cue, SessionSnapshot, SessionUpdate, TickRequest};
pub use session::{
    FadeStyle, Mode, SessionController, SessionPhase, SessionState, Settings, Timestamp,
};
pub use storage::{Config, Database};
