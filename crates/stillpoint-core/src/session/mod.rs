pub mod anchors;
pub mod beads;
pub mod fade;

mod controller;
mod settings;
mod state;

pub use controller::SessionController;
pub use settings::{FadeStyle, Mode, Settings};
pub use state::{SessionPhase, SessionState, Timestamp};
