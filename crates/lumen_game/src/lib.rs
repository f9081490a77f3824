// crates/lumen_game/src/lib.rs
//! Two-player parkour gameplay: per-player locomotion and parkour state
//! machines, plus the day/night, light and orb systems they share.
//!
//! [`Game`] implements [`lumen_shared::GameLogic`] and is driven by a
//! scheduler against any [`lumen_shared::Host`].

pub mod collab;
pub mod config;
pub mod error;
pub mod events;
pub mod interference;
pub mod slot;
pub mod state;
pub mod systems;

#[cfg(test)]
mod test_support;

pub use collab::{AudioSink, Collaborators, FloatingTextSink};
pub use config::{ConfigError, GameConfig};
pub use error::{InterferenceError, SetupError, StunRejected};
pub use events::{EventBus, EventSink, GameEvent};
pub use interference::InterferenceSystem;
pub use slot::{PlayerSlot, SlotTick};
pub use state::Game;
pub use systems::animation::{AnimationBridge, AnimationFrame, Animator, RecordingAnimator};
pub use systems::camera::{CameraRig, ShakePreset};
pub use systems::day_cycle::{DayCycle, DayPhase};
pub use systems::parkour::{ParkourAction, ParkourState};
