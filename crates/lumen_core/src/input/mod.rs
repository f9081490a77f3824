// crates/lumen_core/src/input/mod.rs
pub mod arbiter;
pub mod config;
pub mod map;
pub mod poller;
pub mod registry;

// Re-export core types to keep the API `crate::input::ActionRegistry`
pub use arbiter::Arbiter;
pub use config::InputDefaults;
pub use map::InputMap;
pub use poller::{InputPoller, KeyEvent, KeyState};
pub use registry::ActionRegistry;
