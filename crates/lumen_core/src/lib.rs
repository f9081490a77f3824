// crates/lumen_core/src/lib.rs

// Scheduler and input pipeline. Gameplay plugs in through lumen_shared::GameLogic.
pub mod engine_loop;
pub mod input;

pub use engine_loop::{EngineLoop, FrameReport};
