// crates/lumen_game/src/systems/mod.rs
// Per-player pipeline, leaf first.
pub mod input_sampler;
pub mod scanner;
pub mod locomotion;
pub mod parkour;
pub mod animation;

// Supporting systems
pub mod stats;
pub mod light;
pub mod day_cycle;
pub mod orbs;
pub mod collection_bar;
pub mod camera;
