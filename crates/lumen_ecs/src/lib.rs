// crates/lumen_ecs/src/lib.rs
//! Minimal sparse-set ECS holding level geometry, triggers and pickups.

mod entity;
mod storage;
mod world;

pub use entity::Entity;
pub use storage::SparseSet;
pub use world::World;
