// crates/lumen_physics/src/lib.rs
//! Sandbox physics host used by the demo binary and the end-to-end tests.

mod body;
mod geometry;
mod host;

pub use body::SandboxBody;
pub use geometry::{Aabb, Geometry};
pub use host::{SandboxHost, DEFAULT_GRAVITY};
