// crates/lumen_shared/src/components.rs
//! ECS components for level geometry and pickups.

use glam::Vec3;

use crate::physics::{LayerMask, TriggerKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CTransform {
    pub pos: Vec3,
}

impl Default for CTransform {
    fn default() -> Self {
        Self { pos: Vec3::ZERO }
    }
}

/// Solid axis-aligned box centred on the entity transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CCollider {
    pub half_extents: Vec3,
    pub layer: LayerMask,
}

/// Non-solid volume that reports enter/exit for player bodies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CTrigger {
    pub half_extents: Vec3,
    pub kind: TriggerKind,
}

/// Luminous orb pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct COrb {
    pub luminescence: f32,
    pub bar_value: u32,
    pub pickup_radius: f32,
    pub visible: bool,
}
