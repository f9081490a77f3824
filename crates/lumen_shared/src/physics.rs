// crates/lumen_shared/src/physics.rs
//! Narrow request interfaces into the host physics engine.
//!
//! Gameplay never integrates bodies or resolves contacts itself. It asks the
//! host for ray casts and overlap queries, and pushes velocity / force
//! requests into a [`RigidBody`].

use std::ops::BitOr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input_types::PlayerId;

/// Bit set of collision layers a query is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    pub const OBSTACLE: LayerMask = LayerMask(1 << 1);
    pub const PLAYER: LayerMask = LayerMask(1 << 2);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn intersects(self, other: LayerMask) -> bool {
        (self.0 & other.0) != 0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
}

/// What an overlap query touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderOwner {
    Static,
    Player(PlayerId),
}

pub trait PhysicsQuery {
    /// Nearest hit along `direction` (unit length) within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit>;

    /// Every collider on `mask` intersecting the sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderOwner>;
}

/// Upright capsule collision volume, centre relative to the body position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleShape {
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
}

impl CapsuleShape {
    pub fn is_valid(&self) -> bool {
        self.height.is_finite()
            && self.radius.is_finite()
            && self.height > 0.0
            && self.radius > 0.0
            && self.height >= self.radius * 2.0
            && self.center.is_finite()
    }

    /// Lowest point of the capsule in body space.
    pub fn bottom_offset(&self) -> f32 {
        self.center.y - self.height * 0.5
    }
}

impl Default for CapsuleShape {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            center: Vec3::ZERO,
        }
    }
}

/// Requests gameplay may issue against a host-owned rigid body.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    /// Instant change in momentum (mass-scaled by the host).
    fn add_impulse(&mut self, impulse: Vec3);
    /// Continuous force applied over the next physics step.
    fn add_force(&mut self, force: Vec3);
    fn set_gravity(&mut self, enabled: bool);
    fn set_kinematic(&mut self, kinematic: bool);
    /// Direct world-space move, used while kinematic.
    fn translate(&mut self, delta: Vec3);
    fn capsule(&self) -> CapsuleShape;
    fn set_capsule(&mut self, shape: CapsuleShape);
}

/// Trigger volumes gameplay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    SlopeZone,
    SlopeExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub player: PlayerId,
    pub kind: TriggerKind,
    pub phase: TriggerPhase,
}
