// crates/lumen_physics/src/body.rs

use glam::Vec3;
use lumen_shared::{CapsuleShape, PlayerId, RigidBody};

/// A player's rigid body as the sandbox integrates it.
#[derive(Debug, Clone)]
pub struct SandboxBody {
    pub player: PlayerId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub capsule: CapsuleShape,
    pub mass: f32,
    pub use_gravity: bool,
    pub kinematic: bool,
    pub(crate) pending_force: Vec3,
    pub(crate) pending_impulse: Vec3,
}

impl SandboxBody {
    pub fn new(player: PlayerId, position: Vec3, capsule: CapsuleShape) -> Self {
        Self {
            player,
            position,
            velocity: Vec3::ZERO,
            capsule,
            mass: 1.0,
            use_gravity: true,
            kinematic: false,
            pending_force: Vec3::ZERO,
            pending_impulse: Vec3::ZERO,
        }
    }

    pub fn feet_y(&self) -> f32 {
        self.position.y + self.capsule.bottom_offset()
    }

    pub fn head_y(&self) -> f32 {
        self.position.y + self.capsule.center.y + self.capsule.height * 0.5
    }

    /// Closest distance from `point` to the capsule's core segment.
    pub fn distance_to_core(&self, point: Vec3) -> f32 {
        let half_core = (self.capsule.height * 0.5 - self.capsule.radius).max(0.0);
        let center = self.position + self.capsule.center;
        let y = point.y.clamp(center.y - half_core, center.y + half_core);
        point.distance(Vec3::new(center.x, y, center.z))
    }
}

impl RigidBody for SandboxBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        self.pending_impulse += impulse;
    }

    fn add_force(&mut self, force: Vec3) {
        self.pending_force += force;
    }

    fn set_gravity(&mut self, enabled: bool) {
        self.use_gravity = enabled;
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    fn capsule(&self) -> CapsuleShape {
        self.capsule
    }

    fn set_capsule(&mut self, shape: CapsuleShape) {
        self.capsule = shape;
    }
}
