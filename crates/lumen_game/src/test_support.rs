// crates/lumen_game/src/test_support.rs
//! Scripted physics doubles for component-level tests.

use glam::Vec3;
use lumen_shared::{CapsuleShape, ColliderOwner, LayerMask, PhysicsQuery, RayHit, RigidBody};

/// Answers ray casts from a few switches instead of geometry.
///
/// Horizontal rays starting above `body_y + 0.3` count as "high" probes.
#[derive(Debug, Clone, Default)]
pub struct FakeWorld {
    pub body_y: f32,
    pub ground: bool,
    pub ceiling: bool,
    /// Distance to the obstacle in front of the low probes.
    pub obstacle_ahead: Option<f32>,
    /// Whether the obstacle ahead also blocks the high probe.
    pub obstacle_tall: bool,
    pub nearby: Vec<ColliderOwner>,
}

impl FakeWorld {
    pub fn grounded() -> Self {
        Self { ground: true, ..Default::default() }
    }

    pub fn vaultable() -> Self {
        Self {
            ground: true,
            obstacle_ahead: Some(1.5),
            ..Default::default()
        }
    }
}

impl PhysicsQuery for FakeWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, _mask: LayerMask) -> Option<RayHit> {
        let hit = |distance: f32| {
            (distance <= max_distance).then_some(RayHit {
                distance,
                point: origin + direction * distance,
            })
        };

        if direction.y < -0.5 {
            return self.ground.then(|| hit(0.99)).flatten();
        }
        if direction.y > 0.5 {
            return self.ceiling.then(|| hit(0.5)).flatten();
        }

        let d = self.obstacle_ahead?;
        let high = origin.y > self.body_y + 0.3;
        if high && !self.obstacle_tall {
            return None;
        }
        hit(d)
    }

    fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: LayerMask) -> Vec<ColliderOwner> {
        self.nearby.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FakeBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub capsule: CapsuleShape,
    pub gravity: bool,
    pub kinematic: bool,
    pub impulses: Vec3,
    pub forces: Vec3,
}

impl Default for FakeBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            capsule: CapsuleShape::default(),
            gravity: true,
            kinematic: false,
            impulses: Vec3::ZERO,
            forces: Vec3::ZERO,
        }
    }
}

impl RigidBody for FakeBody {
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
        self.impulses += impulse;
    }

    fn add_force(&mut self, force: Vec3) {
        self.forces += force;
    }

    fn set_gravity(&mut self, enabled: bool) {
        self.gravity = enabled;
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
