// crates/lumen_physics/src/host.rs

use std::collections::HashMap;

use glam::Vec3;
use lumen_ecs::Entity;
use lumen_shared::{
    CapsuleShape, ColliderOwner, Host, LayerMask, PhysicsQuery, PlayerId, RayHit, RigidBody,
    TriggerEvent, TriggerKind, TriggerPhase,
};
use tracing::{debug, trace};

use crate::body::SandboxBody;
use crate::geometry::{Aabb, Geometry};

/// Anything lower than this above the feet is stepped onto, not pushed against.
const STEP_HEIGHT: f32 = 0.3;
/// Feet may sink this far into a top face before the snap gives up on it.
const SNAP_TOLERANCE: f32 = 0.05;

pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Headless host: static geometry plus one body per player.
pub struct SandboxHost {
    geometry: Geometry,
    bodies: Vec<SandboxBody>,
    pub gravity: Vec3,
    occupancy: HashMap<PlayerId, HashMap<Entity, TriggerKind>>,
    pending_triggers: Vec<TriggerEvent>,
}

impl SandboxHost {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            bodies: Vec::new(),
            gravity: DEFAULT_GRAVITY,
            occupancy: HashMap::new(),
            pending_triggers: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Adds (or replaces) the body for `player`.
    pub fn spawn_body(&mut self, player: PlayerId, position: Vec3, capsule: CapsuleShape) -> &mut SandboxBody {
        self.bodies.retain(|b| b.player != player);
        self.occupancy.remove(&player);
        self.bodies.push(SandboxBody::new(player, position, capsule));
        debug!(%player, ?position, "sandbox body spawned");
        let last = self.bodies.len() - 1;
        &mut self.bodies[last]
    }

    pub fn body_state(&self, player: PlayerId) -> Option<&SandboxBody> {
        self.bodies.iter().find(|b| b.player == player)
    }

    pub fn body_state_mut(&mut self, player: PlayerId) -> Option<&mut SandboxBody> {
        self.bodies.iter_mut().find(|b| b.player == player)
    }

    fn refresh_triggers(&mut self) {
        for body in &self.bodies {
            let now: HashMap<Entity, TriggerKind> =
                self.geometry.triggers_containing(body.position).into_iter().collect();
            let prev = self.occupancy.entry(body.player).or_default();

            let mut changes: Vec<(Entity, TriggerEvent)> = Vec::new();
            for (entity, kind) in prev.iter() {
                if !now.contains_key(entity) {
                    changes.push((*entity, TriggerEvent { player: body.player, kind: *kind, phase: TriggerPhase::Exit }));
                }
            }
            for (entity, kind) in now.iter() {
                if !prev.contains_key(entity) {
                    changes.push((*entity, TriggerEvent { player: body.player, kind: *kind, phase: TriggerPhase::Enter }));
                }
            }

            // Exits before enters, then by entity, so replays are deterministic.
            changes.sort_by_key(|(e, ev)| (ev.phase == TriggerPhase::Enter, e.to_bits()));
            for (_, ev) in changes {
                debug!(player = %ev.player, kind = ?ev.kind, phase = ?ev.phase, "trigger");
                self.pending_triggers.push(ev);
            }
            *prev = now;
        }
    }
}

fn integrate(body: &mut SandboxBody, gravity: Vec3, dt: f32) {
    let impulse = std::mem::take(&mut body.pending_impulse);
    let force = std::mem::take(&mut body.pending_force);
    if body.kinematic {
        return;
    }

    let inv_mass = 1.0 / body.mass.max(f32::EPSILON);
    body.velocity += impulse * inv_mass;
    let mut accel = force * inv_mass;
    if body.use_gravity {
        accel += gravity;
    }
    body.velocity += accel * dt;
    body.position += body.velocity * dt;
}

fn resolve_contacts(geometry: &Geometry, body: &mut SandboxBody, dt: f32) {
    let solid = LayerMask::GROUND | LayerMask::OBSTACLE;
    let r = body.capsule.radius;

    // 1. Side pushes against boxes taller than a step.
    for (_, aabb) in geometry.solids(solid) {
        let overlaps_z = body.position.z + r > aabb.min.z && body.position.z - r < aabb.max.z;
        let overlaps_y = body.feet_y() < aabb.max.y - STEP_HEIGHT && body.head_y() > aabb.min.y;
        if !overlaps_z || !overlaps_y {
            continue;
        }

        let left = aabb.min.x - r;
        let right = aabb.max.x + r;
        let x = body.position.x;
        if x > left && x < right {
            if x - left < right - x {
                body.position.x = left;
                body.velocity.x = body.velocity.x.min(0.0);
            } else {
                body.position.x = right;
                body.velocity.x = body.velocity.x.max(0.0);
            }
        }
    }

    // 2. Land on the highest top face under the body centre.
    if body.velocity.y > 0.0 {
        return;
    }
    let feet = body.feet_y();
    let reach = SNAP_TOLERANCE + STEP_HEIGHT.min(-body.velocity.y * dt + SNAP_TOLERANCE);
    let support = geometry
        .solids(solid)
        .filter(|(_, aabb)| footprint_contains(aabb, body.position))
        .map(|(_, aabb)| aabb.max.y)
        .filter(|top| feet <= *top && feet >= *top - reach)
        .reduce(f32::max);

    if let Some(top) = support {
        trace!(player = %body.player, top, "feet snapped to support");
        body.position.y += top - feet;
        body.velocity.y = 0.0;
    }
}

fn footprint_contains(aabb: &Aabb, p: Vec3) -> bool {
    p.x >= aabb.min.x && p.x <= aabb.max.x && p.z >= aabb.min.z && p.z <= aabb.max.z
}

impl PhysicsQuery for SandboxHost {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let mut best = self.geometry.raycast(origin, direction, max_distance, mask);
        if !mask.intersects(LayerMask::PLAYER) {
            return best;
        }

        let dir = direction.normalize_or_zero();
        for body in &self.bodies {
            let half = Vec3::new(body.capsule.radius, body.capsule.height * 0.5, body.capsule.radius);
            let bounds = Aabb::from_center(body.position + body.capsule.center, half);
            if let Some(t) = bounds.ray_entry(origin, dir) {
                if t <= max_distance && best.map_or(true, |b| t < b.distance) {
                    best = Some(RayHit { distance: t, point: origin + dir * t });
                }
            }
        }
        best
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderOwner> {
        let mut hits = self.geometry.overlap_sphere(center, radius, mask);
        if mask.intersects(LayerMask::PLAYER) {
            hits.extend(
                self.bodies
                    .iter()
                    .filter(|b| b.distance_to_core(center) <= radius + b.capsule.radius)
                    .map(|b| ColliderOwner::Player(b.player)),
            );
        }
        hits
    }
}

impl Host for SandboxHost {
    fn query(&self) -> &dyn PhysicsQuery {
        self
    }

    fn body(&self, player: PlayerId) -> Option<&dyn RigidBody> {
        self.body_state(player).map(|b| b as &dyn RigidBody)
    }

    fn split_body(&mut self, player: PlayerId) -> Option<(&dyn PhysicsQuery, &mut dyn RigidBody)> {
        let SandboxHost { geometry, bodies, .. } = self;
        let body = bodies.iter_mut().find(|b| b.player == player)?;
        Some((geometry as &dyn PhysicsQuery, body as &mut dyn RigidBody))
    }

    fn step_physics(&mut self, fixed_dt: f32) {
        for body in self.bodies.iter_mut() {
            integrate(body, self.gravity, fixed_dt);
            if !body.kinematic {
                resolve_contacts(&self.geometry, body, fixed_dt);
            }
        }
        self.refresh_triggers();
    }

    fn drain_triggers(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.pending_triggers)
    }
}
