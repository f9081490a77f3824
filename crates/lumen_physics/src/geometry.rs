// crates/lumen_physics/src/geometry.rs
//! Static level geometry: solid boxes and trigger volumes kept in the ECS world.

use glam::Vec3;
use lumen_ecs::{Entity, World};
use lumen_shared::{
    CCollider, CTransform, CTrigger, ColliderOwner, LayerMask, PhysicsQuery, RayHit, TriggerKind,
};

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn distance_squared_to(&self, point: Vec3) -> f32 {
        point.clamp(self.min, self.max).distance_squared(point)
    }

    /// Slab test. Rays starting inside the box do not report it.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        if self.contains(origin) {
            return None;
        }

        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < 1e-8 {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (self.min[axis] - o) * inv;
            let mut t2 = (self.max[axis] - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

pub struct Geometry {
    world: World,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    pub fn new() -> Self {
        let mut world = World::new();
        world.register_component::<CTransform>();
        world.register_component::<CCollider>();
        world.register_component::<CTrigger>();
        Self { world }
    }

    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, layer: LayerMask) -> Entity {
        let e = self.world.spawn();
        self.world.add_component(e, CTransform { pos: center });
        self.world.add_component(e, CCollider { half_extents, layer });
        e
    }

    pub fn add_trigger(&mut self, center: Vec3, half_extents: Vec3, kind: TriggerKind) -> Entity {
        let e = self.world.spawn();
        self.world.add_component(e, CTransform { pos: center });
        self.world.add_component(e, CTrigger { half_extents, kind });
        e
    }

    pub fn remove(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity)
    }

    /// Solid boxes on `mask`, in world space.
    pub fn solids(&self, mask: LayerMask) -> impl Iterator<Item = (Entity, Aabb)> + '_ {
        self.world
            .query::<CCollider>()
            .into_iter()
            .flat_map(|set| set.iter())
            .filter(move |(_, c)| c.layer.intersects(mask))
            .filter_map(move |(e, c)| {
                let t = self.world.get_component::<CTransform>(e)?;
                Some((e, Aabb::from_center(t.pos, c.half_extents)))
            })
    }

    pub fn triggers_containing(&self, point: Vec3) -> Vec<(Entity, TriggerKind)> {
        let Some(triggers) = self.world.query::<CTrigger>() else {
            return Vec::new();
        };

        triggers
            .iter()
            .filter_map(|(e, trig)| {
                let t = self.world.get_component::<CTransform>(e)?;
                Aabb::from_center(t.pos, trig.half_extents)
                    .contains(point)
                    .then_some((e, trig.kind))
            })
            .collect()
    }
}

impl PhysicsQuery for Geometry {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        self.solids(mask)
            .filter_map(|(_, aabb)| aabb.ray_entry(origin, dir))
            .filter(|t| *t <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| RayHit {
                distance,
                point: origin + dir * distance,
            })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<ColliderOwner> {
        self.solids(mask)
            .filter(|(_, aabb)| aabb.distance_squared_to(center) <= radius * radius)
            .map(|_| ColliderOwner::Static)
            .collect()
    }
}
