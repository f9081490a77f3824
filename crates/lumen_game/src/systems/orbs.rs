// crates/lumen_game/src/systems/orbs.rs
//! Luminous orbs, stored as entities in their own ECS world.

use glam::Vec3;
use lumen_ecs::{Entity, World};
use lumen_shared::{COrb, CTransform};
use tracing::trace;

use crate::config::OrbTuning;

/// One orb picked up this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub orb: Entity,
    pub position: Vec3,
    pub luminescence: f32,
    pub bar_value: u32,
}

pub struct OrbField {
    world: World,
}

impl Default for OrbField {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbField {
    pub fn new() -> Self {
        let mut world = World::new();
        world.register_component::<CTransform>();
        world.register_component::<COrb>();
        Self { world }
    }

    pub fn spawn(&mut self, position: Vec3, tuning: &OrbTuning) -> Entity {
        let e = self.world.spawn();
        self.world.add_component(e, CTransform { pos: position });
        self.world.add_component(
            e,
            COrb {
                luminescence: tuning.luminescence_amount,
                bar_value: tuning.bar_value,
                pickup_radius: tuning.pickup_radius,
                visible: true,
            },
        );
        e
    }

    pub fn despawn(&mut self, orb: Entity) -> bool {
        self.world.despawn(orb)
    }

    /// Day shows every orb again (collected ones included); night hides them.
    pub fn set_visible_all(&mut self, visible: bool) {
        if let Some(orbs) = self.world.query_mut::<COrb>() {
            for (_, orb) in orbs.iter_mut() {
                orb.visible = visible;
            }
        }
    }

    pub fn is_visible(&self, orb: Entity) -> bool {
        self.world.get_component::<COrb>(orb).is_some_and(|o| o.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.world
            .query::<COrb>()
            .map_or(0, |orbs| orbs.iter().filter(|(_, o)| o.visible).count())
    }

    /// Hides and returns every visible orb within pickup range of `position`.
    pub fn collect_near(&mut self, position: Vec3) -> Vec<Pickup> {
        let mut picked = Vec::new();

        // 1. Find candidates
        if let Some(orbs) = self.world.query::<COrb>() {
            for (e, orb) in orbs.iter() {
                if !orb.visible {
                    continue;
                }
                let Some(t) = self.world.get_component::<CTransform>(e) else {
                    continue;
                };
                if t.pos.distance(position) <= orb.pickup_radius {
                    picked.push(Pickup {
                        orb: e,
                        position: t.pos,
                        luminescence: orb.luminescence,
                        bar_value: orb.bar_value,
                    });
                }
            }
        }

        // 2. Hide them until the next day
        for p in &picked {
            if let Some(orb) = self.world.get_component_mut::<COrb>(p.orb) {
                orb.visible = false;
            }
            trace!(orb = p.orb.to_bits(), "orb collected");
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> (OrbField, Entity, Entity) {
        let mut f = OrbField::new();
        let t = OrbTuning::default();
        let a = f.spawn(Vec3::new(2.0, 1.0, 0.0), &t);
        let b = f.spawn(Vec3::new(10.0, 1.0, 0.0), &t);
        (f, a, b)
    }

    #[test]
    fn nearby_orb_is_collected_once() {
        let (mut f, a, b) = field();
        let picked = f.collect_near(Vec3::new(2.5, 1.0, 0.0));
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].orb, a);
        assert_eq!(picked[0].luminescence, 10.0);
        assert!(!f.is_visible(a));
        assert!(f.is_visible(b));

        assert!(f.collect_near(Vec3::new(2.5, 1.0, 0.0)).is_empty());
    }

    #[test]
    fn night_hides_and_day_restores_everything() {
        let (mut f, a, _) = field();
        f.collect_near(Vec3::new(2.0, 1.0, 0.0));
        f.set_visible_all(false);
        assert_eq!(f.visible_count(), 0);
        assert!(f.collect_near(Vec3::new(10.0, 1.0, 0.0)).is_empty());

        f.set_visible_all(true);
        assert_eq!(f.visible_count(), 2);
        assert!(f.is_visible(a));
    }
}
