// crates/lumen_game/src/systems/light.rs
//! The player's light: a night-time glow that burns luminescence, and a
//! day-time interference pulse aimed at the other player.

use glam::Vec3;
use lumen_shared::{ColliderOwner, LayerMask, PhysicsQuery, PlayerId};
use tracing::debug;

use crate::config::LightTuning;
use crate::systems::stats::PlayerStats;

/// Piecewise-linear curve, clamped at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityCurve {
    keys: Vec<[f32; 2]>,
}

impl IntensityCurve {
    /// `keys` must be non-empty and sorted by x.
    pub fn new(keys: Vec<[f32; 2]>) -> Self {
        Self { keys }
    }

    pub fn evaluate(&self, x: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return x;
        };
        if x <= first[0] {
            return first[1];
        }
        for w in self.keys.windows(2) {
            let ([x0, y0], [x1, y1]) = (w[0], w[1]);
            if x <= x1 {
                let span = x1 - x0;
                if span <= f32::EPSILON {
                    return y1;
                }
                return y0 + (y1 - y0) * (x - x0) / span;
            }
        }
        self.keys.last().map_or(x, |k| k[1])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightTick {
    /// An opponent was in range; the interference system should take over.
    pub interference_requested: bool,
    /// The glow was switched this tick (`Some(true)` on, `Some(false)` off).
    pub toggled: Option<bool>,
}

pub struct PlayerLight {
    tuning: LightTuning,
    curve: IntensityCurve,
    active: bool,
    intensity: f32,
    cooldown_timer: f32,
}

impl PlayerLight {
    pub fn new(tuning: LightTuning) -> Self {
        let curve = IntensityCurve::new(tuning.intensity_curve.clone());
        Self {
            tuning,
            curve,
            active: false,
            intensity: 0.0,
            cooldown_timer: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_timer
    }

    /// Returns true if the light was on.
    pub fn force_off(&mut self) -> bool {
        let was = self.active;
        self.active = false;
        self.intensity = 0.0;
        was
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        owner: PlayerId,
        toggle_pressed: bool,
        is_day: bool,
        stats: &mut PlayerStats,
        query: &dyn PhysicsQuery,
        position: Vec3,
        dt: f32,
    ) -> LightTick {
        let mut out = LightTick::default();
        self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);

        // 1. Toggle
        if toggle_pressed {
            if is_day {
                if self.cooldown_timer <= 0.0 && self.opponent_in_range(owner, query, position) {
                    self.cooldown_timer = self.tuning.stun_cooldown;
                    out.interference_requested = true;
                    debug!(player = %owner, "interference pulse");
                }
            } else if !self.active {
                if stats.luminescence() > 0.0 {
                    self.active = true;
                    out.toggled = Some(true);
                }
            } else {
                self.force_off();
                out.toggled = Some(false);
            }
        }

        // 2. Burn
        if self.active {
            stats.drain_luminescence(self.tuning.drain_rate * dt);
            self.intensity = self.curve.evaluate(stats.fraction()) * self.tuning.max_glow_intensity;
            if stats.luminescence() <= 0.0 {
                self.force_off();
                out.toggled = Some(false);
            }
        }

        out
    }

    fn opponent_in_range(&self, owner: PlayerId, query: &dyn PhysicsQuery, position: Vec3) -> bool {
        query
            .overlap_sphere(position, self.tuning.stun_range, LayerMask::PLAYER)
            .into_iter()
            .any(|hit| matches!(hit, ColliderOwner::Player(p) if p != owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsTuning;
    use crate::test_support::FakeWorld;

    const DT: f32 = 0.1;

    fn light() -> PlayerLight {
        PlayerLight::new(LightTuning::default())
    }

    fn stats_with(amount: f32) -> PlayerStats {
        let mut s = PlayerStats::new(StatsTuning::default());
        s.add_luminescence(amount);
        s
    }

    fn near_opponent() -> FakeWorld {
        FakeWorld {
            nearby: vec![ColliderOwner::Player(PlayerId::ONE), ColliderOwner::Player(PlayerId::TWO)],
            ..Default::default()
        }
    }

    #[test]
    fn curve_interpolates_and_clamps() {
        let c = IntensityCurve::new(vec![[0.0, 0.2], [0.5, 1.0], [1.0, 1.0]]);
        assert_eq!(c.evaluate(-1.0), 0.2);
        assert!((c.evaluate(0.25) - 0.6).abs() < 1e-6);
        assert_eq!(c.evaluate(0.75), 1.0);
        assert_eq!(c.evaluate(3.0), 1.0);
    }

    #[test]
    fn day_press_requests_interference_and_starts_cooldown() {
        let mut l = light();
        let mut stats = stats_with(0.0);
        let world = near_opponent();

        let out = l.tick(PlayerId::ONE, true, true, &mut stats, &world, Vec3::ZERO, DT);
        assert!(out.interference_requested);
        assert_eq!(l.cooldown_remaining(), 5.0);

        let again = l.tick(PlayerId::ONE, true, true, &mut stats, &world, Vec3::ZERO, DT);
        assert!(!again.interference_requested);
    }

    #[test]
    fn day_press_with_nobody_around_costs_no_cooldown() {
        let mut l = light();
        let mut stats = stats_with(0.0);
        let world = FakeWorld {
            nearby: vec![ColliderOwner::Player(PlayerId::ONE), ColliderOwner::Static],
            ..Default::default()
        };
        let out = l.tick(PlayerId::ONE, true, true, &mut stats, &world, Vec3::ZERO, DT);
        assert!(!out.interference_requested);
        assert_eq!(l.cooldown_remaining(), 0.0);
    }

    #[test]
    fn night_toggle_needs_luminescence() {
        let mut l = light();
        let mut dark = stats_with(0.0);
        let world = FakeWorld::default();
        let out = l.tick(PlayerId::ONE, true, false, &mut dark, &world, Vec3::ZERO, DT);
        assert_eq!(out.toggled, None);
        assert!(!l.is_active());

        let mut lit = stats_with(50.0);
        let out = l.tick(PlayerId::ONE, true, false, &mut lit, &world, Vec3::ZERO, DT);
        assert_eq!(out.toggled, Some(true));
        assert!((lit.luminescence() - 49.5).abs() < 1e-4);
        assert!((l.intensity() - 0.99).abs() < 1e-4);

        let out = l.tick(PlayerId::ONE, true, false, &mut lit, &world, Vec3::ZERO, DT);
        assert_eq!(out.toggled, Some(false));
        assert_eq!(l.intensity(), 0.0);
    }

    #[test]
    fn light_goes_out_when_drained() {
        let mut l = light();
        let mut stats = stats_with(0.3);
        let world = FakeWorld::default();
        l.tick(PlayerId::ONE, true, false, &mut stats, &world, Vec3::ZERO, DT);
        assert!(!l.is_active());
        assert_eq!(stats.luminescence(), 0.0);
    }
}
