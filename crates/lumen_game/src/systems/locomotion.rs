// crates/lumen_game/src/systems/locomotion.rs
//! Grounding, jump, hard landings, slope zones and stun for one player.
//!
//! Two entry points run at different rates:
//! - [`LocomotionController::tick`] once per frame (probes, timers, jump),
//! - [`LocomotionController::fixed_step`] once per physics step (velocity and forces).

use glam::Vec3;
use lumen_shared::{LayerMask, PhysicsQuery, RigidBody, TriggerKind, TriggerPhase};
use tracing::{debug, trace};

use crate::config::LocomotionTuning;
use crate::error::StunRejected;
use crate::systems::input_sampler::InputSampler;
use crate::systems::scanner::ScanResult;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionState {
    /// Physical contact or inside the post-leave grace window.
    pub grounded_buffered: bool,
    pub grounded_physical: bool,
    /// Forced true during a manual slide.
    pub grounded_for_animation: bool,
    pub in_slope_zone: bool,
    /// Seconds spent falling since the last ground contact.
    pub air_time: f32,
    pub is_landing_hard: bool,
    pub hard_land_timer: f32,
    pub is_stunned: bool,
    pub stun_timer: f32,
    pub velocity: Vec3,
}

/// What one tick decided, for the slot to wire onward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocomotionTick {
    /// Stunned this tick; nothing downstream may start an action.
    pub suppressed: bool,
    pub jumped: bool,
    /// A hard landing was armed this tick; the slide lockout should follow.
    pub hard_landed: bool,
    pub stun_ended: bool,
}

pub struct LocomotionController {
    tuning: LocomotionTuning,
    state: LocomotionState,
    grounded_buffer_timer: f32,
    barrier_raised: bool,
    /// The stun ran out this frame; fixed steps stay damped until the next tick.
    stun_releasing: bool,
}

impl LocomotionController {
    pub fn new(tuning: LocomotionTuning) -> Self {
        Self {
            tuning,
            state: LocomotionState::default(),
            grounded_buffer_timer: 0.0,
            barrier_raised: false,
            stun_releasing: false,
        }
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn is_stunned(&self) -> bool {
        self.state.is_stunned
    }

    pub fn in_slope_zone(&self) -> bool {
        self.state.in_slope_zone
    }

    pub fn tick(
        &mut self,
        input: &mut InputSampler,
        scan: &ScanResult,
        manual_slide: bool,
        query: &dyn PhysicsQuery,
        body: &mut dyn RigidBody,
        dt: f32,
    ) -> LocomotionTick {
        let mut out = LocomotionTick::default();
        let t = &self.tuning;
        let s = &mut self.state;
        s.velocity = body.velocity();
        self.stun_releasing = false;

        // 1. Stun short-circuits everything, including the frame it expires on
        if s.is_stunned {
            out.stun_ended = advance_stun(s, dt);
            out.suppressed = true;
            self.stun_releasing = out.stun_ended;
            return out;
        }

        // 2. Hard-land recovery
        s.hard_land_timer = (s.hard_land_timer - dt).max(0.0);
        s.is_landing_hard = s.hard_land_timer > 0.0;

        // 3. Physical probe
        let was_grounded = s.grounded_physical;
        let grounded = query
            .raycast(body.position(), Vec3::NEG_Y, t.ground_check_distance, LayerMask::GROUND)
            .is_some();
        s.grounded_physical = grounded;
        s.grounded_for_animation = manual_slide || grounded;

        // 4. Landing and air time
        if grounded {
            if !was_grounded && s.air_time > t.hard_land_threshold {
                s.hard_land_timer = t.hard_land_duration;
                s.is_landing_hard = true;
                out.hard_landed = true;
                debug!(air_time = s.air_time, "hard landing");
            }
            s.air_time = 0.0;
            self.grounded_buffer_timer = t.grounded_buffer_duration;
        } else {
            self.grounded_buffer_timer = (self.grounded_buffer_timer - dt).max(0.0);
            // A slide owns the posture until it is restored on the ground.
            if !manual_slide && s.velocity.y < 0.0 {
                s.air_time += dt;
            } else {
                s.air_time = 0.0;
            }
        }
        s.grounded_buffered = grounded || self.grounded_buffer_timer > 0.0;

        // 5. Jump; vault has priority for the same press
        if input.jump_buffer_active() && s.grounded_buffered && !scan.can_vault && !manual_slide {
            body.add_impulse(Vec3::Y * t.jump_force);
            input.consume_jump_buffer();
            self.grounded_buffer_timer = 0.0;
            out.jumped = true;
            trace!(force = t.jump_force, "jump");
        }

        out
    }

    /// Frame tick while the vault owns the body: only timers advance.
    pub fn tick_suspended(&mut self, dt: f32) -> LocomotionTick {
        let s = &mut self.state;
        s.hard_land_timer = (s.hard_land_timer - dt).max(0.0);
        s.is_landing_hard = s.hard_land_timer > 0.0;

        let mut out = LocomotionTick::default();
        self.stun_releasing = false;
        if s.is_stunned {
            out.stun_ended = advance_stun(s, dt);
            out.suppressed = true;
            self.stun_releasing = out.stun_ended;
        }
        out
    }

    pub fn fixed_step(&mut self, horizontal: f32, body: &mut dyn RigidBody, fixed_dt: f32) {
        let t = &self.tuning;
        let mut v = body.velocity();

        if self.state.is_stunned || self.stun_releasing {
            v.x = damp(v.x, fixed_dt * t.idle_damping);
            body.set_velocity(v);
            return;
        }

        // Slope forces own horizontal motion; input is ignored.
        if self.state.in_slope_zone && self.state.grounded_buffered {
            body.add_force(Vec3::X * t.slope_slide_force);
            body.add_force(Vec3::NEG_Y * t.slope_stick_force);
            return;
        }

        v.x = if horizontal.abs() > t.input_dead_zone {
            horizontal * t.move_speed
        } else {
            damp(v.x, fixed_dt * t.idle_damping)
        };
        body.set_velocity(v);
    }

    pub fn apply_stun(&mut self, duration: f32, manual_slide: bool) -> Result<(), StunRejected> {
        if self.state.is_stunned {
            return Err(StunRejected::AlreadyStunned);
        }
        if manual_slide {
            return Err(StunRejected::Sliding);
        }

        let s = &mut self.state;
        s.is_stunned = true;
        s.stun_timer = duration.max(0.0);
        s.is_landing_hard = false;
        s.hard_land_timer = 0.0;
        Ok(())
    }

    /// Called when a vault takes the body; the arc never counts as falling.
    pub fn on_vault_started(&mut self) {
        self.state.air_time = 0.0;
        self.grounded_buffer_timer = 0.0;
    }

    /// Returns true the first time a slope exit is crossed.
    pub fn on_trigger(&mut self, kind: TriggerKind, phase: TriggerPhase) -> bool {
        match (kind, phase) {
            (TriggerKind::SlopeZone, TriggerPhase::Enter) => {
                self.state.in_slope_zone = true;
                false
            }
            (TriggerKind::SlopeZone, TriggerPhase::Exit) => {
                self.state.in_slope_zone = false;
                false
            }
            (TriggerKind::SlopeExit, TriggerPhase::Enter) if !self.barrier_raised => {
                self.barrier_raised = true;
                true
            }
            (TriggerKind::SlopeExit, _) => false,
        }
    }
}

/// Returns true on the tick the stun runs out.
fn advance_stun(s: &mut LocomotionState, dt: f32) -> bool {
    s.is_landing_hard = false;
    s.hard_land_timer = 0.0;
    s.stun_timer = (s.stun_timer - dt).max(0.0);
    if s.stun_timer > 0.0 {
        return false;
    }
    s.is_stunned = false;
    true
}

fn damp(x: f32, t: f32) -> f32 {
    x + (0.0 - x) * t.clamp(0.0, 1.0)
}
