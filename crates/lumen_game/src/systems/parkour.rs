// crates/lumen_game/src/systems/parkour.rs
//! Timed Slide / Vault actions and the slide lockout.

use glam::Vec3;
use lumen_shared::{CapsuleShape, RigidBody};
use tracing::debug;

use crate::config::ParkourTuning;
use crate::systems::input_sampler::InputSampler;
use crate::systems::locomotion::LocomotionState;
use crate::systems::scanner::ScanResult;

/// Reported state. `SlideLocked` is Idle with the lockout running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkourState {
    Idle,
    Sliding,
    Vaulting,
    SlideLocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkourAction {
    Slide,
    Vault,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Idle,
    /// `remaining` hits zero first; the capsule comes back once grounded.
    Sliding { remaining: f32 },
    /// Direction is fixed at takeoff.
    Vaulting { elapsed: f32, direction: Vec3 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParkourTick {
    pub started: Option<ParkourAction>,
    pub finished: Option<ParkourAction>,
}

pub struct ParkourStateMachine {
    tuning: ParkourTuning,
    action: Action,
    slide_lock_timer: f32,
    /// Set by `lock_slide`; the arming tick does not count down.
    slide_lock_armed: bool,
    standing_capsule: CapsuleShape,
}

impl ParkourStateMachine {
    pub fn new(tuning: ParkourTuning, standing_capsule: CapsuleShape) -> Self {
        Self {
            tuning,
            action: Action::Idle,
            slide_lock_timer: 0.0,
            slide_lock_armed: false,
            standing_capsule,
        }
    }

    /// Collision volume used while sliding.
    pub fn slide_capsule(tuning: &ParkourTuning, standing: CapsuleShape) -> CapsuleShape {
        CapsuleShape {
            height: tuning.slide_height,
            radius: standing.radius,
            center: Vec3::new(0.0, tuning.slide_center_y, 0.0),
        }
    }

    pub fn state(&self) -> ParkourState {
        match self.action {
            Action::Sliding { .. } => ParkourState::Sliding,
            Action::Vaulting { .. } => ParkourState::Vaulting,
            Action::Idle if self.slide_locked() => ParkourState::SlideLocked,
            Action::Idle => ParkourState::Idle,
        }
    }

    pub fn is_vaulting(&self) -> bool {
        matches!(self.action, Action::Vaulting { .. })
    }

    pub fn is_manually_sliding(&self) -> bool {
        matches!(self.action, Action::Sliding { .. })
    }

    pub fn slide_locked(&self) -> bool {
        self.slide_lock_timer > 0.0
    }

    /// Slide ran out in the air and is waiting for ground to stand up.
    pub fn slide_restore_pending(&self) -> bool {
        matches!(self.action, Action::Sliding { remaining } if remaining <= 0.0)
    }

    /// Never shortens a lockout already running.
    pub fn lock_slide(&mut self, duration: f32) {
        self.slide_lock_timer = self.slide_lock_timer.max(duration);
        self.slide_lock_armed = true;
        debug!(duration, "slide locked");
    }

    /// Advances the running action, then evaluates new ones (vault first).
    ///
    /// `suppressed` refuses every new transition; running actions still advance.
    pub fn tick(
        &mut self,
        input: &mut InputSampler,
        scan: &ScanResult,
        loco: &LocomotionState,
        suppressed: bool,
        body: &mut dyn RigidBody,
        dt: f32,
    ) -> ParkourTick {
        let mut out = ParkourTick::default();
        if self.slide_lock_armed {
            self.slide_lock_armed = false;
        } else {
            self.slide_lock_timer = (self.slide_lock_timer - dt).max(0.0);
        }

        // 1. Advance
        out.finished = self.advance(loco.grounded_physical, body, dt);

        if suppressed {
            return out;
        }

        // 2. Vault has priority over slide for the same tick
        if scan.can_vault && input.jump_buffer_active() && !self.is_vaulting() && !self.is_manually_sliding() {
            input.consume_jump_buffer();
            body.set_gravity(false);
            body.set_velocity(Vec3::ZERO);
            body.set_kinematic(true);
            self.action = Action::Vaulting {
                elapsed: 0.0,
                direction: scan.facing,
            };
            out.started = Some(ParkourAction::Vault);
            debug!(facing = ?scan.facing, "vault started");
        } else if input.state().slide_pressed
            && !self.is_manually_sliding()
            && !self.is_vaulting()
            && !loco.in_slope_zone
            && loco.grounded_for_animation
            && !self.slide_locked()
        {
            body.set_capsule(Self::slide_capsule(&self.tuning, self.standing_capsule));
            self.action = Action::Sliding {
                remaining: self.tuning.slide_duration,
            };
            out.started = Some(ParkourAction::Slide);
            debug!("slide started");
        }

        out
    }

    fn advance(&mut self, grounded_physical: bool, body: &mut dyn RigidBody, dt: f32) -> Option<ParkourAction> {
        let t = &self.tuning;
        match &mut self.action {
            Action::Idle => None,
            Action::Vaulting { elapsed, direction } => {
                let hop = if *elapsed < t.vault_duration * 0.5 {
                    t.vault_hop_speed
                } else {
                    -t.vault_hop_speed
                };
                body.translate((*direction * t.vault_speed + Vec3::Y * hop) * dt);
                *elapsed += dt;

                if *elapsed < t.vault_duration {
                    return None;
                }
                body.set_gravity(true);
                body.set_kinematic(false);
                self.action = Action::Idle;
                debug!("vault finished");
                Some(ParkourAction::Vault)
            }
            Action::Sliding { remaining } => {
                *remaining = (*remaining - dt).max(0.0);
                if *remaining > 0.0 {
                    return None;
                }
                // Standing up mid-air with the short capsule would clip.
                if !grounded_physical {
                    return None;
                }
                body.set_capsule(self.standing_capsule);
                self.action = Action::Idle;
                debug!("slide finished");
                Some(ParkourAction::Slide)
            }
        }
    }
}
