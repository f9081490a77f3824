// crates/lumen_game/src/systems/animation.rs
//! Read-only projection of a slot's state onto animator parameters.

use crate::systems::input_sampler::SampledInput;
use crate::systems::locomotion::{LocomotionState, LocomotionTick};
use crate::systems::parkour::{ParkourAction, ParkourTick};
use crate::systems::scanner::ScanResult;

/// Parameter names the animator controller is authored against.
pub mod params {
    pub const MOVE_SPEED: &str = "moveSpeed";
    pub const FACING: &str = "facing";
    pub const GROUNDED: &str = "isGrounded";
    pub const SLOPE_SLIDING: &str = "isSliding";
    pub const LANDING_HARD: &str = "isLandingHard";
    pub const JUMP: &str = "doJump";
    pub const MANUAL_SLIDE: &str = "doManualSlide";
    pub const VAULT: &str = "doVault";
}

/// Animation parameter sink. Implemented outside the core.
pub trait Animator {
    fn set_float(&mut self, name: &'static str, value: f32);
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_trigger(&mut self, name: &'static str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationFrame {
    pub move_speed: f32,
    /// +1 facing right, -1 facing left.
    pub facing: f32,
    pub grounded: bool,
    pub slope_sliding: bool,
    pub landing_hard: bool,
    pub jump: bool,
    pub manual_slide: bool,
    pub vault: bool,
}

pub struct AnimationBridge;

impl AnimationBridge {
    pub fn project(
        input: &SampledInput,
        scan: &ScanResult,
        loco: &LocomotionState,
        loco_tick: &LocomotionTick,
        parkour_tick: &ParkourTick,
    ) -> AnimationFrame {
        AnimationFrame {
            move_speed: input.horizontal.abs(),
            facing: scan.facing.x.signum(),
            grounded: loco.grounded_for_animation,
            slope_sliding: loco.in_slope_zone,
            landing_hard: loco.is_landing_hard,
            jump: loco_tick.jumped,
            manual_slide: parkour_tick.started == Some(ParkourAction::Slide),
            vault: parkour_tick.started == Some(ParkourAction::Vault),
        }
    }

    pub fn apply(frame: &AnimationFrame, animator: &mut dyn Animator) {
        animator.set_float(params::MOVE_SPEED, frame.move_speed);
        animator.set_float(params::FACING, frame.facing);
        animator.set_bool(params::GROUNDED, frame.grounded);
        animator.set_bool(params::SLOPE_SLIDING, frame.slope_sliding);
        animator.set_bool(params::LANDING_HARD, frame.landing_hard);

        // Triggers are edges; only fire on the tick they happened.
        if frame.jump {
            animator.set_trigger(params::JUMP);
        }
        if frame.manual_slide {
            animator.set_trigger(params::MANUAL_SLIDE);
        }
        if frame.vault {
            animator.set_trigger(params::VAULT);
        }
    }
}

/// Animator that only records parameters; handy for headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingAnimator {
    pub floats: Vec<(&'static str, f32)>,
    pub bools: Vec<(&'static str, bool)>,
    pub triggers: Vec<&'static str>,
}

impl RecordingAnimator {
    pub fn last_bool(&self, name: &str) -> Option<bool> {
        self.bools.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn last_float(&self, name: &str) -> Option<f32> {
        self.floats.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl Animator for RecordingAnimator {
    fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.push((name, value));
    }

    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.push((name, value));
    }

    fn set_trigger(&mut self, name: &'static str) {
        self.triggers.push(name);
    }
}
