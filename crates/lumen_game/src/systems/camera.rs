// crates/lumen_game/src/systems/camera.rs

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::CameraTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakePreset {
    Light,
    Medium,
    Strong,
}

impl ShakePreset {
    /// `(duration, intensity)`
    pub fn params(self) -> (f32, f32) {
        match self {
            ShakePreset::Light => (0.15, 0.1),
            ShakePreset::Medium => (0.25, 0.25),
            ShakePreset::Strong => (0.4, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shake {
    duration: f32,
    intensity: f32,
    elapsed: f32,
}

/// Per-player follow camera with screen shake.
pub struct CameraRig {
    offset: Vec3,
    smoothing: bool,
    smooth_speed: f32,
    multiplier: f32,
    position: Vec3,
    shake: Option<Shake>,
    shake_offset: Vec3,
    rng: ChaCha8Rng,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning, seed: u64, target: Vec3) -> Self {
        Self {
            offset: tuning.offset,
            smoothing: tuning.smoothing,
            smooth_speed: tuning.smooth_speed,
            multiplier: tuning.shake_multiplier,
            position: target + tuning.offset,
            shake: None,
            shake_offset: Vec3::ZERO,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Follow position with shake applied.
    pub fn view_position(&self) -> Vec3 {
        self.position + self.shake_offset
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn update(&mut self, target: Vec3, dt: f32) {
        // 1. Follow
        let desired = target + self.offset;
        if self.smoothing {
            let decay = (-self.smooth_speed * dt).exp();
            let t = 1.0 - decay;
            self.position = self.position.lerp(desired, t);
        } else {
            self.position = desired;
        }

        // 2. Shake
        let Some(shake) = self.shake.as_mut() else {
            return;
        };
        let x = self.rng.gen_range(-1.0..=1.0) * shake.intensity;
        let y = self.rng.gen_range(-1.0..=1.0) * shake.intensity;
        self.shake_offset = Vec3::new(x, y, 0.0);

        shake.elapsed += dt;
        let done = (shake.elapsed / shake.duration).min(1.0);
        shake.intensity += (0.0 - shake.intensity) * done;

        if shake.elapsed >= shake.duration {
            self.shake = None;
            self.shake_offset = Vec3::ZERO;
        }
    }

    /// Replaces any running shake.
    pub fn shake(&mut self, duration: f32, intensity: f32) {
        if duration <= 0.0 {
            return;
        }
        self.shake = Some(Shake {
            duration,
            intensity: intensity * self.multiplier,
            elapsed: 0.0,
        });
    }

    pub fn shake_preset(&mut self, preset: ShakePreset) {
        let (duration, intensity) = preset.params();
        self.shake(duration, intensity);
    }
}
