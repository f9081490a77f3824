// crates/lumen_game/src/config.rs
//! Gameplay tunables. Every field has a default, so a JSON file only needs
//! the values it overrides.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tunables from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tunables: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tunable `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub input: InputTuning,
    pub scanner: ScannerTuning,
    pub locomotion: LocomotionTuning,
    pub parkour: ParkourTuning,
    pub stats: StatsTuning,
    pub light: LightTuning,
    pub interference: InterferenceTuning,
    pub day_cycle: DayCycleTuning,
    pub orbs: OrbTuning,
    pub camera: CameraTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTuning {
    pub jump_buffer_duration: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self { jump_buffer_duration: 0.2 }
    }
}

/// Probe origins are offsets from the body position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerTuning {
    pub facing_threshold: f32,
    pub slide_origin: Vec3,
    pub slide_check_distance: f32,
    pub stand_up_origin: Vec3,
    pub stand_up_check_distance: f32,
    pub vault_low_origin: Vec3,
    pub vault_high_origin: Vec3,
    pub vault_check_distance: f32,
    pub min_vault_distance: f32,
}

impl Default for ScannerTuning {
    fn default() -> Self {
        Self {
            facing_threshold: 0.1,
            slide_origin: Vec3::new(0.0, -0.5, 0.0),
            slide_check_distance: 0.8,
            stand_up_origin: Vec3::ZERO,
            stand_up_check_distance: 1.1,
            vault_low_origin: Vec3::new(0.0, -0.5, 0.0),
            vault_high_origin: Vec3::new(0.0, 0.8, 0.0),
            vault_check_distance: 3.0,
            min_vault_distance: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    pub move_speed: f32,
    pub input_dead_zone: f32,
    pub idle_damping: f32,
    pub jump_force: f32,
    pub ground_check_distance: f32,
    pub hard_land_threshold: f32,
    pub hard_land_duration: f32,
    pub grounded_buffer_duration: f32,
    pub slope_slide_force: f32,
    pub slope_stick_force: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            input_dead_zone: 0.1,
            idle_damping: 10.0,
            jump_force: 7.0,
            ground_check_distance: 1.1,
            hard_land_threshold: 0.8,
            hard_land_duration: 0.5,
            grounded_buffer_duration: 0.1,
            slope_slide_force: 15.0,
            slope_stick_force: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkourTuning {
    pub slide_height: f32,
    pub slide_center_y: f32,
    pub slide_duration: f32,
    pub slide_lockout_duration: f32,
    pub vault_speed: f32,
    pub vault_duration: f32,
    pub vault_hop_speed: f32,
}

impl Default for ParkourTuning {
    fn default() -> Self {
        Self {
            slide_height: 1.0,
            slide_center_y: -0.5,
            slide_duration: 1.5,
            slide_lockout_duration: 1.0,
            vault_speed: 3.0,
            vault_duration: 1.17,
            vault_hop_speed: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsTuning {
    pub max_luminescence: f32,
    pub vault_score: u32,
    pub slide_score: u32,
}

impl Default for StatsTuning {
    fn default() -> Self {
        Self {
            max_luminescence: 100.0,
            vault_score: 100,
            slide_score: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightTuning {
    pub max_glow_intensity: f32,
    pub drain_rate: f32,
    pub stun_range: f32,
    pub stun_cooldown: f32,
    /// `[fill, multiplier]` keys, sorted by fill.
    pub intensity_curve: Vec<[f32; 2]>,
}

impl Default for LightTuning {
    fn default() -> Self {
        Self {
            max_glow_intensity: 2.0,
            drain_rate: 5.0,
            stun_range: 3.0,
            stun_cooldown: 5.0,
            intensity_curve: vec![[0.0, 0.0], [1.0, 1.0]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterferenceTuning {
    pub stun_duration: f32,
}

impl Default for InterferenceTuning {
    fn default() -> Self {
        Self { stun_duration: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayCycleTuning {
    pub phase_duration: f32,
}

impl Default for DayCycleTuning {
    fn default() -> Self {
        Self { phase_duration: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTuning {
    pub luminescence_amount: f32,
    pub bar_value: u32,
    pub pickup_radius: f32,
    pub max_orbs: u32,
    pub fill_speed: f32,
}

impl Default for OrbTuning {
    fn default() -> Self {
        Self {
            luminescence_amount: 10.0,
            bar_value: 1,
            pickup_radius: 1.0,
            max_orbs: 10,
            fill_speed: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub offset: Vec3,
    pub smoothing: bool,
    pub smooth_speed: f32,
    pub shake_multiplier: f32,
    pub shake_seed: u64,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 3.0, -10.0),
            smoothing: false,
            smooth_speed: 10.0,
            shake_multiplier: 1.0,
            shake_seed: 0x1u64,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.display(), "loaded tunables");
        Ok(config)
    }

    /// Rejects values the state machines cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Durations and distances that must be strictly positive
        let positive = [
            ("parkour.slide_duration", self.parkour.slide_duration),
            ("parkour.slide_height", self.parkour.slide_height),
            ("parkour.vault_duration", self.parkour.vault_duration),
            ("locomotion.ground_check_distance", self.locomotion.ground_check_distance),
            ("scanner.vault_check_distance", self.scanner.vault_check_distance),
            ("stats.max_luminescence", self.stats.max_luminescence),
            ("day_cycle.phase_duration", self.day_cycle.phase_duration),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be > 0, got {value}")));
            }
        }

        // 2. Everything else only has to be finite and non-negative
        let non_negative = [
            ("input.jump_buffer_duration", self.input.jump_buffer_duration),
            ("scanner.facing_threshold", self.scanner.facing_threshold),
            ("scanner.slide_check_distance", self.scanner.slide_check_distance),
            ("scanner.stand_up_check_distance", self.scanner.stand_up_check_distance),
            ("scanner.min_vault_distance", self.scanner.min_vault_distance),
            ("locomotion.move_speed", self.locomotion.move_speed),
            ("locomotion.input_dead_zone", self.locomotion.input_dead_zone),
            ("locomotion.idle_damping", self.locomotion.idle_damping),
            ("locomotion.jump_force", self.locomotion.jump_force),
            ("locomotion.hard_land_threshold", self.locomotion.hard_land_threshold),
            ("locomotion.hard_land_duration", self.locomotion.hard_land_duration),
            ("locomotion.grounded_buffer_duration", self.locomotion.grounded_buffer_duration),
            ("locomotion.slope_slide_force", self.locomotion.slope_slide_force),
            ("locomotion.slope_stick_force", self.locomotion.slope_stick_force),
            ("parkour.slide_lockout_duration", self.parkour.slide_lockout_duration),
            ("parkour.vault_speed", self.parkour.vault_speed),
            ("parkour.vault_hop_speed", self.parkour.vault_hop_speed),
            ("light.max_glow_intensity", self.light.max_glow_intensity),
            ("light.drain_rate", self.light.drain_rate),
            ("light.stun_range", self.light.stun_range),
            ("light.stun_cooldown", self.light.stun_cooldown),
            ("interference.stun_duration", self.interference.stun_duration),
            ("orbs.luminescence_amount", self.orbs.luminescence_amount),
            ("orbs.pickup_radius", self.orbs.pickup_radius),
            ("orbs.fill_speed", self.orbs.fill_speed),
            ("camera.smooth_speed", self.camera.smooth_speed),
            ("camera.shake_multiplier", self.camera.shake_multiplier),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        // 3. Cross-field constraints
        if self.scanner.min_vault_distance >= self.scanner.vault_check_distance {
            return Err(invalid(
                "scanner.min_vault_distance",
                "must be shorter than scanner.vault_check_distance".to_string(),
            ));
        }
        if self.orbs.max_orbs == 0 {
            return Err(invalid("orbs.max_orbs", "must be at least 1".to_string()));
        }
        if !self.camera.offset.is_finite() {
            return Err(invalid("camera.offset", "must be finite".to_string()));
        }

        let curve = &self.light.intensity_curve;
        if curve.is_empty() {
            return Err(invalid("light.intensity_curve", "needs at least one key".to_string()));
        }
        if curve.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid("light.intensity_curve", "keys must be finite".to_string()));
        }
        if curve.windows(2).any(|w| w[0][0] > w[1][0]) {
            return Err(invalid("light.intensity_curve", "keys must be sorted by fill".to_string()));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "locomotion": { "move_speed": 12.5 } }"#).unwrap();
        assert_eq!(config.locomotion.move_speed, 12.5);
        assert_eq!(config.locomotion.jump_force, 7.0);
        assert_eq!(config.input.jump_buffer_duration, 0.2);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_vault_duration_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "parkour": { "vault_duration": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "parkour.vault_duration", .. }));
    }

    #[test]
    fn unsorted_curve_is_rejected() {
        let mut config = GameConfig::default();
        config.light.intensity_curve = vec![[1.0, 1.0], [0.0, 0.0]];
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
