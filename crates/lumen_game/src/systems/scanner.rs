// crates/lumen_game/src/systems/scanner.rs
//! Ray probes that gate parkour: slide clearance, overhead, vault.

use glam::Vec3;
use lumen_shared::{LayerMask, PhysicsQuery};

use crate::config::ScannerTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanResult {
    pub can_slide: bool,
    pub obstacle_above: bool,
    pub can_vault: bool,
    /// Always `Vec3::X` or `Vec3::NEG_X`.
    pub facing: Vec3,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self {
            can_slide: false,
            obstacle_above: false,
            can_vault: false,
            facing: Vec3::X,
        }
    }
}

pub struct EnvironmentScanner {
    tuning: ScannerTuning,
    result: ScanResult,
}

impl EnvironmentScanner {
    pub fn new(tuning: ScannerTuning) -> Self {
        Self {
            tuning,
            result: ScanResult::default(),
        }
    }

    /// Updates facing from `horizontal` (held inside the dead-zone), then
    /// re-runs every probe from `position`.
    pub fn scan(&mut self, query: &dyn PhysicsQuery, position: Vec3, horizontal: f32) -> ScanResult {
        let facing = if horizontal > self.tuning.facing_threshold {
            Vec3::X
        } else if horizontal < -self.tuning.facing_threshold {
            Vec3::NEG_X
        } else {
            self.result.facing
        };

        self.result = probe(query, &self.tuning, position, facing);
        self.result
    }

    pub fn result(&self) -> &ScanResult {
        &self.result
    }

    pub fn facing(&self) -> Vec3 {
        self.result.facing
    }
}

/// Stateless part of the scan: geometry and facing in, affordances out.
pub fn probe(query: &dyn PhysicsQuery, t: &ScannerTuning, position: Vec3, facing: Vec3) -> ScanResult {
    let mask = LayerMask::OBSTACLE;

    let can_slide = query
        .raycast(position + t.slide_origin, facing, t.slide_check_distance, mask)
        .is_some();

    let obstacle_above = query
        .raycast(position + t.stand_up_origin, Vec3::Y, t.stand_up_check_distance, mask)
        .is_some();

    // Too-close obstacles are a bump, not a vault.
    let low_valid = query
        .raycast(position + t.vault_low_origin, facing, t.vault_check_distance, mask)
        .is_some_and(|hit| hit.distance > t.min_vault_distance);
    let high_clear = query
        .raycast(position + t.vault_high_origin, facing, t.vault_check_distance, mask)
        .is_none();

    ScanResult {
        can_slide,
        obstacle_above,
        can_vault: low_valid && high_clear,
        facing,
    }
}
