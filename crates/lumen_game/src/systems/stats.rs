// crates/lumen_game/src/systems/stats.rs

use crate::config::StatsTuning;
use crate::systems::parkour::ParkourAction;

/// Luminescence pool and parkour score of one player.
#[derive(Debug, Clone)]
pub struct PlayerStats {
    tuning: StatsTuning,
    luminescence: f32,
    score: u32,
}

impl PlayerStats {
    /// Players start dark.
    pub fn new(tuning: StatsTuning) -> Self {
        Self {
            tuning,
            luminescence: 0.0,
            score: 0,
        }
    }

    pub fn luminescence(&self) -> f32 {
        self.luminescence
    }

    pub fn max_luminescence(&self) -> f32 {
        self.tuning.max_luminescence
    }

    /// Fill in [0, 1].
    pub fn fraction(&self) -> f32 {
        self.luminescence / self.tuning.max_luminescence
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_luminescence(&mut self, amount: f32) {
        self.luminescence = (self.luminescence + amount).min(self.tuning.max_luminescence);
    }

    /// All or nothing: fails without touching the pool when short.
    pub fn use_luminescence(&mut self, amount: f32) -> bool {
        if self.luminescence < amount {
            return false;
        }
        self.luminescence -= amount;
        true
    }

    pub fn drain_luminescence(&mut self, amount: f32) {
        self.luminescence = (self.luminescence - amount).max(0.0);
    }

    /// Adds the score for `action` and returns the points granted.
    pub fn award(&mut self, action: ParkourAction) -> u32 {
        let points = match action {
            ParkourAction::Vault => self.tuning.vault_score,
            ParkourAction::Slide => self.tuning.slide_score,
        };
        self.score = self.score.saturating_add(points);
        points
    }
}
