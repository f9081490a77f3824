// crates/lumen_game/src/systems/collection_bar.rs

use crate::config::OrbTuning;

/// Shared orb counter with an eased display value.
#[derive(Debug, Clone)]
pub struct OrbCollectionBar {
    max_orbs: u32,
    fill_speed: f32,
    count: u32,
    displayed: f32,
}

impl OrbCollectionBar {
    pub fn new(tuning: &OrbTuning) -> Self {
        Self {
            max_orbs: tuning.max_orbs.max(1),
            fill_speed: tuning.fill_speed,
            count: 0,
            displayed: 0.0,
        }
    }

    /// Returns true when the bar is full after the add.
    pub fn add_orbs(&mut self, amount: u32) -> bool {
        self.count = self.count.saturating_add(amount).min(self.max_orbs);
        self.is_full()
    }

    pub fn set_orbs(&mut self, amount: u32) {
        self.count = amount.min(self.max_orbs);
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.displayed = 0.0;
    }

    /// Eases the displayed fill toward the target.
    pub fn tick(&mut self, dt: f32) {
        let target = self.fill_percentage();
        let t = (self.fill_speed * dt).clamp(0.0, 1.0);
        self.displayed += (target - self.displayed) * t;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.max_orbs
    }

    pub fn fill_percentage(&self) -> f32 {
        self.count as f32 / self.max_orbs as f32
    }

    pub fn displayed_fill(&self) -> f32 {
        self.displayed
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.count, self.max_orbs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> OrbCollectionBar {
        OrbCollectionBar::new(&OrbTuning::default())
    }

    #[test]
    fn count_is_clamped_and_reports_full() {
        let mut b = bar();
        assert!(!b.add_orbs(9));
        assert!(b.add_orbs(5));
        assert_eq!(b.count(), 10);
        assert_eq!(b.label(), "10/10");

        b.set_orbs(3);
        assert!((b.fill_percentage() - 0.3).abs() < 1e-6);
        b.reset();
        assert_eq!(b.count(), 0);
    }

    #[test]
    fn display_eases_toward_target() {
        let mut b = bar();
        b.add_orbs(5);
        b.tick(0.1);
        assert!((b.displayed_fill() - 0.25).abs() < 1e-6);
        for _ in 0..100 {
            b.tick(0.1);
        }
        assert!((b.displayed_fill() - 0.5).abs() < 1e-3);
    }
}
