// crates/lumen_game/src/systems/day_cycle.rs

use tracing::info;

use crate::config::DayCycleTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

/// Alternating day/night phases of fixed length. Owned by the game and
/// handed to whoever needs it; there is no global instance.
#[derive(Debug, Clone)]
pub struct DayCycle {
    phase_duration: f32,
    phase: DayPhase,
    timer: f32,
    started: bool,
}

impl DayCycle {
    pub fn new(tuning: &DayCycleTuning) -> Self {
        Self {
            phase_duration: tuning.phase_duration,
            phase: DayPhase::Day,
            timer: tuning.phase_duration,
            started: false,
        }
    }

    /// Enters the first Day. Returns the phase to broadcast.
    pub fn start(&mut self) -> DayPhase {
        self.started = true;
        self.enter(DayPhase::Day)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Returns the new phase when one begins this tick.
    pub fn tick(&mut self, dt: f32) -> Option<DayPhase> {
        if !self.started {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        let next = match self.phase {
            DayPhase::Day => DayPhase::Night,
            DayPhase::Night => DayPhase::Day,
        };
        Some(self.enter(next))
    }

    pub fn phase(&self) -> DayPhase {
        self.phase
    }

    pub fn is_day(&self) -> bool {
        self.phase == DayPhase::Day
    }

    pub fn remaining(&self) -> f32 {
        self.timer.max(0.0)
    }

    fn enter(&mut self, phase: DayPhase) -> DayPhase {
        self.phase = phase;
        self.timer = self.phase_duration;
        info!(?phase, "phase started");
        phase
    }
}
