// crates/lumen_game/src/events.rs
//! Fire-and-forget gameplay notifications.
//!
//! Producers hold an [`EventSink`] and never learn whether anyone listened.
//! The owner of the [`EventBus`] drains it once per frame.

use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec3;
use lumen_shared::PlayerId;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jumped { player: PlayerId },
    SlideStarted { player: PlayerId },
    SlideEnded { player: PlayerId },
    VaultStarted { player: PlayerId },
    VaultEnded { player: PlayerId },
    HardLanding { player: PlayerId, position: Vec3 },
    StunApplied { player: PlayerId, duration: f32 },
    StunEnded { player: PlayerId },
    ScoreAwarded { player: PlayerId, points: u32, total: u32 },
    SlopeBarrierRaised { player: PlayerId },
    LightToggled { player: PlayerId, on: bool },
    DayStarted,
    NightStarted,
    OrbCollected { player: PlayerId, position: Vec3, amount: f32 },
    BarFilled,
}

#[derive(Clone)]
pub struct EventSink {
    tx: Sender<GameEvent>,
}

impl EventSink {
    /// A sink whose events go nowhere.
    pub fn detached() -> Self {
        let (tx, _) = unbounded();
        Self { tx }
    }

    pub fn emit(&self, event: GameEvent) {
        // Nobody listening is fine.
        let _ = self.tx.send(event);
    }
}

pub struct EventBus {
    tx: Sender<GameEvent>,
    rx: Receiver<GameEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sink(&self) -> EventSink {
        EventSink { tx: self.tx.clone() }
    }

    pub fn drain(&self) -> Vec<GameEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_emission_order() {
        let bus = EventBus::new();
        let sink = bus.sink();
        sink.emit(GameEvent::DayStarted);
        sink.clone().emit(GameEvent::BarFilled);
        assert_eq!(bus.drain(), vec![GameEvent::DayStarted, GameEvent::BarFilled]);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn detached_sink_swallows_events() {
        EventSink::detached().emit(GameEvent::NightStarted);
    }
}
