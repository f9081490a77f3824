// crates/lumen_game/src/collab.rs
//! Cosmetic collaborators reached through narrow sinks. Any of them may be
//! absent; events meant for a missing sink are dropped.

use glam::Vec3;
use lumen_shared::PlayerId;

use crate::events::GameEvent;
use crate::slot::PlayerSlot;
use crate::systems::animation::Animator;
use crate::systems::camera::ShakePreset;

pub mod sounds {
    pub const COLLECT: &str = "collect";
    pub const LAND: &str = "land";
    pub const STUN: &str = "stun";
}

pub trait AudioSink {
    fn play_at(&mut self, sound: &'static str, position: Vec3);
}

pub trait FloatingTextSink {
    fn spawn_text(&mut self, text: &str, position: Vec3);
}

const TEXT_RISE: Vec3 = Vec3::new(0.0, 0.5, 0.0);

#[derive(Default)]
pub struct Collaborators {
    pub audio: Option<Box<dyn AudioSink>>,
    pub floating_text: Option<Box<dyn FloatingTextSink>>,
    animators: Vec<(PlayerId, Box<dyn Animator>)>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_floating_text(mut self, text: impl FloatingTextSink + 'static) -> Self {
        self.floating_text = Some(Box::new(text));
        self
    }

    /// Replaces the animator already registered for `player`.
    pub fn with_animator(mut self, player: PlayerId, animator: impl Animator + 'static) -> Self {
        self.animators.retain(|(p, _)| *p != player);
        self.animators.push((player, Box::new(animator)));
        self
    }

    pub fn animator_mut(&mut self, player: PlayerId) -> Option<&mut (dyn Animator + 'static)> {
        self.animators
            .iter_mut()
            .find(|(p, _)| *p == player)
            .map(|(_, a)| a.as_mut())
    }

    pub fn dispatch(&mut self, event: &GameEvent, slots: &mut [PlayerSlot]) {
        match *event {
            GameEvent::OrbCollected { position, amount, .. } => {
                for slot in slots.iter_mut() {
                    slot.camera_mut().shake_preset(ShakePreset::Light);
                }
                self.play(sounds::COLLECT, position);
                if let Some(text) = self.floating_text.as_mut() {
                    text.spawn_text(&format!("+{amount}"), position + TEXT_RISE);
                }
            }
            GameEvent::BarFilled => {
                for slot in slots.iter_mut() {
                    slot.camera_mut().shake_preset(ShakePreset::Medium);
                }
            }
            GameEvent::HardLanding { player, position } => {
                self.play(sounds::LAND, position);
                shake(slots, player, ShakePreset::Medium);
            }
            GameEvent::StunApplied { player, .. } => {
                if let Some(position) = slots.iter().find(|s| s.id() == player).map(|s| s.camera().view_position()) {
                    self.play(sounds::STUN, position);
                }
                shake(slots, player, ShakePreset::Strong);
            }
            _ => {}
        }
    }

    fn play(&mut self, sound: &'static str, position: Vec3) {
        if let Some(audio) = self.audio.as_mut() {
            audio.play_at(sound, position);
        }
    }
}

fn shake(slots: &mut [PlayerSlot], player: PlayerId, preset: ShakePreset) {
    if let Some(slot) = slots.iter_mut().find(|s| s.id() == player) {
        slot.camera_mut().shake_preset(preset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::events::EventSink;
    use crate::systems::animation::RecordingAnimator;
    use lumen_physics::{Geometry, SandboxHost};
    use lumen_shared::{CapsuleShape, PlayerBindings};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl AudioSink for Log {
        fn play_at(&mut self, sound: &'static str, _position: Vec3) {
            self.0.borrow_mut().push(format!("sound:{sound}"));
        }
    }

    impl FloatingTextSink for Log {
        fn spawn_text(&mut self, text: &str, position: Vec3) {
            self.0.borrow_mut().push(format!("text:{text}@{}", position.y));
        }
    }

    fn two_slots() -> Vec<PlayerSlot> {
        let mut host = SandboxHost::new(Geometry::new());
        host.spawn_body(PlayerId::ONE, Vec3::ZERO, CapsuleShape::default());
        host.spawn_body(PlayerId::TWO, Vec3::X * 4.0, CapsuleShape::default());
        [PlayerId::ONE, PlayerId::TWO]
            .into_iter()
            .map(|p| {
                PlayerSlot::attach(p, PlayerBindings::unbound(0), &host, &GameConfig::default(), EventSink::detached())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn orb_pickup_shakes_everyone_and_pops_text() {
        let log = Log::default();
        let mut collab = Collaborators::new().with_audio(log.clone()).with_floating_text(log.clone());
        let mut slots = two_slots();

        collab.dispatch(
            &GameEvent::OrbCollected { player: PlayerId::ONE, position: Vec3::Y, amount: 10.0 },
            &mut slots,
        );

        assert!(slots.iter().all(|s| s.camera().is_shaking()));
        assert_eq!(*log.0.borrow(), vec!["sound:collect".to_string(), "text:+10@1.5".to_string()]);
    }

    #[test]
    fn stun_shakes_only_the_target() {
        let mut collab = Collaborators::new();
        let mut slots = two_slots();
        collab.dispatch(&GameEvent::StunApplied { player: PlayerId::TWO, duration: 1.0 }, &mut slots);
        assert!(!slots[0].camera().is_shaking());
        assert!(slots[1].camera().is_shaking());
    }

    #[test]
    fn animators_are_looked_up_per_player() {
        let mut collab = Collaborators::new()
            .with_animator(PlayerId::ONE, RecordingAnimator::default())
            .with_animator(PlayerId::ONE, RecordingAnimator::default());
        assert!(collab.animator_mut(PlayerId::ONE).is_some());
        assert!(collab.animator_mut(PlayerId::TWO).is_none());
        assert_eq!(collab.animators.len(), 1);
    }
}
