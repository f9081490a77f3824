// crates/lumen_game/src/interference.rs

use lumen_shared::PlayerId;
use tracing::{debug, info};

use crate::config::InterferenceTuning;
use crate::error::InterferenceError;
use crate::slot::PlayerSlot;

/// Turns a light pulse into a stun on the opposing player.
#[derive(Debug, Clone)]
pub struct InterferenceSystem {
    stun_duration: f32,
}

impl InterferenceSystem {
    pub fn new(tuning: &InterferenceTuning) -> Self {
        Self { stun_duration: tuning.stun_duration }
    }

    /// Stuns the attacker's opponent. A rejected stun is not retried.
    pub fn attempt(&self, attacker: PlayerId, slots: &mut [PlayerSlot]) -> Result<PlayerId, InterferenceError> {
        let target = attacker.opponent().ok_or(InterferenceError::NoOpponent(attacker))?;
        let slot = slots
            .iter_mut()
            .find(|s| s.id() == target)
            .ok_or(InterferenceError::TargetMissing(target))?;

        match slot.apply_stun(self.stun_duration) {
            Ok(()) => {
                info!(%attacker, %target, "interference landed");
                Ok(target)
            }
            Err(reason) => {
                debug!(%attacker, %target, %reason, "interference rejected");
                Err(InterferenceError::Rejected { target, reason })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::error::StunRejected;
    use crate::events::EventSink;
    use glam::Vec3;
    use lumen_physics::{Geometry, SandboxHost};
    use lumen_shared::{CapsuleShape, PlayerBindings};

    fn slots(players: &[PlayerId]) -> Vec<PlayerSlot> {
        let mut host = SandboxHost::new(Geometry::new());
        for &p in players {
            host.spawn_body(p, Vec3::ZERO, CapsuleShape::default());
        }
        players
            .iter()
            .map(|&p| {
                PlayerSlot::attach(p, PlayerBindings::unbound(0), &host, &GameConfig::default(), EventSink::detached())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn stuns_the_other_player_once() {
        let sys = InterferenceSystem::new(&InterferenceTuning::default());
        let mut s = slots(&[PlayerId::ONE, PlayerId::TWO]);

        assert_eq!(sys.attempt(PlayerId::ONE, &mut s), Ok(PlayerId::TWO));
        assert!(s[1].locomotion().is_stunned);
        assert!(!s[0].locomotion().is_stunned);

        assert_eq!(
            sys.attempt(PlayerId::ONE, &mut s),
            Err(InterferenceError::Rejected {
                target: PlayerId::TWO,
                reason: StunRejected::AlreadyStunned,
            })
        );
    }

    #[test]
    fn missing_opponent_is_reported() {
        let sys = InterferenceSystem::new(&InterferenceTuning::default());
        let mut s = slots(&[PlayerId::ONE]);
        assert_eq!(sys.attempt(PlayerId::ONE, &mut s), Err(InterferenceError::TargetMissing(PlayerId::TWO)));
        assert_eq!(
            sys.attempt(PlayerId(7), &mut s),
            Err(InterferenceError::NoOpponent(PlayerId(7)))
        );
    }
}
