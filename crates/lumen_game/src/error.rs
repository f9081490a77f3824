// crates/lumen_game/src/error.rs

use lumen_shared::{CapsuleShape, PlayerId};
use thiserror::Error;

use crate::config::ConfigError;

/// Wiring problems found while attaching a level. Fatal: the slot refuses to run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no rigid body registered for {0}")]
    MissingBody(PlayerId),
    #[error("{player} has an invalid capsule collider: {shape:?}")]
    InvalidCapsule { player: PlayerId, shape: CapsuleShape },
    #[error("{player} would slide with a degenerate capsule: {shape:?}")]
    InvalidSlideCapsule { player: PlayerId, shape: CapsuleShape },
    #[error("{0} was attached twice")]
    DuplicateSlot(PlayerId),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StunRejected {
    #[error("target is already stunned")]
    AlreadyStunned,
    #[error("target is mid-slide")]
    Sliding,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InterferenceError {
    #[error("{0} has no opponent")]
    NoOpponent(PlayerId),
    #[error("opponent {0} is not in the level")]
    TargetMissing(PlayerId),
    #[error("stun on {target} rejected: {reason}")]
    Rejected { target: PlayerId, reason: StunRejected },
}
