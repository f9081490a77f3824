// crates/lumen_shared/src/input_types.rs
//! Compact input types shared by the host input pipeline and the gameplay layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable integer id for a registered action.
pub type ActionId = u32;
pub const ACTION_NOT_FOUND: ActionId = u32::MAX;

/// Number of analog axes carried in a resolved frame (two per player slot).
pub const MAX_AXES: usize = 8;

/// Logical player slot. Ids are 1-based like the device naming (`P1_*`, `P2_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(1);
    pub const TWO: PlayerId = PlayerId(2);

    /// Zero-based slot index.
    pub fn index(self) -> usize {
        usize::from(self.0.saturating_sub(1))
    }

    /// The other player in a two-player match.
    pub fn opponent(self) -> Option<PlayerId> {
        match self.0 {
            1 => Some(PlayerId::TWO),
            2 => Some(PlayerId::ONE),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Device-agnostic key codes understood by the default bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyE,
    KeyQ,
    Space,
    ShiftLeft,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    ShiftRight,
    ControlRight,
}

/// The Priority Stack for Subsumption Architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityLayer {
    Reflex = 0,
    Cutscene = 1,
    Control = 2,
    Ambient = 3,
}

/// A movement request aimed at one player's axis pair.
#[derive(Debug, Clone, Copy)]
pub struct MovementSignal {
    pub layer: PriorityLayer,
    pub axis_pair: usize,
    pub vector: Vec2,
    pub weight: f32,
}

impl Default for MovementSignal {
    fn default() -> Self {
        Self {
            layer: PriorityLayer::Ambient,
            axis_pair: 0,
            vector: Vec2::ZERO,
            weight: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActionSignal {
    pub layer: PriorityLayer,
    pub action_id: ActionId,
    pub active: bool,
}

impl Default for ActionSignal {
    fn default() -> Self {
        Self {
            layer: PriorityLayer::Ambient,
            action_id: ACTION_NOT_FOUND,
            active: false,
        }
    }
}

/// One resolved input frame for every player slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Bitmask for up to 64 digital actions (result of arbitration).
    pub digital_mask: u64,

    /// Fixed-size analog axes. Player slot `n` owns axes `2n` and `2n + 1`.
    pub analog_axes: [f32; MAX_AXES],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            digital_mask: 0,
            analog_axes: [0.0; MAX_AXES],
        }
    }
}

impl InputState {
    /// Safe check; returns false for out-of-range ids (including ACTION_NOT_FOUND).
    pub fn is_active(&self, action_id: ActionId) -> bool {
        if (action_id as usize) >= 64 {
            return false;
        }
        (self.digital_mask & (1u64 << action_id)) != 0
    }

    pub fn set_active(&mut self, action_id: ActionId, active: bool) {
        if (action_id as usize) >= 64 {
            return;
        }
        if active {
            self.digital_mask |= 1u64 << action_id;
        } else {
            self.digital_mask &= !(1u64 << action_id);
        }
    }

    pub fn get_axis(&self, axis_index: usize) -> f32 {
        if axis_index >= MAX_AXES {
            0.0
        } else {
            self.analog_axes[axis_index]
        }
    }

    pub fn set_axis(&mut self, axis_index: usize, value: f32) {
        if axis_index < MAX_AXES {
            self.analog_axes[axis_index] = value;
        }
    }
}

/// Action ids and the analog axis pair one player slot reads from a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBindings {
    pub left: ActionId,
    pub right: ActionId,
    pub up: ActionId,
    pub down: ActionId,
    pub jump: ActionId,
    pub slide: ActionId,
    pub light: ActionId,
    pub axis_pair: usize,
}

impl PlayerBindings {
    /// Bindings that never fire; used before the registry has been consulted.
    pub fn unbound(axis_pair: usize) -> Self {
        Self {
            left: ACTION_NOT_FOUND,
            right: ACTION_NOT_FOUND,
            up: ACTION_NOT_FOUND,
            down: ACTION_NOT_FOUND,
            jump: ACTION_NOT_FOUND,
            slide: ACTION_NOT_FOUND,
            light: ACTION_NOT_FOUND,
            axis_pair,
        }
    }

    pub fn horizontal_axis(&self) -> usize {
        self.axis_pair * 2
    }

    pub fn vertical_axis(&self) -> usize {
        self.axis_pair * 2 + 1
    }

    /// Unit direction implied by the held movement actions, before arbitration.
    pub fn digital_vector(&self, state: &InputState) -> Vec2 {
        let mut v = Vec2::ZERO;
        if state.is_active(self.right) { v.x += 1.0; }
        if state.is_active(self.left) { v.x -= 1.0; }
        if state.is_active(self.up) { v.y += 1.0; }
        if state.is_active(self.down) { v.y -= 1.0; }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_actions_are_never_active() {
        let mut state = InputState::default();
        state.set_active(ACTION_NOT_FOUND, true);
        assert_eq!(state.digital_mask, 0);
        assert!(!state.is_active(ACTION_NOT_FOUND));
        assert_eq!(state.get_axis(MAX_AXES), 0.0);
    }

    #[test]
    fn player_ids_pair_up() {
        assert_eq!(PlayerId::ONE.opponent(), Some(PlayerId::TWO));
        assert_eq!(PlayerId::TWO.opponent(), Some(PlayerId::ONE));
        assert_eq!(PlayerId(3).opponent(), None);
        assert_eq!(PlayerId::TWO.index(), 1);
    }

    #[test]
    fn bindings_read_their_own_axis_pair() {
        let b = PlayerBindings::unbound(1);
        assert_eq!(b.horizontal_axis(), 2);
        assert_eq!(b.vertical_axis(), 3);
    }
}
