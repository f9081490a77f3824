// crates/lumen_shared/src/lib.rs
//! Types shared by the host crates and the gameplay layer.

pub mod components;
pub mod host_api;
pub mod input_types;
pub mod physics;

pub use components::{CCollider, COrb, CTransform, CTrigger};
pub use host_api::{GameLogic, Host};
pub use input_types::{
    ActionId, ActionSignal, InputState, KeyCode, MovementSignal, PlayerBindings, PlayerId,
    PriorityLayer, ACTION_NOT_FOUND, MAX_AXES,
};
pub use physics::{
    CapsuleShape, ColliderOwner, LayerMask, PhysicsQuery, RayHit, RigidBody, TriggerEvent,
    TriggerKind, TriggerPhase,
};
