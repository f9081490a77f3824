// crates/lumen_shared/src/host_api.rs
//! The seam between the scheduler (host side) and the gameplay layer.

use crate::input_types::{InputState, PlayerId};
use crate::physics::{PhysicsQuery, RigidBody, TriggerEvent};

/// Capabilities the host engine lends to gameplay for one call.
///
/// `split_body` hands out the static-world query view and one body at the
/// same time; the query view must not alias the body it is paired with.
pub trait Host {
    /// Full query view, including player bodies (overlap tests see players).
    fn query(&self) -> &dyn PhysicsQuery;

    fn body(&self, player: PlayerId) -> Option<&dyn RigidBody>;

    fn split_body(&mut self, player: PlayerId) -> Option<(&dyn PhysicsQuery, &mut dyn RigidBody)>;

    /// Advance the host simulation by one fixed step.
    fn step_physics(&mut self, fixed_dt: f32);

    /// Trigger enter/exit notifications produced since the last drain.
    fn drain_triggers(&mut self) -> Vec<TriggerEvent>;
}

/// Per-frame and per-fixed-step callbacks, invoked in a fixed order by the scheduler.
pub trait GameLogic {
    fn tick(&mut self, host: &mut dyn Host, input: &InputState, dt: f32);

    fn fixed_step(&mut self, host: &mut dyn Host, fixed_dt: f32);

    fn on_trigger(&mut self, event: TriggerEvent);
}
