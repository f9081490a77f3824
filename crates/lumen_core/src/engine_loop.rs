// crates/lumen_core/src/engine_loop.rs

use std::time::Instant;

use lumen_shared::{GameLogic, Host, InputState};
use tracing::{trace, warn};

/// What one call to [`EngineLoop::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame_dt: f32,
    pub fixed_steps: u32,
    pub dropped_backlog: bool,
}

/// Fixed-timestep scheduler: one variable-rate tick per frame, then as many
/// fixed steps as the accumulator allows (capped, with backlog drop).
pub struct EngineLoop {
    last_frame_time: Instant,
    sim_accumulator: f32,
    sim_dt: f32,
    max_steps_per_frame: u32,
}

impl EngineLoop {
    pub fn new(sim_dt: f32) -> Self {
        Self {
            last_frame_time: Instant::now(),
            sim_accumulator: 0.0,
            sim_dt,
            max_steps_per_frame: 5,
        }
    }

    pub fn with_max_steps(mut self, max_steps_per_frame: u32) -> Self {
        self.max_steps_per_frame = max_steps_per_frame.max(1);
        self
    }

    pub fn sim_dt(&self) -> f32 {
        self.sim_dt
    }

    /// Time carried over to the next frame.
    pub fn accumulator(&self) -> f32 {
        self.sim_accumulator
    }

    /// Update the frame timer and return the clamped frame delta.
    /// Clamps to 0.25s to avoid giant spikes after a stall or a breakpoint.
    pub fn tick_timer(&mut self) -> f32 {
        let now = Instant::now();
        let frame_dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        frame_dt.min(0.25)
    }

    /// Runs one frame against `game`:
    /// 1. `tick` once with the frame delta,
    /// 2. fixed steps until the accumulator is caught up or the cap is hit;
    ///    each step is `fixed_step`, then the host physics step, then trigger delivery.
    ///
    /// If the backlog still remains at the cap it is dropped, to avoid
    /// "chasing" an infinite backlog under heavy load.
    pub fn advance(
        &mut self,
        frame_dt: f32,
        game: &mut dyn GameLogic,
        host: &mut dyn Host,
        input: &InputState,
    ) -> FrameReport {
        let frame_dt = frame_dt.max(0.0);
        game.tick(host, input, frame_dt);

        self.sim_accumulator += frame_dt;

        let mut steps = 0;
        while self.sim_accumulator >= self.sim_dt && steps < self.max_steps_per_frame {
            game.fixed_step(host, self.sim_dt);
            host.step_physics(self.sim_dt);
            for event in host.drain_triggers() {
                game.on_trigger(event);
            }
            self.sim_accumulator -= self.sim_dt;
            steps += 1;
        }

        // Prevent unbounded backlog if we're constantly saturated.
        let dropped_backlog = steps == self.max_steps_per_frame && self.sim_accumulator >= self.sim_dt;
        if dropped_backlog {
            warn!(backlog = self.sim_accumulator, "simulation saturated, dropping backlog");
            self.sim_accumulator = 0.0;
        }

        trace!(frame_dt, steps, "frame advanced");
        FrameReport {
            frame_dt,
            fixed_steps: steps,
            dropped_backlog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lumen_shared::{
        ColliderOwner, LayerMask, PhysicsQuery, PlayerId, RayHit, RigidBody, TriggerEvent,
        TriggerKind, TriggerPhase,
    };

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl GameLogic for Recorder {
        fn tick(&mut self, _host: &mut dyn Host, _input: &InputState, _dt: f32) {
            self.calls.push("tick");
        }

        fn fixed_step(&mut self, _host: &mut dyn Host, _fixed_dt: f32) {
            self.calls.push("fixed");
        }

        fn on_trigger(&mut self, _event: TriggerEvent) {
            self.calls.push("trigger");
        }
    }

    /// Host with no geometry that reports one trigger per physics step.
    #[derive(Default)]
    struct EmptyHost {
        steps: u32,
        pending: Vec<TriggerEvent>,
    }

    impl PhysicsQuery for EmptyHost {
        fn raycast(&self, _o: Vec3, _d: Vec3, _max: f32, _mask: LayerMask) -> Option<RayHit> {
            None
        }

        fn overlap_sphere(&self, _c: Vec3, _r: f32, _mask: LayerMask) -> Vec<ColliderOwner> {
            Vec::new()
        }
    }

    impl Host for EmptyHost {
        fn query(&self) -> &dyn PhysicsQuery {
            self
        }

        fn body(&self, _player: PlayerId) -> Option<&dyn RigidBody> {
            None
        }

        fn split_body(&mut self, _player: PlayerId) -> Option<(&dyn PhysicsQuery, &mut dyn RigidBody)> {
            None
        }

        fn step_physics(&mut self, _fixed_dt: f32) {
            self.steps += 1;
            self.pending.push(TriggerEvent {
                player: PlayerId::ONE,
                kind: TriggerKind::SlopeZone,
                phase: TriggerPhase::Enter,
            });
        }

        fn drain_triggers(&mut self) -> Vec<TriggerEvent> {
            std::mem::take(&mut self.pending)
        }
    }

    #[test]
    fn tick_runs_before_fixed_steps_and_triggers_follow_physics() {
        let mut lp = EngineLoop::new(0.02);
        let mut game = Recorder::default();
        let mut host = EmptyHost::default();

        let report = lp.advance(0.041, &mut game, &mut host, &InputState::default());
        assert_eq!(report.fixed_steps, 2);
        assert_eq!(host.steps, 2);
        assert_eq!(game.calls, vec!["tick", "fixed", "trigger", "fixed", "trigger"]);
        assert!((lp.accumulator() - 0.001).abs() < 1e-5);
    }

    #[test]
    fn short_frames_carry_the_remainder() {
        let mut lp = EngineLoop::new(0.02);
        let mut game = Recorder::default();
        let mut host = EmptyHost::default();

        assert_eq!(lp.advance(0.016, &mut game, &mut host, &InputState::default()).fixed_steps, 0);
        assert_eq!(lp.advance(0.016, &mut game, &mut host, &InputState::default()).fixed_steps, 1);
    }

    #[test]
    fn saturated_frame_drops_backlog() {
        let mut lp = EngineLoop::new(0.02);
        let mut game = Recorder::default();
        let mut host = EmptyHost::default();

        let report = lp.advance(0.25, &mut game, &mut host, &InputState::default());
        assert_eq!(report.fixed_steps, 5);
        assert!(report.dropped_backlog);
        assert_eq!(lp.accumulator(), 0.0);
    }
}
