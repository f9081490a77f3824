// crates/lumen_game/src/slot.rs
//! One logical player: the per-tick pipeline from sampled input to
//! animation parameters, plus the player's stats, light and camera.

use glam::Vec3;
use lumen_shared::{Host, InputState, PlayerBindings, PlayerId, TriggerEvent};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{SetupError, StunRejected};
use crate::events::{EventSink, GameEvent};
use crate::systems::animation::{AnimationBridge, AnimationFrame};
use crate::systems::camera::CameraRig;
use crate::systems::input_sampler::InputSampler;
use crate::systems::light::PlayerLight;
use crate::systems::locomotion::{LocomotionController, LocomotionState};
use crate::systems::parkour::{ParkourAction, ParkourState, ParkourStateMachine};
use crate::systems::scanner::{EnvironmentScanner, ScanResult};
use crate::systems::stats::PlayerStats;

/// What the owner of the slots has to act on after a slot tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotTick {
    pub interference_requested: bool,
}

pub struct PlayerSlot {
    id: PlayerId,
    input: InputSampler,
    scanner: EnvironmentScanner,
    locomotion: LocomotionController,
    parkour: ParkourStateMachine,
    stats: PlayerStats,
    light: PlayerLight,
    camera: CameraRig,
    animation: AnimationFrame,
    slide_lockout: f32,
    events: EventSink,
}

impl PlayerSlot {
    /// Wires a slot to the body the host registered for `id`.
    ///
    /// Fails when the body is missing or either collider posture is unusable.
    pub fn attach(
        id: PlayerId,
        bindings: PlayerBindings,
        host: &dyn Host,
        config: &GameConfig,
        events: EventSink,
    ) -> Result<Self, SetupError> {
        let body = host.body(id).ok_or(SetupError::MissingBody(id))?;

        let standing = body.capsule();
        if !standing.is_valid() {
            return Err(SetupError::InvalidCapsule { player: id, shape: standing });
        }
        let sliding = ParkourStateMachine::slide_capsule(&config.parkour, standing);
        if !sliding.is_valid() {
            return Err(SetupError::InvalidSlideCapsule { player: id, shape: sliding });
        }

        let seed = config.camera.shake_seed.wrapping_add(id.index() as u64);
        info!(player = %id, "slot attached");

        Ok(Self {
            id,
            input: InputSampler::new(bindings, config.input.jump_buffer_duration),
            scanner: EnvironmentScanner::new(config.scanner.clone()),
            locomotion: LocomotionController::new(config.locomotion.clone()),
            parkour: ParkourStateMachine::new(config.parkour.clone(), standing),
            stats: PlayerStats::new(config.stats.clone()),
            light: PlayerLight::new(config.light.clone()),
            camera: CameraRig::new(&config.camera, seed, body.position()),
            animation: AnimationFrame::default(),
            slide_lockout: config.parkour.slide_lockout_duration,
            events,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    pub fn light(&self) -> &PlayerLight {
        &self.light
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn locomotion(&self) -> &LocomotionState {
        self.locomotion.state()
    }

    pub fn parkour_state(&self) -> ParkourState {
        self.parkour.state()
    }

    pub fn scan(&self) -> &ScanResult {
        self.scanner.result()
    }

    pub fn animation(&self) -> &AnimationFrame {
        &self.animation
    }

    pub fn jump_buffer_active(&self) -> bool {
        self.input.jump_buffer_active()
    }

    pub fn tick(&mut self, host: &mut dyn Host, frame: &InputState, is_day: bool, dt: f32) -> SlotTick {
        let id = self.id;

        // 1. Input
        self.input.sample(frame, dt);

        let Some((query, body)) = host.split_body(id) else {
            warn!(player = %id, "body vanished; slot skipped");
            return SlotTick::default();
        };

        // 2. Scan
        let scan = self.scanner.scan(query, body.position(), self.input.horizontal());

        // 3. Locomotion
        let manual_slide = self.parkour.is_manually_sliding();
        let loco = if self.parkour.is_vaulting() {
            self.locomotion.tick_suspended(dt)
        } else {
            self.locomotion.tick(&mut self.input, &scan, manual_slide, query, body, dt)
        };
        if loco.suppressed {
            // Presses made while stunned are dropped, not replayed afterwards.
            self.input.consume_jump_buffer();
        }
        if loco.jumped {
            self.events.emit(GameEvent::Jumped { player: id });
        }
        if loco.hard_landed {
            self.parkour.lock_slide(self.slide_lockout);
            self.events.emit(GameEvent::HardLanding { player: id, position: body.position() });
        }
        if loco.stun_ended {
            self.events.emit(GameEvent::StunEnded { player: id });
        }

        // 4. Parkour
        let suppressed = loco.suppressed || self.locomotion.is_stunned();
        let parkour = self.parkour.tick(&mut self.input, &scan, self.locomotion.state(), suppressed, body, dt);
        if let Some(action) = parkour.finished {
            self.events.emit(match action {
                ParkourAction::Slide => GameEvent::SlideEnded { player: id },
                ParkourAction::Vault => GameEvent::VaultEnded { player: id },
            });
        }
        if let Some(action) = parkour.started {
            if action == ParkourAction::Vault {
                self.locomotion.on_vault_started();
            }
            self.events.emit(match action {
                ParkourAction::Slide => GameEvent::SlideStarted { player: id },
                ParkourAction::Vault => GameEvent::VaultStarted { player: id },
            });
            let points = self.stats.award(action);
            self.events.emit(GameEvent::ScoreAwarded {
                player: id,
                points,
                total: self.stats.score(),
            });
        }
        let position = body.position();

        // 5. Light (needs the full query view: other players are targets)
        let light = self.light.tick(
            id,
            self.input.state().light_toggle_pressed,
            is_day,
            &mut self.stats,
            host.query(),
            position,
            dt,
        );
        if let Some(on) = light.toggled {
            self.events.emit(GameEvent::LightToggled { player: id, on });
        }

        // 6. Presentation
        self.animation = AnimationBridge::project(self.input.state(), &scan, self.locomotion.state(), &loco, &parkour);
        self.camera.update(position, dt);

        SlotTick { interference_requested: light.interference_requested }
    }

    /// Velocity and slope forces. The vault drives the body itself.
    pub fn fixed_step(&mut self, host: &mut dyn Host, fixed_dt: f32) {
        if self.parkour.is_vaulting() {
            return;
        }
        let Some((_, body)) = host.split_body(self.id) else {
            return;
        };
        self.locomotion.fixed_step(self.input.horizontal(), body, fixed_dt);
    }

    pub fn apply_stun(&mut self, duration: f32) -> Result<(), StunRejected> {
        self.locomotion.apply_stun(duration, self.parkour.is_manually_sliding())?;
        info!(player = %self.id, duration, "stunned");
        self.events.emit(GameEvent::StunApplied { player: self.id, duration });
        Ok(())
    }

    /// Ignores triggers crossed by other players.
    pub fn on_trigger(&mut self, event: &TriggerEvent) {
        if event.player != self.id {
            return;
        }
        if self.locomotion.on_trigger(event.kind, event.phase) {
            debug!(player = %self.id, "slope barrier raised");
            self.events.emit(GameEvent::SlopeBarrierRaised { player: self.id });
        }
    }

    pub fn on_day_started(&mut self) {
        if self.light.force_off() {
            self.events.emit(GameEvent::LightToggled { player: self.id, on: false });
        }
    }

    /// Where pickups and floating text are anchored.
    pub fn position(&self, host: &dyn Host) -> Option<Vec3> {
        host.body(self.id).map(|b| b.position())
    }
}
