// crates/lumen_game/src/state.rs

use glam::Vec3;
use lumen_ecs::Entity;
use lumen_shared::{GameLogic, Host, InputState, PlayerBindings, PlayerId, TriggerEvent};
use tracing::{debug, info};

use crate::collab::Collaborators;
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::events::{EventBus, EventSink, GameEvent};
use crate::interference::InterferenceSystem;
use crate::slot::PlayerSlot;
use crate::systems::animation::AnimationBridge;
use crate::systems::collection_bar::OrbCollectionBar;
use crate::systems::day_cycle::{DayCycle, DayPhase};
use crate::systems::orbs::OrbField;

/// The level: player slots plus the services they share.
pub struct Game {
    config: GameConfig,
    slots: Vec<PlayerSlot>,
    day_cycle: DayCycle,
    orbs: OrbField,
    bar: OrbCollectionBar,
    interference: InterferenceSystem,
    collaborators: Collaborators,
    bus: EventBus,
    events: EventSink,
    history: Vec<GameEvent>,
}

impl Game {
    /// Validates the tunables and attaches one slot per player, in order.
    pub fn new(config: GameConfig, players: &[(PlayerId, PlayerBindings)], host: &dyn Host) -> Result<Self, SetupError> {
        config.validate()?;

        let bus = EventBus::new();
        let mut slots: Vec<PlayerSlot> = Vec::with_capacity(players.len());
        for &(id, bindings) in players {
            if slots.iter().any(|s| s.id() == id) {
                return Err(SetupError::DuplicateSlot(id));
            }
            slots.push(PlayerSlot::attach(id, bindings, host, &config, bus.sink())?);
        }
        info!(players = slots.len(), "level attached");

        Ok(Self {
            day_cycle: DayCycle::new(&config.day_cycle),
            orbs: OrbField::new(),
            bar: OrbCollectionBar::new(&config.orbs),
            interference: InterferenceSystem::new(&config.interference),
            collaborators: Collaborators::new(),
            events: bus.sink(),
            bus,
            history: Vec::new(),
            slots,
            config,
        })
    }

    pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators {
        &mut self.collaborators
    }

    pub fn spawn_orb(&mut self, position: Vec3) -> Entity {
        let visible = !self.day_cycle.is_started() || self.day_cycle.is_day();
        let orb = self.orbs.spawn(position, &self.config.orbs);
        if !visible {
            self.orbs.set_visible_all(false);
        }
        orb
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn slots(&self) -> &[PlayerSlot] {
        &self.slots
    }

    pub fn slot(&self, id: PlayerId) -> Option<&PlayerSlot> {
        self.slots.iter().find(|s| s.id() == id)
    }

    pub fn day_cycle(&self) -> &DayCycle {
        &self.day_cycle
    }

    pub fn orbs(&self) -> &OrbField {
        &self.orbs
    }

    pub fn bar(&self) -> &OrbCollectionBar {
        &self.bar
    }

    /// Everything dispatched since the last call, in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.history)
    }

    fn advance_day_cycle(&mut self, dt: f32) {
        let phase = if self.day_cycle.is_started() {
            self.day_cycle.tick(dt)
        } else {
            Some(self.day_cycle.start())
        };

        match phase {
            Some(DayPhase::Day) => {
                self.orbs.set_visible_all(true);
                for slot in &mut self.slots {
                    slot.on_day_started();
                }
                self.events.emit(GameEvent::DayStarted);
            }
            Some(DayPhase::Night) => {
                self.orbs.set_visible_all(false);
                self.events.emit(GameEvent::NightStarted);
            }
            None => {}
        }
    }

    fn collect_orbs(&mut self, host: &dyn Host) {
        for slot in &mut self.slots {
            let Some(position) = slot.position(host) else {
                continue;
            };
            for pickup in self.orbs.collect_near(position) {
                slot.stats_mut().add_luminescence(pickup.luminescence);
                self.events.emit(GameEvent::OrbCollected {
                    player: slot.id(),
                    position: pickup.position,
                    amount: pickup.luminescence,
                });
                if self.bar.add_orbs(pickup.bar_value) {
                    self.events.emit(GameEvent::BarFilled);
                }
            }
        }
    }

    fn flush_events(&mut self) {
        let events = self.bus.drain();
        for event in &events {
            debug!(?event, "dispatch");
            self.collaborators.dispatch(event, &mut self.slots);
        }
        self.history.extend(events);

        for slot in &self.slots {
            if let Some(animator) = self.collaborators.animator_mut(slot.id()) {
                AnimationBridge::apply(slot.animation(), animator);
            }
        }
    }
}

impl GameLogic for Game {
    fn tick(&mut self, host: &mut dyn Host, input: &InputState, dt: f32) {
        // 1. World clock
        self.advance_day_cycle(dt);
        let is_day = self.day_cycle.is_day();

        // 2. Players, in slot order; interference resolves before the next slot runs
        for i in 0..self.slots.len() {
            let out = self.slots[i].tick(host, input, is_day, dt);
            if out.interference_requested {
                let attacker = self.slots[i].id();
                if let Err(e) = self.interference.attempt(attacker, &mut self.slots) {
                    debug!(%attacker, error = %e, "interference dropped");
                }
            }
        }

        // 3. Pickups
        self.collect_orbs(host);
        self.bar.tick(dt);

        // 4. Cosmetics
        self.flush_events();
    }

    fn fixed_step(&mut self, host: &mut dyn Host, fixed_dt: f32) {
        for slot in &mut self.slots {
            slot.fixed_step(host, fixed_dt);
        }
    }

    fn on_trigger(&mut self, event: TriggerEvent) {
        for slot in &mut self.slots {
            slot.on_trigger(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, DayCycleTuning, OrbTuning};
    use crate::systems::animation::{Animator, RecordingAnimator, params};
    use lumen_physics::{Geometry, SandboxHost};
    use lumen_shared::{CapsuleShape, LayerMask};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 0.02;
    const P1_LIGHT: u32 = 6;

    fn bindings(base: u32, axis_pair: usize) -> PlayerBindings {
        PlayerBindings {
            left: base,
            right: base + 1,
            up: base + 2,
            down: base + 3,
            jump: base + 4,
            slide: base + 5,
            light: base + 6,
            axis_pair,
        }
    }

    fn players() -> [(PlayerId, PlayerBindings); 2] {
        [(PlayerId::ONE, bindings(0, 0)), (PlayerId::TWO, bindings(10, 1))]
    }

    fn host(p2_x: f32) -> SandboxHost {
        let mut g = Geometry::new();
        g.add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 5.0), LayerMask::GROUND);
        let mut h = SandboxHost::new(g);
        h.spawn_body(PlayerId::ONE, Vec3::new(0.0, 1.0, 0.0), CapsuleShape::default());
        h.spawn_body(PlayerId::TWO, Vec3::new(p2_x, 1.0, 0.0), CapsuleShape::default());
        h
    }

    fn frame(active: &[u32]) -> InputState {
        let mut f = InputState::default();
        for &id in active {
            f.set_active(id, true);
        }
        f
    }

    #[test]
    fn duplicate_players_are_rejected() {
        let h = host(20.0);
        let dup = [(PlayerId::ONE, bindings(0, 0)), (PlayerId::ONE, bindings(10, 1))];
        let err = Game::new(GameConfig::default(), &dup, &h);
        assert!(matches!(err, Err(SetupError::DuplicateSlot(PlayerId::ONE))));
    }

    #[test]
    fn invalid_tunables_fail_setup() {
        let h = host(20.0);
        let mut config = GameConfig::default();
        config.locomotion.move_speed = -1.0;
        let err = Game::new(config, &players(), &h);
        assert!(matches!(err, Err(SetupError::Config(ConfigError::Invalid { .. }))));
    }

    #[test]
    fn first_tick_starts_the_day_and_night_hides_orbs() {
        let mut h = host(20.0);
        let config = GameConfig {
            day_cycle: DayCycleTuning { phase_duration: 0.1 },
            ..Default::default()
        };
        let mut game = Game::new(config, &players(), &h).unwrap();
        game.spawn_orb(Vec3::new(10.0, 1.0, 0.0));

        game.tick(&mut h, &frame(&[]), DT);
        assert_eq!(game.take_events(), vec![GameEvent::DayStarted]);
        assert_eq!(game.orbs().visible_count(), 1);

        for _ in 0..7 {
            game.tick(&mut h, &frame(&[]), DT);
        }
        assert!(!game.day_cycle().is_day());
        assert!(game.take_events().contains(&GameEvent::NightStarted));
        assert_eq!(game.orbs().visible_count(), 0);
    }

    #[test]
    fn walking_into_an_orb_collects_it_once() {
        let mut h = host(20.0);
        let config = GameConfig {
            orbs: OrbTuning { max_orbs: 1, ..Default::default() },
            ..Default::default()
        };
        let mut game = Game::new(config, &players(), &h).unwrap();
        game.spawn_orb(Vec3::new(0.0, 1.5, 0.0));

        game.tick(&mut h, &frame(&[]), DT);
        game.tick(&mut h, &frame(&[]), DT);

        let events = game.take_events();
        let collected: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::OrbCollected { .. }))
            .collect();
        assert_eq!(collected.len(), 1);
        assert!(events.contains(&GameEvent::BarFilled));
        assert_eq!(game.slot(PlayerId::ONE).unwrap().stats().luminescence(), 10.0);
        assert_eq!(game.slot(PlayerId::TWO).unwrap().stats().luminescence(), 0.0);
        assert_eq!(game.bar().count(), 1);
        assert!(game.slot(PlayerId::ONE).unwrap().camera().is_shaking());
    }

    #[test]
    fn daytime_light_pulse_stuns_a_nearby_opponent() {
        let mut h = host(2.0);
        let mut game = Game::new(GameConfig::default(), &players(), &h).unwrap();

        game.tick(&mut h, &frame(&[]), DT);
        game.tick(&mut h, &frame(&[P1_LIGHT]), DT);

        assert!(game.slot(PlayerId::TWO).unwrap().locomotion().is_stunned);
        assert!(!game.slot(PlayerId::ONE).unwrap().locomotion().is_stunned);
        assert!(
            game.take_events()
                .contains(&GameEvent::StunApplied { player: PlayerId::TWO, duration: 1.0 })
        );
    }

    #[derive(Clone, Default)]
    struct SharedAnimator(Rc<RefCell<RecordingAnimator>>);

    impl Animator for SharedAnimator {
        fn set_float(&mut self, name: &'static str, value: f32) {
            self.0.borrow_mut().set_float(name, value);
        }

        fn set_bool(&mut self, name: &'static str, value: bool) {
            self.0.borrow_mut().set_bool(name, value);
        }

        fn set_trigger(&mut self, name: &'static str) {
            self.0.borrow_mut().set_trigger(name);
        }
    }

    #[test]
    fn animators_receive_each_frame() {
        let mut h = host(20.0);
        let anim = SharedAnimator::default();
        let mut game = Game::new(GameConfig::default(), &players(), &h)
            .unwrap()
            .with_collaborators(Collaborators::new().with_animator(PlayerId::ONE, anim.clone()));

        game.tick(&mut h, &frame(&[]), DT);
        game.tick(&mut h, &frame(&[4]), DT);

        let rec = anim.0.borrow();
        assert_eq!(rec.last_bool(params::GROUNDED), Some(true));
        assert_eq!(rec.last_float(params::FACING), Some(1.0));
        assert_eq!(rec.triggers, vec![params::JUMP]);
    }
}
