// crates/lumen_demo/src/main.rs
//! Headless run of a small two-player level with scripted key presses.
//!
//! Usage: `lumen_demo [tunables.json]`. Log filter from `LUMEN_LOG`, then
//! `RUST_LOG`, default `info`.

use std::env;

use anyhow::Context;
use glam::Vec3;
use lumen_core::EngineLoop;
use lumen_core::input::{ActionRegistry, Arbiter, InputDefaults, InputMap, InputPoller, KeyEvent, KeyState};
use lumen_game::{Animator, AudioSink, Collaborators, FloatingTextSink, Game, GameConfig, GameEvent};
use lumen_physics::{Geometry, SandboxHost};
use lumen_shared::{CapsuleShape, KeyCode, LayerMask, PlayerId, TriggerKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const FRAME_DT: f32 = 1.0 / 60.0;
const SIM_DT: f32 = 1.0 / 50.0;
const FRAMES: u32 = 900;

fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = match env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading tunables from {path}"))?,
        None => GameConfig::default(),
    };

    let mut host = build_level();
    let mut registry = ActionRegistry::default();
    let mut input_map = InputMap::default();
    let bindings = InputDefaults::setup(&mut registry, &mut input_map);
    info!(actions = registry.len(), "input registered");

    let players = [(PlayerId::ONE, bindings[0]), (PlayerId::TWO, bindings[1])];
    let collaborators = Collaborators::new()
        .with_audio(LogAudio)
        .with_floating_text(LogText)
        .with_animator(PlayerId::ONE, LogAnimator(PlayerId::ONE))
        .with_animator(PlayerId::TWO, LogAnimator(PlayerId::TWO));
    let mut game = Game::new(config, &players, &host)
        .context("attaching players to the level")?
        .with_collaborators(collaborators);
    for x in [3.0, 9.0, 14.0, 20.0] {
        game.spawn_orb(Vec3::new(x, 1.0, 0.0));
    }

    let mut engine = EngineLoop::new(SIM_DT);
    let mut poller = InputPoller::new();
    let mut arbiter = Arbiter::default();
    let script = script();
    let mut cursor = 0;
    let mut saturated = 0;

    for frame in 0..FRAMES {
        while let Some((at, event)) = script.get(cursor) {
            if *at > frame {
                break;
            }
            poller.handle_event(event);
            cursor += 1;
        }

        poller.synchronize_with_arbiter(&mut arbiter, &input_map, &bindings);
        let input = arbiter.resolve();
        let report = engine.advance(FRAME_DT, &mut game, &mut host, &input);
        if report.dropped_backlog {
            saturated += 1;
        }

        for event in game.take_events() {
            log_event(frame, &event);
        }
    }

    for slot in game.slots() {
        let position = slot.position(&host).unwrap_or(Vec3::ZERO);
        info!(
            player = %slot.id(),
            score = slot.stats().score(),
            luminescence = slot.stats().luminescence(),
            x = position.x,
            y = position.y,
            "final state"
        );
    }
    info!(orbs = %game.bar().label(), saturated, "run finished");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_env("LUMEN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// A flat run with a crate to vault and a downhill stretch ending in a slope exit.
fn build_level() -> SandboxHost {
    let mut g = Geometry::new();
    g.add_box(Vec3::new(10.0, -0.5, 0.0), Vec3::new(40.0, 0.5, 5.0), LayerMask::GROUND);
    g.add_box(Vec3::new(6.0, 0.5, 0.0), Vec3::new(0.5, 0.5, 1.0), LayerMask::GROUND | LayerMask::OBSTACLE);
    g.add_trigger(Vec3::new(16.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 2.0), TriggerKind::SlopeZone);
    g.add_trigger(Vec3::new(18.5, 1.0, 0.0), Vec3::new(0.5, 2.0, 2.0), TriggerKind::SlopeExit);

    let mut host = SandboxHost::new(g);
    host.spawn_body(PlayerId::ONE, Vec3::new(0.0, 1.0, 0.0), CapsuleShape::default());
    host.spawn_body(PlayerId::TWO, Vec3::new(-2.0, 4.0, 0.0), CapsuleShape::default());
    host
}

/// `(frame, key event)`, sorted by frame.
fn script() -> Vec<(u32, KeyEvent)> {
    let press = |key| KeyEvent { key, state: KeyState::Pressed };
    let release = |key| KeyEvent { key, state: KeyState::Released };
    vec![
        (30, press(KeyCode::KeyD)),
        (30, press(KeyCode::ArrowRight)),
        (45, press(KeyCode::Space)),
        (46, release(KeyCode::Space)),
        (140, press(KeyCode::ShiftLeft)),
        (141, release(KeyCode::ShiftLeft)),
        (200, release(KeyCode::ArrowRight)),
        (205, press(KeyCode::ControlRight)),
        (206, release(KeyCode::ControlRight)),
        (230, press(KeyCode::KeyE)),
        (231, release(KeyCode::KeyE)),
        (240, press(KeyCode::Enter)),
        (241, release(KeyCode::Enter)),
        (420, release(KeyCode::KeyD)),
    ]
}

fn log_event(frame: u32, event: &GameEvent) {
    match event {
        GameEvent::DayStarted | GameEvent::NightStarted | GameEvent::BarFilled => info!(frame, ?event),
        GameEvent::ScoreAwarded { player, points, total } => info!(frame, %player, points, total, "score"),
        _ => debug!(frame, ?event),
    }
}

struct LogAudio;

impl AudioSink for LogAudio {
    fn play_at(&mut self, sound: &'static str, position: Vec3) {
        debug!(sound, x = position.x, y = position.y, "play");
    }
}

struct LogText;

impl FloatingTextSink for LogText {
    fn spawn_text(&mut self, text: &str, position: Vec3) {
        debug!(text, x = position.x, y = position.y, "floating text");
    }
}

struct LogAnimator(PlayerId);

impl Animator for LogAnimator {
    fn set_float(&mut self, _name: &'static str, _value: f32) {}

    fn set_bool(&mut self, _name: &'static str, _value: bool) {}

    fn set_trigger(&mut self, name: &'static str) {
        debug!(player = %self.0, trigger = name, "animator");
    }
}
