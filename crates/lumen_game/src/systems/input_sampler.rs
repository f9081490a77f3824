// crates/lumen_game/src/systems/input_sampler.rs

use lumen_shared::{InputState, PlayerBindings};

/// One player's view of the resolved input frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampledInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_pressed: bool,
    pub slide_pressed: bool,
    pub slide_held: bool,
    pub light_toggle_pressed: bool,
    pub jump_buffer_timer: f32,
}

/// Per-slot input capture with edge detection and the jump buffer.
pub struct InputSampler {
    bindings: PlayerBindings,
    jump_buffer_duration: f32,
    previous_mask: u64,
    state: SampledInput,
}

impl InputSampler {
    pub fn new(bindings: PlayerBindings, jump_buffer_duration: f32) -> Self {
        Self {
            bindings,
            jump_buffer_duration,
            previous_mask: 0,
            state: SampledInput::default(),
        }
    }

    /// Runs once per tick, before anything reads the state.
    pub fn sample(&mut self, frame: &InputState, dt: f32) {
        let b = self.bindings;
        let prev = InputState {
            digital_mask: self.previous_mask,
            ..InputState::default()
        };
        let pressed = |id| frame.is_active(id) && !prev.is_active(id);

        let s = &mut self.state;
        s.jump_pressed = pressed(b.jump);
        s.slide_pressed = pressed(b.slide);
        s.slide_held = frame.is_active(b.slide);
        s.light_toggle_pressed = pressed(b.light);

        // A press always refreshes to the full window; nothing accumulates.
        if s.jump_pressed {
            s.jump_buffer_timer = self.jump_buffer_duration;
        } else if s.jump_buffer_timer > 0.0 {
            s.jump_buffer_timer = (s.jump_buffer_timer - dt).max(0.0);
        }

        // Analog axes win; held direction actions stand in when the pair is silent.
        let digital = b.digital_vector(frame);
        let h = frame.get_axis(b.horizontal_axis());
        let v = frame.get_axis(b.vertical_axis());
        s.horizontal = (if h != 0.0 { h } else { digital.x }).clamp(-1.0, 1.0);
        s.vertical = (if v != 0.0 { v } else { digital.y }).clamp(-1.0, 1.0);

        self.previous_mask = frame.digital_mask;
    }

    pub fn state(&self) -> &SampledInput {
        &self.state
    }

    pub fn horizontal(&self) -> f32 {
        self.state.horizontal
    }

    pub fn jump_buffer_active(&self) -> bool {
        self.state.jump_buffer_timer > 0.0
    }

    /// At most one consumer per buffered press.
    pub fn consume_jump_buffer(&mut self) {
        self.state.jump_buffer_timer = 0.0;
    }

    pub fn bindings(&self) -> &PlayerBindings {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    fn bindings() -> PlayerBindings {
        PlayerBindings {
            left: 0,
            right: 1,
            jump: 2,
            slide: 3,
            light: 4,
            ..PlayerBindings::unbound(0)
        }
    }

    fn frame(active: &[u32]) -> InputState {
        let mut f = InputState::default();
        for id in active {
            f.set_active(*id, true);
        }
        f
    }

    #[test]
    fn press_refreshes_buffer_to_full_duration() {
        let mut s = InputSampler::new(bindings(), 0.2);
        s.sample(&frame(&[2]), DT);
        assert_eq!(s.state().jump_buffer_timer, 0.2);

        s.sample(&frame(&[]), DT);
        s.sample(&frame(&[2]), DT);
        assert_eq!(s.state().jump_buffer_timer, 0.2);
    }

    #[test]
    fn holding_jump_is_not_a_new_press() {
        let mut s = InputSampler::new(bindings(), 0.2);
        s.sample(&frame(&[2]), DT);
        s.sample(&frame(&[2]), DT);
        assert!(!s.state().jump_pressed);
        assert!(s.state().jump_buffer_timer < 0.2);
    }

    #[test]
    fn buffer_decreases_strictly_and_never_goes_negative() {
        let mut s = InputSampler::new(bindings(), 0.2);
        s.sample(&frame(&[2]), DT);
        let mut last = s.state().jump_buffer_timer;
        for _ in 0..30 {
            s.sample(&frame(&[]), DT);
            let t = s.state().jump_buffer_timer;
            assert!(t >= 0.0);
            if last > 0.0 {
                assert!(t < last);
            }
            last = t;
        }
        assert!(!s.jump_buffer_active());
    }

    #[test]
    fn consume_clears_the_buffer() {
        let mut s = InputSampler::new(bindings(), 0.2);
        s.sample(&frame(&[2]), DT);
        s.consume_jump_buffer();
        assert!(!s.jump_buffer_active());
        s.sample(&frame(&[2]), DT);
        assert!(!s.jump_buffer_active());
    }

    #[test]
    fn slide_edge_and_level_are_separate() {
        let mut s = InputSampler::new(bindings(), 0.2);
        s.sample(&frame(&[3]), DT);
        assert!(s.state().slide_pressed && s.state().slide_held);
        s.sample(&frame(&[3]), DT);
        assert!(!s.state().slide_pressed && s.state().slide_held);
    }

    #[test]
    fn axes_clamp_and_fall_back_to_digital() {
        let mut s = InputSampler::new(bindings(), 0.2);
        let mut f = InputState::default();
        f.set_axis(0, 3.0);
        s.sample(&f, DT);
        assert_eq!(s.horizontal(), 1.0);

        s.sample(&frame(&[0]), DT);
        assert_eq!(s.horizontal(), -1.0);
    }
}
