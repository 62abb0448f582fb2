//! Per-frame virtual input resource.
//!
//! The original games read keyboard/mouse events straight off the browser.
//! Headless, the driver loop (or a test) feeds the same information into
//! [`InputState`] between frames: button presses and releases, typed
//! characters for the word game, and pointer deltas for the 3D walker.
//! Call [`InputState::begin_frame`] before feeding events for a frame so
//! edge flags (`just_pressed`/`just_released`) and per-frame queues reset.

use bevy_ecs::prelude::*;

/// Boolean button state with per-frame edge flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button was pressed this frame.
    pub just_pressed: bool,
    /// Whether the button was released this frame.
    pub just_released: bool,
}

/// The virtual buttons the games care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Primary action: fire, drop bomb, interact.
    Action,
    /// Secondary action: submit word, confirm.
    Submit,
    /// Back/pause.
    Back,
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub up: ButtonState,
    pub down: ButtonState,
    pub left: ButtonState,
    pub right: ButtonState,
    pub action: ButtonState,
    pub submit: ButtonState,
    pub back: ButtonState,
    /// Characters typed this frame, in order.
    pub typed: Vec<char>,
    /// Accumulated pointer movement this frame (pointer-lock style).
    pub pointer_dx: f32,
    pub pointer_dy: f32,
}

impl InputState {
    /// Clear edge flags and per-frame queues. Call once per frame, before
    /// feeding this frame's events.
    pub fn begin_frame(&mut self) {
        for state in self.all_buttons_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
        self.typed.clear();
        self.pointer_dx = 0.0;
        self.pointer_dy = 0.0;
    }

    /// Record a button press. Sets `just_pressed` only on the inactive → active edge.
    pub fn press(&mut self, button: Button) {
        let state = self.button_mut(button);
        if !state.active {
            state.just_pressed = true;
        }
        state.active = true;
    }

    /// Record a button release.
    pub fn release(&mut self, button: Button) {
        let state = self.button_mut(button);
        if state.active {
            state.just_released = true;
        }
        state.active = false;
    }

    /// Record a typed character.
    pub fn type_char(&mut self, c: char) {
        self.typed.push(c);
    }

    /// Accumulate pointer movement for this frame.
    pub fn add_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.pointer_dx += dx;
        self.pointer_dy += dy;
    }

    /// Read-only access to a button state.
    pub fn button(&self, button: Button) -> &ButtonState {
        match button {
            Button::Up => &self.up,
            Button::Down => &self.down,
            Button::Left => &self.left,
            Button::Right => &self.right,
            Button::Action => &self.action,
            Button::Submit => &self.submit,
            Button::Back => &self.back,
        }
    }

    fn button_mut(&mut self, button: Button) -> &mut ButtonState {
        match button {
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Action => &mut self.action,
            Button::Submit => &mut self.submit,
            Button::Back => &mut self.back,
        }
    }

    fn all_buttons_mut(&mut self) -> [&mut ButtonState; 7] {
        [
            &mut self.up,
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.action,
            &mut self.submit,
            &mut self.back,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_all_inactive() {
        let input = InputState::default();
        assert!(!input.up.active);
        assert!(!input.down.active);
        assert!(!input.left.active);
        assert!(!input.right.active);
        assert!(!input.action.active);
        assert!(!input.submit.active);
        assert!(!input.back.active);
    }

    #[test]
    fn test_press_sets_edge_once() {
        let mut input = InputState::default();
        input.begin_frame();
        input.press(Button::Action);
        assert!(input.action.active);
        assert!(input.action.just_pressed);

        // Held into the next frame: active but no edge.
        input.begin_frame();
        input.press(Button::Action);
        assert!(input.action.active);
        assert!(!input.action.just_pressed);
    }

    #[test]
    fn test_release_sets_edge() {
        let mut input = InputState::default();
        input.press(Button::Left);
        input.begin_frame();
        input.release(Button::Left);
        assert!(!input.left.active);
        assert!(input.left.just_released);
    }

    #[test]
    fn test_begin_frame_clears_typed_and_pointer() {
        let mut input = InputState::default();
        input.type_char('a');
        input.add_pointer_delta(3.0, -2.0);
        input.begin_frame();
        assert!(input.typed.is_empty());
        assert_eq!(input.pointer_dx, 0.0);
        assert_eq!(input.pointer_dy, 0.0);
    }
}
