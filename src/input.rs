//! Directional input sampling.
//!
//! [`DirectionalInput`] is the boundary between host input polling and the
//! locomotion core: the host (or the built-in sampler) writes edge and level
//! state into it every frame, and the controller consumes it. This works
//! with any input source: keyboard, gamepad, touch, replay, AI.

use bevy::prelude::*;

/// Identity of a directional tap, used for double-tap matching.
///
/// A second tap only opens a run when it is the *same* key as the previous
/// one; alternating left/right taps never trigger.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKey {
    Left,
    Right,
}

/// Edge and level state for one digital directional button.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// The button is down this frame.
    pub held: bool,
    /// The button went down this frame.
    pub just_pressed: bool,
    /// The button went up this frame.
    pub just_released: bool,
}

impl ButtonState {
    /// Record a down edge. The button reads as held from this frame on.
    pub fn press(&mut self) {
        self.just_pressed = !self.held;
        self.held = true;
        self.just_released = false;
    }

    /// Record an up edge.
    pub fn release(&mut self) {
        self.just_released = self.held;
        self.held = false;
        self.just_pressed = false;
    }

    /// Clear edge flags, keeping the level state. Called once the frame's
    /// input has been consumed.
    pub fn settle(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Per-character movement input for the current frame.
///
/// Digital left/right and the analog axis are independent sources; both may
/// be active in the same frame and both will move the character (processing
/// order: left, right, axis).
///
/// # Example
///
/// ```rust
/// use tapdash_character_controller::prelude::*;
///
/// let mut input = DirectionalInput::default();
/// input.right.press();
/// input.set_axis(0.4);
/// input.jump_just_pressed = true;
/// assert!(input.any_horizontal(0.1));
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct DirectionalInput {
    /// Left directional button.
    pub left: ButtonState,
    /// Right directional button.
    pub right: ButtonState,
    /// Analog horizontal axis in `[-1, 1]`. Magnitudes at or below the
    /// configured deadzone are ignored by the controller.
    pub axis: f32,
    /// Jump button went down this frame. Shared by keyboard and controller.
    pub jump_just_pressed: bool,
}

impl DirectionalInput {
    /// Set the analog axis, clamped to `[-1, 1]`.
    pub fn set_axis(&mut self, value: f32) {
        self.axis = value.clamp(-1.0, 1.0);
    }

    /// Whether any horizontal source is active this frame, given the analog
    /// deadzone.
    pub fn any_horizontal(&self, deadzone: f32) -> bool {
        self.left.held || self.right.held || self.axis.abs() > deadzone
    }

    /// Clear all per-frame edges, keeping held levels and the axis.
    pub fn settle_edges(&mut self) {
        self.left.settle();
        self.right.settle();
        self.jump_just_pressed = false;
    }
}

/// Key bindings consumed by the built-in keyboard/gamepad sampler.
///
/// Remove this resource (or never insert it) to disable the sampler and
/// feed [`DirectionalInput`] from your own systems.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    /// Keys that drive the left directional button.
    pub left: Vec<KeyCode>,
    /// Keys that drive the right directional button.
    pub right: Vec<KeyCode>,
    /// Keys that trigger a jump.
    pub jump: Vec<KeyCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::ArrowLeft, KeyCode::KeyA],
            right: vec![KeyCode::ArrowRight, KeyCode::KeyD],
            jump: vec![KeyCode::Space],
        }
    }
}

impl InputBindings {
    fn chord(keys: &[KeyCode], keyboard: &ButtonInput<KeyCode>) -> ButtonState {
        ButtonState {
            held: keys.iter().any(|&k| keyboard.pressed(k)),
            just_pressed: keys.iter().any(|&k| keyboard.just_pressed(k)),
            just_released: keys.iter().any(|&k| keyboard.just_released(k))
                && !keys.iter().any(|&k| keyboard.pressed(k)),
        }
    }
}

/// Built-in sampler: keyboard buttons plus the first gamepad's left stick.
///
/// A missing or disconnected gamepad reads as axis `0.0`; a host without
/// keyboard input (headless, tests) leaves [`DirectionalInput`] untouched.
pub fn sample_player_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<InputBindings>,
    gamepads: Query<&Gamepad>,
    mut players: Query<&mut DirectionalInput>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    let axis = gamepads
        .iter()
        .next()
        .and_then(|pad| pad.get(GamepadAxis::LeftStickX))
        .unwrap_or(0.0);

    for mut input in &mut players {
        input.left = InputBindings::chord(&bindings.left, &keyboard);
        input.right = InputBindings::chord(&bindings.right, &keyboard);
        input.set_axis(axis);
        input.jump_just_pressed = bindings.jump.iter().any(|&k| keyboard.just_pressed(k));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_held_and_edge() {
        let mut button = ButtonState::default();
        button.press();
        assert!(button.held);
        assert!(button.just_pressed);
        assert!(!button.just_released);
    }

    #[test]
    fn repeated_press_is_not_an_edge() {
        let mut button = ButtonState::default();
        button.press();
        button.settle();
        button.press();
        assert!(button.held);
        assert!(!button.just_pressed);
    }

    #[test]
    fn release_sets_edge_only_when_held() {
        let mut button = ButtonState::default();
        button.release();
        assert!(!button.just_released);

        button.press();
        button.release();
        assert!(!button.held);
        assert!(button.just_released);
    }

    #[test]
    fn settle_keeps_level_state() {
        let mut button = ButtonState::default();
        button.press();
        button.settle();
        assert!(button.held);
        assert!(!button.just_pressed);
        assert!(!button.just_released);
    }

    #[test]
    fn axis_is_clamped() {
        let mut input = DirectionalInput::default();
        input.set_axis(3.0);
        assert_eq!(input.axis, 1.0);
        input.set_axis(-3.0);
        assert_eq!(input.axis, -1.0);
    }

    #[test]
    fn any_horizontal_respects_deadzone() {
        let mut input = DirectionalInput::default();
        input.set_axis(0.05);
        assert!(!input.any_horizontal(0.1));
        input.set_axis(0.2);
        assert!(input.any_horizontal(0.1));

        input.set_axis(0.0);
        input.left.press();
        assert!(input.any_horizontal(0.1));
    }

    #[test]
    fn settle_edges_clears_jump_and_taps() {
        let mut input = DirectionalInput::default();
        input.left.press();
        input.jump_just_pressed = true;
        input.settle_edges();
        assert!(input.left.held);
        assert!(!input.left.just_pressed);
        assert!(!input.jump_just_pressed);
    }
}
