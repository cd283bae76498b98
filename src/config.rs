//! Locomotion configuration component.
//!
//! All tunables for walking, double-tap dashing, jumping and the ground
//! probe live here. The core logic never mutates this component; it is
//! per-character, immutable-per-session configuration.

use bevy::prelude::*;

/// Tunable parameters for a locomotion-controlled character.
///
/// Speeds are in world units per second, accelerations in units per second
/// squared, times in seconds. Values are taken as-is: out-of-range
/// configuration (negative speeds, zero gravity) is a caller error and the
/// resulting behavior is unspecified.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct LocomotionConfig {
    // === Horizontal movement ===
    /// Grounded speed while not running. Analog input scales walking speed
    /// by its adjusted magnitude; digital input always walks at full speed.
    pub walk_speed: f32,

    /// Sustained speed while running, after the dash phase has settled.
    pub run_speed: f32,

    /// Peak speed of the dash phase that opens a run.
    pub dash_speed: f32,

    /// Ramp rate used both to reach `dash_speed` and to settle back toward
    /// `run_speed`.
    pub dash_accel: f32,

    /// Horizontal speed while airborne and not running.
    pub air_speed: f32,

    // === Jumping and falling ===
    /// Vertical velocity set at the start of every jump.
    pub jump_velocity: f32,

    /// Terminal fall speed; airborne vertical velocity ramps toward
    /// `-gravity` at `gravity * char_weight` per second.
    pub gravity: f32,

    /// Fall-ramp multiplier. Heavier characters reach terminal speed sooner.
    pub char_weight: f32,

    /// Total jumps available before the character must touch ground again.
    /// The second and later jumps fire mid-air.
    pub num_jumps: u32,

    // === Double-tap detection ===
    /// Maximum interval between two taps of the same direction (or between
    /// consecutive qualifying analog samples) that still triggers a run.
    pub double_tap_window: f32,

    /// Analog deflections at or below this magnitude are ignored entirely.
    pub controller_deadzone: f32,

    // === Ground probe geometry ===
    /// How far below the character origin the probe ray starts.
    pub probe_drop: f32,

    /// Length of the downward probe ray.
    pub probe_length: f32,

    // === Reserved ===
    /// Stopping power. Accepted but currently unread: idle characters stop
    /// dead rather than decelerating.
    pub friction: f32,

    /// Accepted but currently unread fast-fall speed.
    pub fast_fall: f32,

    /// Accepted but currently unread crouch-walk speed.
    pub crouch_walk_speed: f32,

    /// Accepted but currently unread crouch-walk toggle.
    pub crouch_walk: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            // Horizontal movement
            walk_speed: 7.0,
            run_speed: 10.0,
            dash_speed: 17.0,
            dash_accel: 80.0,
            air_speed: 5.0,

            // Jumping and falling
            jump_velocity: 25.0,
            gravity: 15.0,
            char_weight: 3.0,
            num_jumps: 2,

            // Double-tap detection
            double_tap_window: 0.3,
            controller_deadzone: 0.1,

            // Ground probe geometry
            probe_drop: 0.5,
            probe_length: 0.3,

            // Reserved
            friction: 3.0,
            fast_fall: 7.0,
            crouch_walk_speed: 2.0,
            crouch_walk: false,
        }
    }
}

impl LocomotionConfig {
    /// Create a config with the stock defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config tuned for a snappy player character: quicker dash
    /// ramp and a third jump.
    pub fn player() -> Self {
        Self {
            dash_accel: 120.0,
            num_jumps: 3,
            ..default()
        }
    }

    /// Builder: set walking and running speeds together.
    pub fn with_ground_speeds(mut self, walk: f32, run: f32) -> Self {
        self.walk_speed = walk;
        self.run_speed = run;
        self
    }

    /// Builder: set the dash peak speed and ramp rate.
    pub fn with_dash(mut self, speed: f32, accel: f32) -> Self {
        self.dash_speed = speed;
        self.dash_accel = accel;
        self
    }

    /// Builder: set airborne horizontal speed.
    pub fn with_air_speed(mut self, speed: f32) -> Self {
        self.air_speed = speed;
        self
    }

    /// Builder: set jump velocity.
    pub fn with_jump_velocity(mut self, velocity: f32) -> Self {
        self.jump_velocity = velocity;
        self
    }

    /// Builder: set gravity and character weight together, since they both
    /// feed the fall ramp rate.
    pub fn with_fall(mut self, gravity: f32, char_weight: f32) -> Self {
        self.gravity = gravity;
        self.char_weight = char_weight;
        self
    }

    /// Builder: set the jump budget.
    pub fn with_num_jumps(mut self, jumps: u32) -> Self {
        self.num_jumps = jumps;
        self
    }

    /// Builder: set the double-tap time window.
    pub fn with_double_tap_window(mut self, window: f32) -> Self {
        self.double_tap_window = window;
        self
    }

    /// Builder: set the analog deadzone.
    pub fn with_deadzone(mut self, deadzone: f32) -> Self {
        self.controller_deadzone = deadzone;
        self
    }

    /// Builder: set the probe ray geometry (origin drop and ray length).
    pub fn with_probe(mut self, drop: f32, length: f32) -> Self {
        self.probe_drop = drop;
        self.probe_length = length;
        self
    }

    /// The rate at which airborne vertical velocity approaches its target.
    #[inline]
    pub fn fall_ramp_rate(&self) -> f32 {
        self.gravity * self.char_weight
    }
}
