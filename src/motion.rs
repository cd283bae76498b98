//! Core locomotion state machine.
//!
//! [`MotionState`] holds everything about a character that persists between
//! frames, and [`MotionState::tick`] advances it by one frame: ground
//! re-evaluation, airborne integration, double-tap detection, speed
//! resolution for both digital and analog input, and jump handling. The
//! returned displacement is the only output; position is never assigned
//! absolutely.
//!
//! The tick is a plain function of `(config, input, probe result, dt, now)`
//! so it can be driven by the Bevy frame loop, a replay, or a test harness.
//! `dt` feeds every rate integration; `now` (absolute time) feeds only the
//! double-tap timestamp comparisons.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::input::{ButtonState, DirectionalInput, TapKey};
use crate::probe::GroundHit;

/// Analog deflection above which a sample counts as running intent.
const RUN_DEFLECTION: f32 = 0.9;

/// Vertical half of the locomotion state machine.
///
/// The jump counter travels with both variants so that
/// `0 <= jumps_used <= num_jumps` holds by construction; landing resets it.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub enum VerticalState {
    /// Standing on a supporting surface.
    Grounded {
        /// Jumps consumed since the last landing. Zeroed every grounded
        /// frame.
        jumps_used: u32,
    },
    /// In the air, either rising from a jump or falling.
    Airborne {
        /// Jumps consumed since the last landing.
        jumps_used: u32,
        /// Signed vertical velocity; positive is ascending.
        velocity: f32,
    },
}

impl Default for VerticalState {
    fn default() -> Self {
        Self::Grounded { jumps_used: 0 }
    }
}

/// Horizontal half of the locomotion state machine.
///
/// `Dash` and `Run` are the two running sub-states: a double tap (or a
/// sustained near-full analog deflection) opens `Dash`, which ramps speed up
/// to the dash peak and then settles into `Run`.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrideState {
    /// Not running.
    #[default]
    Walk,
    /// Running, still accelerating toward the dash peak.
    Dash,
    /// Running at sustained speed.
    Run,
}

/// Double-tap detection memory.
///
/// Every qualifying input edge overwrites these; they are only ever read
/// within the double-tap window.
#[derive(Reflect, Debug, Clone, Copy, Default)]
pub struct TapMemory {
    last_key: Option<TapKey>,
    last_key_down_time: f32,
    last_axis_time: f32,
    last_axis_magnitude: f32,
}

/// Per-character locomotion state, advanced once per frame by
/// [`MotionState::tick`].
///
/// Created at spawn with [`Default`] (grounded, standing still) and owned
/// exclusively by its character; nothing here is shared or persisted.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MotionState {
    vertical: VerticalState,
    stride: StrideState,
    current_speed: f32,
    taps: TapMemory,
}

impl MotionState {
    /// Whether the character is standing on a supporting surface.
    pub fn is_grounded(&self) -> bool {
        matches!(self.vertical, VerticalState::Grounded { .. })
    }

    /// Whether the character is airborne.
    pub fn is_airborne(&self) -> bool {
        !self.is_grounded()
    }

    /// Whether the character is in either running sub-state.
    pub fn is_running(&self) -> bool {
        matches!(self.stride, StrideState::Dash | StrideState::Run)
    }

    /// Whether the character is in the dash phase of a run.
    pub fn is_dashing(&self) -> bool {
        self.stride == StrideState::Dash
    }

    /// Current horizontal speed magnitude.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Signed vertical velocity. Grounded characters report `0.0`.
    pub fn vertical_velocity(&self) -> f32 {
        match self.vertical {
            VerticalState::Grounded { .. } => 0.0,
            VerticalState::Airborne { velocity, .. } => velocity,
        }
    }

    /// Jumps consumed since the last landing.
    pub fn jumps_used(&self) -> u32 {
        match self.vertical {
            VerticalState::Grounded { jumps_used } => jumps_used,
            VerticalState::Airborne { jumps_used, .. } => jumps_used,
        }
    }

    /// Current stride sub-state.
    pub fn stride(&self) -> StrideState {
        self.stride
    }

    /// Raw magnitude of the last analog sample above the deadzone.
    pub fn last_axis_magnitude(&self) -> f32 {
        self.taps.last_axis_magnitude
    }

    /// Advance the state by one frame and return the displacement to apply
    /// to the character's position.
    ///
    /// `ground` is this frame's probe result, `dt` the elapsed time since
    /// the previous tick, `now` the absolute (monotonic) time used for
    /// double-tap comparisons.
    pub fn tick(
        &mut self,
        config: &LocomotionConfig,
        input: &DirectionalInput,
        ground: Option<&GroundHit>,
        dt: f32,
        now: f32,
    ) -> Vec2 {
        let mut displacement = Vec2::ZERO;

        // Re-evaluate support with the velocity from the previous frame, so
        // a platform hit while still ascending does not snap the character.
        let supported = ground.map_or(false, |hit| hit.supports(self.vertical_velocity()));
        if supported {
            self.vertical = VerticalState::Grounded { jumps_used: 0 };
        } else {
            let (jumps_used, velocity) = match self.vertical {
                VerticalState::Grounded { jumps_used } => (jumps_used, 0.0),
                VerticalState::Airborne {
                    jumps_used,
                    velocity,
                } => (jumps_used, velocity),
            };
            let velocity = move_towards(velocity, -config.gravity, config.fall_ramp_rate() * dt);
            self.vertical = VerticalState::Airborne {
                jumps_used,
                velocity,
            };
            displacement.y += velocity * dt;
        }

        // Horizontal sources fire independently; when several are active in
        // one frame their displacements add and the later source's state
        // mutations win.
        let mut moving = false;
        displacement.x +=
            self.digital_stride(TapKey::Left, -1.0, input.left, config, dt, now, &mut moving);
        displacement.x +=
            self.digital_stride(TapKey::Right, 1.0, input.right, config, dt, now, &mut moving);
        displacement.x += self.analog_stride(input.axis, config, dt, now, &mut moving);

        if input.jump_just_pressed && self.jumps_used() < config.num_jumps {
            displacement.y += self.jump(config, dt);
        }

        // Nothing fired: dead stop, no deceleration ramp.
        if !moving {
            self.stride = StrideState::Walk;
            self.current_speed = 0.0;
        }

        displacement
    }

    /// One digital directional input: down-edge double-tap detection,
    /// held-frame speed resolution and displacement, up-edge run clearing.
    #[allow(clippy::too_many_arguments)]
    fn digital_stride(
        &mut self,
        key: TapKey,
        direction: f32,
        button: ButtonState,
        config: &LocomotionConfig,
        dt: f32,
        now: f32,
        moving: &mut bool,
    ) -> f32 {
        if button.just_pressed {
            let double_tap = self.taps.last_key == Some(key)
                && now - self.taps.last_key_down_time < config.double_tap_window
                && !self.is_airborne();
            self.stride = if double_tap {
                StrideState::Dash
            } else {
                StrideState::Walk
            };

            // The edge is recorded even when it does not trigger, so it can
            // seed the next window.
            self.taps.last_key = Some(key);
            self.taps.last_key_down_time = now;
        }

        let mut dx = 0.0;
        if button.held {
            *moving = true;
            self.resolve_speed(config, 1.0, dt);
            dx = direction * self.current_speed * dt;
        }

        // Releasing drops the run; the ramped speed itself is not reset.
        if button.just_released {
            self.stride = StrideState::Walk;
        }

        dx
    }

    /// The analog axis input: deadzone remap, deflection-latched running,
    /// speed resolution and displacement.
    fn analog_stride(
        &mut self,
        axis: f32,
        config: &LocomotionConfig,
        dt: f32,
        now: f32,
        moving: &mut bool,
    ) -> f32 {
        let magnitude = axis.abs();
        if magnitude <= config.controller_deadzone {
            // Within the deadzone this source does not fire at all; a full
            // stop then comes from the no-input branch of the tick.
            return 0.0;
        }
        *moving = true;

        let adjusted = inverse_lerp(config.controller_deadzone, 1.0, magnitude);
        let within_window = now - self.taps.last_axis_time < config.double_tap_window;

        if adjusted > RUN_DEFLECTION && !self.is_airborne() && (within_window || self.is_running())
        {
            // Near-full deflection latches a run and then sustains it; the
            // dash phase re-opens whenever speed has fallen below run speed.
            self.stride = match self.stride {
                StrideState::Dash => StrideState::Dash,
                _ if self.current_speed < config.run_speed => StrideState::Dash,
                _ => StrideState::Run,
            };
        } else if adjusted <= RUN_DEFLECTION {
            self.stride = StrideState::Walk;
        }

        self.resolve_speed(config, adjusted, dt);
        let dx = axis.signum() * adjusted * self.current_speed * dt;

        self.taps.last_axis_time = now;
        self.taps.last_axis_magnitude = magnitude;

        dx
    }

    /// Shared speed resolver for both input paths. Digital input passes
    /// magnitude `1.0`; analog passes its adjusted magnitude, which scales
    /// the grounded walk row proportionally.
    fn resolve_speed(&mut self, config: &LocomotionConfig, magnitude: f32, dt: f32) {
        match (self.stride, self.is_airborne()) {
            (StrideState::Dash, false) => {
                if self.current_speed < config.dash_speed {
                    self.current_speed =
                        move_towards(self.current_speed, config.dash_speed, config.dash_accel * dt);
                    if self.current_speed >= config.dash_speed {
                        debug!("dash peaked at {}", self.current_speed);
                        self.stride = StrideState::Run;
                    }
                }
            }
            (StrideState::Run, false) => {
                self.current_speed =
                    move_towards(self.current_speed, config.run_speed, config.dash_accel * dt);
            }
            (StrideState::Dash | StrideState::Run, true) => {
                self.current_speed = config.run_speed;
            }
            (StrideState::Walk, true) => {
                self.current_speed = config.air_speed;
            }
            (StrideState::Walk, false) => {
                self.current_speed = config.walk_speed * magnitude;
            }
        }
    }

    /// Consume one jump: set jump velocity, go airborne, and apply the
    /// trigger frame's own decay step and displacement.
    fn jump(&mut self, config: &LocomotionConfig, dt: f32) -> f32 {
        let jumps_used = self.jumps_used() + 1;
        let mut velocity = config.jump_velocity;
        // The trigger frame already decays the fresh velocity one bounded
        // step toward zero before the position integration.
        if velocity > 0.0 {
            velocity = move_towards(velocity, 0.0, config.fall_ramp_rate() * dt);
        }
        self.vertical = VerticalState::Airborne {
            jumps_used,
            velocity,
        };
        debug!("jump {} of {}", jumps_used, config.num_jumps);
        velocity * dt
    }
}

/// Bounded-rate interpolation: step `current` toward `target` by at most
/// `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Remap `value` from `[a, b]` to `[0, 1]`, clamped.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}
