//! # `tapdash_character_controller`
//!
//! A 2D platformer locomotion controller with double-tap dashing and
//! ground-sensing backend abstraction.
//!
//! This crate converts raw directional input into per-frame character
//! displacement:
//! - Walking, with proportional speed on analog sticks
//! - Double-tap (or full-deflection) triggered dash-into-run acceleration
//! - Multi-jump airborne physics with a capped-acceleration fall
//! - Ground detection with pass-through one-way platforms
//!
//! ## Architecture
//!
//! The controller is **displacement-based**, not force-based: each frame it
//! 1. reads the backend's downward probe result ([`probe::GroundContact`]),
//! 2. advances the [`motion::MotionState`] machine by `(dt, now)`,
//! 3. adds the resulting displacement to the character's `Transform`.
//!
//! Physics engines plug in behind [`backend::LocomotionPhysicsBackend`],
//! which only has to provide the probe raycast (Rapier2D included, manual
//! probing supported).
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use tapdash_character_controller::prelude::*;
//!
//! // Components for a player character entity:
//! let config = LocomotionConfig::player();
//! let state = MotionState::default();
//! let input = DirectionalInput::default();
//! let contact = GroundContact::default();
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod input;
pub mod motion;
pub mod probe;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier2d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{LocomotionPhysicsBackend, ManualProbeBackend};
    pub use crate::config::LocomotionConfig;
    pub use crate::input::{ButtonState, DirectionalInput, InputBindings, TapKey};
    pub use crate::motion::{MotionState, StrideState, VerticalState};
    pub use crate::probe::{GroundContact, GroundHit, Surface, SurfaceKind};
    pub use crate::state::{Airborne, Grounded};
    pub use crate::{LocomotionPlugin, LocomotionSet};

    #[cfg(feature = "rapier2d")]
    pub use crate::rapier::Rapier2dBackend;
}

/// System sets for the per-frame locomotion pipeline, run in the `Update`
/// schedule in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Input sampling into [`input::DirectionalInput`].
    Sample,
    /// Backend ground probing into [`probe::GroundContact`].
    Probe,
    /// The locomotion tick and position displacement.
    Tick,
    /// State marker syncing.
    Sync,
}

/// Main plugin for the locomotion controller.
///
/// Generic over a ground-sensing backend `B` which provides the downward
/// probe raycast.
///
/// Systems run in the `Update` schedule: the controller is frame-driven,
/// with every rate integration scaled by the frame delta and double-tap
/// windows compared against absolute time.
///
/// # Type Parameters
/// - `B`: The ground-sensing backend (e.g. `Rapier2dBackend`)
///
/// # Examples
///
/// With the Rapier2D backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_rapier2d::prelude::*;
/// use tapdash_character_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
///     .add_plugins(LocomotionPlugin::<Rapier2dBackend>::default())
///     .run();
/// ```
pub struct LocomotionPlugin<B: backend::LocomotionPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::LocomotionPhysicsBackend> Default for LocomotionPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::LocomotionPhysicsBackend> Plugin for LocomotionPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::LocomotionConfig>();
        app.register_type::<input::DirectionalInput>();
        app.register_type::<motion::MotionState>();
        app.register_type::<probe::GroundContact>();
        app.register_type::<probe::Surface>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();

        app.init_resource::<input::InputBindings>();

        app.configure_sets(
            Update,
            (
                LocomotionSet::Sample,
                LocomotionSet::Probe,
                LocomotionSet::Tick,
                LocomotionSet::Sync,
            )
                .chain(),
        );

        // Add the ground-sensing backend plugin
        app.add_plugins(B::plugin());

        app.add_systems(
            Update,
            (
                input::sample_player_input
                    .in_set(LocomotionSet::Sample)
                    .run_if(resource_exists::<input::InputBindings>),
                systems::tick_locomotion.in_set(LocomotionSet::Tick),
                systems::sync_state_markers.in_set(LocomotionSet::Sync),
            ),
        );

        // Clear consumed input edges at the end of the frame
        app.add_systems(PostUpdate, systems::settle_input_edges);
    }
}
