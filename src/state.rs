//! State marker components.
//!
//! Mirrors of the locomotion state as marker components, maintained by the
//! controller systems so host game logic can use them in query filters.

use bevy::prelude::*;

/// Marker component indicating the character is grounded.
///
/// Added when the ground probe finds a supporting surface; removed when the
/// character becomes airborne. Mutually exclusive with [`Airborne`].
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use tapdash_character_controller::prelude::*;
///
/// fn grounded_characters(query: Query<Entity, With<Grounded>>) {
///     for _entity in &query {
///         // safe to play footstep sounds, spawn dust, ...
///     }
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
///
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
