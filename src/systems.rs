//! Controller systems.
//!
//! The per-frame orchestration: feed the probe result and the frame's input
//! through [`MotionState::tick`], apply the returned displacement to the
//! transform, and keep the state marker components in sync.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::input::DirectionalInput;
use crate::motion::MotionState;
use crate::probe::GroundContact;
use crate::state::{Airborne, Grounded};

/// Advance every character by one frame.
///
/// Rate integration uses the frame delta; double-tap comparisons use the
/// virtual elapsed time. The displacement is applied additively; the
/// character's position is never assigned an absolute value.
pub fn tick_locomotion(
    time: Res<Time>,
    mut characters: Query<(
        &LocomotionConfig,
        &DirectionalInput,
        &GroundContact,
        &mut MotionState,
        &mut Transform,
    )>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (config, input, contact, mut state, mut transform) in &mut characters {
        let displacement = state.tick(config, input, contact.hit.as_ref(), dt, now);
        transform.translation += displacement.extend(0.0);
    }
}

/// Sync the [`Grounded`]/[`Airborne`] marker components with the motion
/// state after each tick.
pub fn sync_state_markers(
    mut commands: Commands,
    characters: Query<(Entity, &MotionState, Has<Grounded>, Has<Airborne>)>,
) {
    for (entity, state, has_grounded, has_airborne) in &characters {
        if state.is_grounded() {
            if !has_grounded {
                commands.entity(entity).insert(Grounded).remove::<Airborne>();
            }
        } else if !has_airborne {
            commands.entity(entity).insert(Airborne).remove::<Grounded>();
        }
    }
}

/// Clear per-frame input edges once the frame has been consumed.
///
/// The built-in sampler rewrites edges every frame anyway; this keeps hosts
/// that feed [`DirectionalInput`] by hand from re-triggering taps and jumps
/// on stale edges.
pub fn settle_input_edges(mut inputs: Query<&mut DirectionalInput>) {
    for mut input in &mut inputs {
        input.settle_edges();
    }
}
