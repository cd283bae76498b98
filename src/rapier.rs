//! Rapier2D ground-sensing backend.
//!
//! This module provides the ground probe for Bevy Rapier2D.
//! Enable with the `rapier2d` feature.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::backend::LocomotionPhysicsBackend;
use crate::config::LocomotionConfig;
use crate::probe::{GroundContact, GroundHit, Surface, SurfaceKind};
use crate::LocomotionSet;

/// Rapier2D backend for the locomotion controller.
///
/// Casts the downward probe ray through `RapierContext` and classifies the
/// hit collider's [`Surface`] tag.
///
/// # Example
///
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
pub struct Rapier2dBackend;

impl LocomotionPhysicsBackend for Rapier2dBackend {
    fn plugin() -> impl Plugin {
        Rapier2dProbePlugin
    }
}

/// Plugin that schedules the Rapier probe system.
pub struct Rapier2dProbePlugin;

impl Plugin for Rapier2dProbePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, rapier_ground_probe.in_set(LocomotionSet::Probe));
    }
}

/// Cast the downward probe ray for every character and record the closest
/// hit, classified by the hit entity's [`Surface`] tag.
///
/// Characters are excluded from their own cast; sensors never register.
/// An untagged hit reads as [`SurfaceKind::Other`], which never supports
/// the character.
fn rapier_ground_probe(
    rapier_context: ReadRapierContext,
    surfaces: Query<&Surface>,
    mut characters: Query<(Entity, &GlobalTransform, &LocomotionConfig, &mut GroundContact)>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, mut contact) in &mut characters {
        let origin = transform.translation().xy() + Vec2::NEG_Y * config.probe_drop;

        let filter = QueryFilter::default()
            .exclude_rigid_body(entity)
            .exclude_sensors();

        contact.hit = context
            .cast_ray(origin, Vec2::NEG_Y, config.probe_length, true, filter)
            .map(|(hit_entity, toi)| {
                let surface = surfaces
                    .get(hit_entity)
                    .map(|s| s.kind)
                    .unwrap_or(SurfaceKind::Other);
                GroundHit::new(toi, origin + Vec2::NEG_Y * toi, surface).with_entity(hit_entity)
            });
    }
}
