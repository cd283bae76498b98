//! Ground probe result structures.
//!
//! The downward probe is performed by the active physics backend once per
//! frame; these types hold its result and classify whether the surface can
//! support the character.

use bevy::prelude::*;

/// Classification of a surface hit by the downward probe.
///
/// Attach a [`Surface`] component to level colliders to tag them. Anything
/// the probe hits that carries no tag is treated as [`SurfaceKind::Other`]
/// and never supports the character.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    /// Solid ground. Always supports the character.
    Floor,
    /// One-way platform. Supports the character only while its vertical
    /// velocity is non-positive, so an ascending character passes through.
    Platform,
    /// Anything else. Never supports the character.
    #[default]
    Other,
}

/// Tag component for level geometry the ground probe can classify.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Surface {
    /// How the probe should treat this collider.
    pub kind: SurfaceKind,
}

impl Surface {
    /// Tag a collider as solid ground.
    pub fn floor() -> Self {
        Self {
            kind: SurfaceKind::Floor,
        }
    }

    /// Tag a collider as a one-way platform.
    pub fn platform() -> Self {
        Self {
            kind: SurfaceKind::Platform,
        }
    }
}

/// Result of a downward probe raycast.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World position of the hit point.
    pub point: Vec2,
    /// Classification of the surface that was hit.
    pub surface: SurfaceKind,
    /// Entity that was hit, if the backend can report one.
    pub entity: Option<Entity>,
}

impl GroundHit {
    /// Create a hit result without an entity reference.
    pub fn new(distance: f32, point: Vec2, surface: SurfaceKind) -> Self {
        Self {
            distance,
            point,
            surface,
            entity: None,
        }
    }

    /// Attach the hit entity.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Whether this surface supports a character with the given vertical
    /// velocity. Platforms only support a character that is not ascending.
    pub fn supports(&self, vertical_velocity: f32) -> bool {
        match self.surface {
            SurfaceKind::Floor => true,
            SurfaceKind::Platform => vertical_velocity <= 0.0,
            SurfaceKind::Other => false,
        }
    }
}

/// Per-character probe result, refreshed every frame by the backend.
///
/// `None` means the ray hit nothing within range, which always reads as
/// not grounded. Hosts using [`ManualProbeBackend`](crate::backend::ManualProbeBackend)
/// write this component themselves.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct GroundContact {
    /// The most recent probe hit, if any.
    pub hit: Option<GroundHit>,
}

impl GroundContact {
    /// Whether the probe hit anything at all (regardless of surface kind).
    pub fn detected(&self) -> bool {
        self.hit.is_some()
    }

    /// Whether the contact supports a character with the given vertical
    /// velocity. No hit means no support.
    pub fn supports(&self, vertical_velocity: f32) -> bool {
        self.hit.map_or(false, |hit| hit.supports(vertical_velocity))
    }
}
