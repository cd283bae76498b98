//! Ground-sensing backend abstraction.
//!
//! The locomotion core needs exactly one physics operation per frame: a
//! downward raycast classified against [`Surface`](crate::probe::Surface)
//! tags. This module defines the trait a physics backend implements to
//! provide it, so physics engines can be swapped (Rapier2D included, custom
//! or manual probing supported).

use bevy::prelude::*;

/// Trait for ground-sensing backend implementations.
///
/// A backend's [`plugin`](LocomotionPhysicsBackend::plugin) must register a
/// system in [`LocomotionSet::Probe`](crate::LocomotionSet::Probe) that
/// refreshes every character's [`GroundContact`](crate::probe::GroundContact)
/// each frame: cast a ray of `config.probe_length` straight down from
/// `config.probe_drop` below the character origin, excluding the character
/// itself, and classify the hit entity's `Surface` tag (no tag reads as
/// [`SurfaceKind::Other`](crate::probe::SurfaceKind::Other)).
///
/// For the reference implementation see the `rapier` module's
/// `Rapier2dBackend`.
pub trait LocomotionPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend's probe system.
    fn plugin() -> impl Plugin;
}

/// Backend for hosts that perform their own ground sensing.
///
/// Registers nothing: `GroundContact` keeps whatever the host (or a test)
/// last wrote into it. A contact that is never written stays `None`, which
/// reads as never grounded.
pub struct ManualProbeBackend;

impl LocomotionPhysicsBackend for ManualProbeBackend {
    fn plugin() -> impl Plugin {
        ManualProbePlugin
    }
}

/// Empty plugin for [`ManualProbeBackend`].
pub struct ManualProbePlugin;

impl Plugin for ManualProbePlugin {
    fn build(&self, _app: &mut App) {}
}
