//! Spatial registration attributes.
//!
//! Entities that participate in spatial culling carry a [`Bounds`] volume, a
//! [`Presence`] classification, and optionally the [`Planar`] marker selecting
//! the 2D index instead of the 3D one. The index keeps no authoritative copy
//! of these values: whoever mutates them must snapshot the old values first
//! and go through `systems::spatial::move_spatial` so the index stays
//! consistent (remove with the pre-mutation snapshot, reinsert with the new
//! values).

use bevy_ecs::prelude::Component;

use crate::math::Aabb;

/// World-space bounding volume of a simulant.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bounds(pub Aabb);

/// How an object participates in spatial culling.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// Never culled; lives in the index fallback set and is returned by
    /// every query.
    Omnipresent,
    /// Indexed normally at the leaves its bounds intersect.
    #[default]
    Enclosed,
    /// Far/background object: indexed, but always part of 3D active-view
    /// results regardless of the view volume.
    Exposed,
    /// Stand-in for a distant object, treated like [`Presence::Exposed`]
    /// for visibility.
    Imposter,
}

impl Presence {
    /// Exposed and imposter objects bypass the view-volume test in 3D.
    pub fn always_in_view(&self) -> bool {
        matches!(self, Presence::Exposed | Presence::Imposter)
    }
}

/// Marker selecting the 2D spatial index. Absent means the 3D index.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Planar;

/// Static simulants are skipped by the per-frame update/render traversals
/// unless they also carry [`AlwaysUpdate`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct StaticBody;

/// Opt a static simulant back into the update traversal.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AlwaysUpdate;

/// Whether the simulant is submitted to the renderer.
#[derive(Component, Debug, Clone, Copy)]
pub struct Visible(pub bool);

impl Default for Visible {
    fn default() -> Self {
        Visible(true)
    }
}
