//! Spatial index maintenance and the gather queries.
//!
//! The authoritative population is the set of live simulants carrying
//! [`Bounds`] + [`Presence`]; the cached trees are a derived structure. Two
//! paths keep them consistent:
//!
//! 1. Incremental: [`register_spatial`] / [`unregister_spatial`] /
//!    [`move_spatial`] mirror individual changes into the cached trees.
//!    Removal uses a caller-held [`SpatialSnapshot`] of the pre-mutation
//!    values, because the index keeps no authoritative copy.
//! 2. Rebuild: bulk churn bumps [`WorldVersion`], and the next
//!    [`refresh_indexes`] re-derives both trees from scratch by re-inserting
//!    the full live population. Rebuilding is never incremental, which
//!    avoids read-modify-write races with structural churn inside a frame.
//!
//! All mutation happens in pipeline gather steps; phases execute serially,
//! so queries never race a rebuild.

use bevy_ecs::prelude::{Entity, World};
use rustc_hash::FxHashSet;

use crate::components::bounds::{Bounds, Planar, Presence};
use crate::math::Aabb;
use crate::resources::mutantcache::WorldVersion;
use crate::resources::spatial::{Dimensionality, SpatialIndexes, SpatialTree};

/// Pre-mutation copy of a simulant's spatial registration.
#[derive(Debug, Clone, Copy)]
pub struct SpatialSnapshot {
    pub bounds: Aabb,
    pub presence: Presence,
    pub planar: bool,
}

/// Snapshot the current registration values of a simulant, if it has any.
pub fn snapshot_of(world: &World, simulant: Entity) -> Option<SpatialSnapshot> {
    let entity_ref = world.get_entity(simulant).ok()?;
    let bounds = entity_ref.get::<Bounds>()?.0;
    let presence = *entity_ref.get::<Presence>()?;
    let planar = entity_ref.get::<Planar>().is_some();
    Some(SpatialSnapshot {
        bounds,
        presence,
        planar,
    })
}

/// Ensure both cached trees are fresh against the current world version,
/// rebuilding from the full live population where stale.
pub fn refresh_indexes(world: &mut World) {
    let version = world.resource::<WorldVersion>().0;
    {
        let indexes = world.resource::<SpatialIndexes>();
        if indexes.planar.is_fresh(version) && indexes.volumetric.is_fresh(version) {
            return;
        }
    }

    // Re-derive dimensionality/presence/bounds per live object.
    let mut population: Vec<(Entity, Aabb, Presence, bool)> = Vec::new();
    let mut query = world.query::<(Entity, &Bounds, &Presence, Option<&Planar>)>();
    for (entity, bounds, presence, planar) in query.iter(world) {
        population.push((entity, bounds.0, *presence, planar.is_some()));
    }

    let mut indexes = world.resource_mut::<SpatialIndexes>();
    let region = indexes.root_region();
    let (depth_2d, depth_3d) = (indexes.depth_2d, indexes.depth_3d);

    indexes.planar.get_or_rebuild(version, || {
        let mut tree = SpatialTree::new(Dimensionality::Planar, region, depth_2d);
        for (entity, bounds, presence, planar) in &population {
            if *planar {
                tree.insert(bounds, *presence, *entity);
            }
        }
        tree
    });
    indexes.volumetric.get_or_rebuild(version, || {
        let mut tree = SpatialTree::new(Dimensionality::Volumetric, region, depth_3d);
        for (entity, bounds, presence, planar) in &population {
            if !*planar {
                tree.insert(bounds, *presence, *entity);
            }
        }
        tree
    });
}

/// Insert a simulant into the index selected by its current components.
/// Call once at registration, after the components are in place.
pub fn register_spatial(world: &mut World, simulant: Entity) {
    let Some(snapshot) = snapshot_of(world, simulant) else {
        return;
    };
    refresh_indexes(world);
    let mut indexes = world.resource_mut::<SpatialIndexes>();
    let tree = if snapshot.planar {
        indexes.planar.peek_mut()
    } else {
        indexes.volumetric.peek_mut()
    };
    if let Some(tree) = tree {
        tree.insert(&snapshot.bounds, snapshot.presence, simulant);
    }
}

/// Remove a simulant using its pre-mutation snapshot. Removing one that was
/// never inserted is a no-op.
pub fn unregister_spatial(world: &mut World, simulant: Entity, snapshot: SpatialSnapshot) {
    refresh_indexes(world);
    let mut indexes = world.resource_mut::<SpatialIndexes>();
    let tree = if snapshot.planar {
        indexes.planar.peek_mut()
    } else {
        indexes.volumetric.peek_mut()
    };
    if let Some(tree) = tree {
        tree.remove(&snapshot.bounds, snapshot.presence, simulant);
    }
}

/// Mutate a simulant's bounds/presence with the mandatory
/// remove-then-reinsert so the index stays consistent.
pub fn move_spatial(world: &mut World, simulant: Entity, bounds: Aabb, presence: Presence) {
    let Some(snapshot) = snapshot_of(world, simulant) else {
        return;
    };
    unregister_spatial(world, simulant, snapshot);
    if let Ok(mut entity_mut) = world.get_entity_mut(simulant) {
        entity_mut.insert((Bounds(bounds), presence));
    }
    register_spatial(world, simulant);
}

/// In-play gather: everything intersecting the play volume in either index.
pub fn query_in_play(world: &mut World, play: &Aabb) -> FxHashSet<Entity> {
    refresh_indexes(world);
    let indexes = world.resource::<SpatialIndexes>();
    let mut found = FxHashSet::default();
    if let Some(tree) = indexes.planar.peek() {
        found.extend(tree.query_in_play(play));
    }
    if let Some(tree) = indexes.volumetric.peek() {
        found.extend(tree.query_in_play(play));
    }
    found
}

/// In-view gather against the planar index.
pub fn query_in_view_2d(world: &mut World, view: &Aabb) -> FxHashSet<Entity> {
    refresh_indexes(world);
    world
        .resource::<SpatialIndexes>()
        .planar
        .peek()
        .map(|tree| tree.query_active_view(view))
        .unwrap_or_default()
}

/// In-view gather against the volumetric index.
pub fn query_in_view_3d(world: &mut World, view: &Aabb) -> FxHashSet<Entity> {
    refresh_indexes(world);
    world
        .resource::<SpatialIndexes>()
        .volumetric
        .peek()
        .map(|tree| tree.query_active_view(view))
        .unwrap_or_default()
}
