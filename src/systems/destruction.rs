//! Destruction-list drain.
//!
//! Marks accumulate in the `DestructionList` during the frame; this phase
//! drains them one at a time, most-recent first. Destroying a simulant
//! pushes its children onto the list, and the drain re-consults the list
//! after every teardown, so a whole cascade unwinds before any earlier mark
//! proceeds. An explicit worklist instead of unbounded recursion, with a
//! visited set guarding against cycles. Destroying an already-destroyed
//! simulant is a silent no-op.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::{Entity, World};
use log::trace;
use rustc_hash::FxHashSet;

use crate::resources::destruction::DestructionList;
use crate::resources::stats::FrameStats;
use crate::systems::spatial;

/// Mark a simulant for destruction at the next drain.
pub fn mark_for_destruction(world: &mut World, simulant: Entity) {
    world.resource_mut::<DestructionList>().mark(simulant);
}

/// Phase 9: drain the destruction list until no marks remain.
pub fn process_destructions(world: &mut World) {
    let mut visited: FxHashSet<Entity> = FxHashSet::default();
    while let Some(simulant) = world.resource_mut::<DestructionList>().pop() {
        if !visited.insert(simulant) {
            continue; // cycle or duplicate mark
        }
        destroy_now(world, simulant);
    }
}

/// Tear one simulant down: detach and mark its children, unregister it from
/// its spatial index, then despawn the handle.
fn destroy_now(world: &mut World, simulant: Entity) {
    if world.get_entity(simulant).is_err() {
        return; // already destroyed
    }

    // Detach children first so despawning the parent cannot cascade past
    // the spatial unregistration below; they get popped right after this.
    let children: Vec<Entity> = world
        .get::<Children>(simulant)
        .map(|children| children.iter().copied().collect())
        .unwrap_or_default();
    for child in children {
        if let Ok(mut child_mut) = world.get_entity_mut(child) {
            child_mut.remove::<ChildOf>();
        }
        world.resource_mut::<DestructionList>().mark(child);
    }

    // Spatial removal must happen while the handle is still valid.
    if let Some(snapshot) = spatial::snapshot_of(world, simulant) {
        spatial::unregister_spatial(world, simulant, snapshot);
    }

    trace!("destroying simulant {simulant:?}");
    world.despawn(simulant);
    world.resource_mut::<FrameStats>().destroyed += 1;
}
