//! Update and post-update traversals.
//!
//! Both phases walk the currently relevant population in hierarchy order:
//! game, then each active screen, its groups, and the in-play entities under
//! it. The omni screen's content is gathered before the selected screen's so
//! normal screen content can override its ordering. Entities come from the
//! spatial in-play query; static entities are skipped unless explicitly
//! flagged always-update.
//!
//! The entity sub-phase of post-update exists for post-physics reactive
//! logic and can be compiled out with the `entity-post-update` feature when
//! a world is too static to need it.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::{Entity, World};
use rustc_hash::FxHashSet;

use crate::components::bounds::{AlwaysUpdate, StaticBody};
use crate::components::simulant::{SimulantKind, SortKey};
use crate::resources::activeview::ActiveView;
use crate::resources::selection::{GameRoot, ScreenSelection};
use crate::resources::signalbus::{Signal, publish};
use crate::resources::stats::FrameStats;
use crate::systems::spatial;

/// The screen a simulant ultimately belongs to, walking up the hierarchy.
pub fn screen_of(world: &World, simulant: Entity) -> Option<Entity> {
    let mut current = simulant;
    loop {
        if world.get::<SimulantKind>(current) == Some(&SimulantKind::Screen) {
            return Some(current);
        }
        current = world.get::<ChildOf>(current)?.parent();
    }
}

fn sorted_by_dispatch(world: &World, mut simulants: Vec<Entity>) -> Vec<Entity> {
    simulants.sort_by(|a, b| SortKey::of(world, *a).dispatch_cmp(&SortKey::of(world, *b)));
    simulants
}

fn groups_of(world: &World, screen: Entity) -> Vec<Entity> {
    let groups = world
        .get::<Children>(screen)
        .map(|children| {
            children
                .iter()
                .copied()
                .filter(|child| world.get::<SimulantKind>(*child) == Some(&SimulantKind::Group))
                .collect()
        })
        .unwrap_or_default();
    sorted_by_dispatch(world, groups)
}

/// Screens gathered this frame: omni first, then the selection.
pub fn active_screens(world: &World) -> Vec<Entity> {
    let selection = world.resource::<ScreenSelection>();
    let mut screens = Vec::new();
    if let Some(omni) = selection.omni {
        screens.push(omni);
    }
    if let Some(selected) = selection.selected {
        if Some(selected) != selection.omni {
            screens.push(selected);
        }
    }
    screens
}

/// Gather the update-relevant population in traversal order.
pub fn gather_in_play(world: &mut World, include_entities: bool) -> Vec<Entity> {
    let play = world.resource::<ActiveView>().play;
    let candidates: FxHashSet<Entity> = if include_entities {
        spatial::query_in_play(world, &play)
    } else {
        FxHashSet::default()
    };

    let mut gathered = vec![world.resource::<GameRoot>().0];
    for screen in active_screens(world) {
        gathered.push(screen);
        gathered.extend(groups_of(world, screen));
        if !include_entities {
            continue;
        }
        let in_play: Vec<Entity> = candidates
            .iter()
            .copied()
            .filter(|entity| {
                world.get::<SimulantKind>(*entity) == Some(&SimulantKind::Entity)
                    && screen_of(world, *entity) == Some(screen)
                    && (world.get::<StaticBody>(*entity).is_none()
                        || world.get::<AlwaysUpdate>(*entity).is_some())
            })
            .collect();
        gathered.extend(sorted_by_dispatch(world, in_play));
    }
    gathered
}

/// Phase 5: publish `Update` across the gathered population.
pub fn update_simulants(world: &mut World) {
    let gathered = gather_in_play(world, true);
    world.resource_mut::<FrameStats>().updated += gathered.len() as u64;
    for simulant in gathered {
        publish(world, simulant, &Signal::Update);
    }
}

/// Phase 6: publish `PostUpdate` for post-physics reactive logic.
pub fn post_update_simulants(world: &mut World) {
    let include_entities = cfg!(feature = "entity-post-update");
    let gathered = gather_in_play(world, include_entities);
    for simulant in gathered {
        publish(world, simulant, &Signal::PostUpdate);
    }
}
