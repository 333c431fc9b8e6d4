//! World bootstrap and spawn helpers.
//!
//! [`bootstrap_world`] builds a `World` with every engine resource installed
//! and the root Game simulant spawned. The spawn helpers wire new simulants
//! into the hierarchy, register them with the spatial indexes, and keep the
//! kind tags consistent so the gather steps never see a malformed tree.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::message::Messages;
use bevy_ecs::prelude::{Entity, World};
use log::info;

use crate::components::bounds::{Bounds, Planar, Presence, Visible};
use crate::components::group::Group;
use crate::components::screen::Screen;
use crate::components::simulant::{Elevation, SimulantKind};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::math::Aabb;
use crate::resources::activeview::ActiveView;
use crate::resources::backends::Backends;
use crate::resources::config::EngineConfig;
use crate::resources::destruction::DestructionList;
use crate::resources::liveness::Liveness;
use crate::resources::mutantcache::WorldVersion;
use crate::resources::selection::{GameRoot, ScreenSelection};
use crate::resources::signalbus::SignalBus;
use crate::resources::spatial::SpatialIndexes;
use crate::resources::stats::FrameStats;
use crate::resources::tasklets::TaskletQueue;
use crate::resources::worldtime::WorldTime;
use crate::systems::spatial::register_spatial;
use crate::systems::transition::PlayingSong;

/// Build a world from the configuration and the injected backends.
pub fn bootstrap_world(config: EngineConfig, backends: Backends) -> World {
    let mut world = World::new();

    world.insert_resource(
        WorldTime::default()
            .with_tick_rate(config.tick_rate)
            .with_time_scale(config.time_scale),
    );
    world.insert_resource(Liveness::default());
    world.insert_resource(WorldVersion::default());
    world.insert_resource(SpatialIndexes::new(
        config.spatial_extent,
        config.spatial_depth_2d,
        config.spatial_depth_3d,
    ));
    world.insert_resource(ActiveView::covering(config.spatial_extent));
    world.insert_resource(TaskletQueue::default());
    world.insert_resource(ScreenSelection::default());
    world.insert_resource(DestructionList::default());
    world.insert_resource(SignalBus::new());
    world.insert_resource(PlayingSong::default());
    world.insert_resource(FrameStats::default());
    world.insert_resource(Messages::<AudioCmd>::default());
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(backends);
    world.insert_resource(config);

    let root = world.spawn(SimulantKind::Game).id();
    world.insert_resource(GameRoot(root));
    info!("world bootstrapped, game root {root:?}");
    world
}

/// Spawn a screen under the game root.
pub fn spawn_screen(world: &mut World, screen: Screen) -> Entity {
    let root = world.resource::<GameRoot>().0;
    world
        .spawn((SimulantKind::Screen, screen, ChildOf(root)))
        .id()
}

/// Spawn a named group under `screen`.
pub fn spawn_group(world: &mut World, screen: Entity, name: impl Into<String>) -> Entity {
    world
        .spawn((SimulantKind::Group, Group::new(name), ChildOf(screen)))
        .id()
}

/// Spawn descriptor for a leaf entity.
#[derive(Debug, Clone)]
pub struct EntitySpawn {
    pub bounds: Aabb,
    pub presence: Presence,
    pub planar: bool,
    pub elevation: f32,
    pub visible: bool,
}

impl EntitySpawn {
    pub fn new(bounds: Aabb) -> Self {
        EntitySpawn {
            bounds,
            presence: Presence::default(),
            planar: false,
            elevation: 0.0,
            visible: true,
        }
    }

    pub fn planar(mut self) -> Self {
        self.planar = true;
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }
}

/// Spawn a leaf entity under `parent` (a group or a screen) and register it
/// with the spatial index matching its dimensionality.
pub fn spawn_entity(world: &mut World, parent: Entity, spawn: EntitySpawn) -> Entity {
    let entity = world
        .spawn((
            SimulantKind::Entity,
            Bounds(spawn.bounds),
            spawn.presence,
            Elevation(spawn.elevation),
            Visible(spawn.visible),
            ChildOf(parent),
        ))
        .id();
    if spawn.planar {
        world.entity_mut(entity).insert(Planar);
    }
    register_spatial(world, entity);
    entity
}
