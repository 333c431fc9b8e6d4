//! Simulant kind tag and rendering priority key.
//!
//! The world hierarchy is a closed set of four kinds. Signal subscribers and
//! render submissions are ordered by [`SortKey`]: games sort first, then
//! screens, then groups, then entities by elevation with a horizontal
//! tiebreak. Higher-priority handlers observe events before lower-priority
//! ones and can veto them.

use std::cmp::Ordering;

use bevy_ecs::prelude::{Component, Entity, World};

use crate::components::bounds::Bounds;

/// Closed tag for every addressable object in the world hierarchy.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulantKind {
    Game,
    Screen,
    Group,
    Entity,
}

impl SimulantKind {
    /// Fixed class rank; lower ranks dispatch first.
    pub fn rank(&self) -> u8 {
        match self {
            SimulantKind::Game => 0,
            SimulantKind::Screen => 1,
            SimulantKind::Group => 2,
            SimulantKind::Entity => 3,
        }
    }
}

/// Vertical layering within the entity class. Higher elevations dispatch
/// first and render on top.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Elevation(pub f32);

/// Priority key for event dispatch and render ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub rank: u8,
    pub elevation: f32,
    pub horizon: f32,
}

impl SortKey {
    /// Derive the key for a live simulant. Despawned handles get the lowest
    /// possible priority so stale subscriptions sort last instead of
    /// panicking.
    pub fn of(world: &World, simulant: Entity) -> SortKey {
        let Some(entity_ref) = world.get_entity(simulant).ok() else {
            return SortKey {
                rank: u8::MAX,
                elevation: f32::NEG_INFINITY,
                horizon: f32::INFINITY,
            };
        };
        let rank = entity_ref
            .get::<SimulantKind>()
            .map(|k| k.rank())
            .unwrap_or(u8::MAX);
        let elevation = entity_ref.get::<Elevation>().map(|e| e.0).unwrap_or(0.0);
        let horizon = entity_ref
            .get::<Bounds>()
            .map(|b| b.0.center().x)
            .unwrap_or(0.0);
        SortKey {
            rank,
            elevation,
            horizon,
        }
    }

    /// Dispatch ordering: class rank ascending, elevation descending,
    /// horizontal position ascending as the final tiebreak.
    pub fn dispatch_cmp(&self, other: &SortKey) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.elevation.total_cmp(&self.elevation))
            .then_with(|| self.horizon.total_cmp(&other.horizon))
    }

    /// Draw ordering: back-to-front, so elevation ascending.
    pub fn draw_cmp(&self, other: &SortKey) -> Ordering {
        self.elevation
            .total_cmp(&other.elevation)
            .then_with(|| self.horizon.total_cmp(&other.horizon))
    }
}
