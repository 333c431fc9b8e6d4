//! Time advance.
//!
//! The frame delta is applied at the top of the frame (scheduling prologue);
//! the logic tick advances in the final phase, so every phase of a frame
//! observes one consistent tick value.

use bevy_ecs::prelude::World;

use crate::resources::worldtime::WorldTime;

/// Apply the frame delta, scaled by the configured time scale.
pub fn begin_frame_time(world: &mut World, dt: f32) {
    let mut time = world.resource_mut::<WorldTime>();
    let scaled = dt * time.time_scale;
    time.delta = scaled;
    time.elapsed += scaled as f64;
}

/// Phase 14: advance the logic tick.
pub fn advance_tick(world: &mut World) {
    world.resource_mut::<WorldTime>().tick += 1;
}
