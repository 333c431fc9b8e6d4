//! Simulation time resource.
//!
//! `tick` is the logic tick counter the tasklet queue and screen transitions
//! compare against; it advances exactly once per frame, in the final pipeline
//! phase. `delta` is the scaled frame delta in seconds.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Scaled elapsed seconds since startup.
    pub elapsed: f64,
    /// Scaled delta of the current frame in seconds.
    pub delta: f32,
    pub time_scale: f32,
    /// Logic tick counter, advanced once per frame.
    pub tick: u64,
    /// Configured logic updates per second.
    pub tick_rate: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            tick: 0,
            tick_rate: 60,
        }
    }
}

impl WorldTime {
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
