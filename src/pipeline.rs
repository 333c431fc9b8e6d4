//! The frame pipeline.
//!
//! Top-level scheduler sequencing every phase of a frame in fixed order.
//! Liveness is checked after every phase: once Dead, the remaining phases of
//! the same frame are skipped, [`FramePipeline::run_frame`] returns `false`,
//! and the caller must not schedule another frame. No phase is interrupted
//! mid-execution; early exit is strictly cooperative.
//!
//! Host integration points are three injected hooks (pre-process,
//! per-process, post-process) rather than reach-around function pointers;
//! a host that needs none leaves them unset.

use bevy_ecs::prelude::World;
use log::debug;

use crate::resources::liveness::Liveness;
use crate::resources::stats::FrameStats;
use crate::systems::{
    audio, destruction, input, physics, render, tasklets, time, transition, update,
};

/// Host-injected frame hook.
pub type HostHook = Box<dyn FnMut(&mut World) + Send + Sync>;

/// Fixed-order per-frame scheduler.
#[derive(Default)]
pub struct FramePipeline {
    pre_process: Option<HostHook>,
    per_process: Option<HostHook>,
    post_process: Option<HostHook>,
}

impl FramePipeline {
    pub fn new() -> Self {
        FramePipeline::default()
    }

    /// Hook run before anything else in the frame.
    pub fn with_pre_process(
        mut self,
        hook: impl FnMut(&mut World) + Send + Sync + 'static,
    ) -> Self {
        self.pre_process = Some(Box::new(hook));
        self
    }

    /// Hook run between post-update and the tasklet drain.
    pub fn with_per_process(
        mut self,
        hook: impl FnMut(&mut World) + Send + Sync + 'static,
    ) -> Self {
        self.per_process = Some(Box::new(hook));
        self
    }

    /// Hook run after destruction processing, before render.
    pub fn with_post_process(
        mut self,
        hook: impl FnMut(&mut World) + Send + Sync + 'static,
    ) -> Self {
        self.post_process = Some(Box::new(hook));
        self
    }

    /// Execute one frame. Returns `false` when liveness went Dead, in which
    /// case the next frame must not be scheduled.
    pub fn run_frame(&mut self, world: &mut World, dt: f32) -> bool {
        if !alive(world, "frame start") {
            return false;
        }
        time::begin_frame_time(world, dt);

        // (1) pre-process hook
        if let Some(hook) = self.pre_process.as_mut() {
            hook(world);
        }
        if !alive(world, "pre-process") {
            return false;
        }

        // (2) screen transition advance
        transition::advance_screen_transitions(world);
        if !alive(world, "transition") {
            return false;
        }

        // (3) input polling and dispatch
        input::poll_input(world);
        if !alive(world, "input") {
            return false;
        }

        // (4) physics integration bridge
        physics::integrate_physics(world);
        if !alive(world, "physics") {
            return false;
        }

        // (5) simulation update
        update::update_simulants(world);
        if !alive(world, "update") {
            return false;
        }

        // (6) post-update
        update::post_update_simulants(world);
        if !alive(world, "post-update") {
            return false;
        }

        // (7) per-process hook
        if let Some(hook) = self.per_process.as_mut() {
            hook(world);
        }
        if !alive(world, "per-process") {
            return false;
        }

        // (8) tasklet drain
        tasklets::process_tasklets(world);
        if !alive(world, "tasklets") {
            return false;
        }

        // (9) destruction drain
        destruction::process_destructions(world);
        if !alive(world, "destruction") {
            return false;
        }

        // (10) post-process hook
        if let Some(hook) = self.post_process.as_mut() {
            hook(world);
        }
        if !alive(world, "post-process") {
            return false;
        }

        // (11) render gather and submission
        render::render_frame(world);
        if !alive(world, "render") {
            return false;
        }

        // (12) audio pump
        audio::pump_audio(world);
        if !alive(world, "audio") {
            return false;
        }

        // (13) buffer swap and renderer feedback
        render::swap_render(world);
        if !alive(world, "swap") {
            return false;
        }

        // (14) tick advance
        time::advance_tick(world);
        world.clear_trackers();
        world.resource_mut::<FrameStats>().frames += 1;
        true
    }

    /// Run frames until liveness dies or `max_frames` completes. Returns the
    /// number of frames fully executed.
    pub fn run(&mut self, world: &mut World, dt: f32, max_frames: Option<u64>) -> u64 {
        let mut frames = 0;
        while max_frames.map(|max| frames < max).unwrap_or(true) {
            if !self.run_frame(world, dt) {
                break;
            }
            frames += 1;
        }
        frames
    }
}

fn alive(world: &World, phase: &str) -> bool {
    let dead = world.resource::<Liveness>().is_dead();
    if dead {
        debug!("liveness dead after {phase}; aborting frame");
    }
    !dead
}
