//! Per-run frame statistics.
//!
//! Counters accumulated across the run, serializable for the `--stats` dump
//! in `main`. Purely diagnostic; nothing in the pipeline branches on them.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

#[derive(Resource, Debug, Default, Clone, Serialize)]
pub struct FrameStats {
    /// Frames fully completed.
    pub frames: u64,
    /// Simulants visited by the update traversal.
    pub updated: u64,
    /// Entities submitted to the renderer.
    pub rendered: u64,
    /// Tasklets executed on time.
    pub tasklets_run: u64,
    /// Tasklets discarded because their tick had already passed.
    pub tasklets_leaked: u64,
    /// Simulants destroyed through the destruction list.
    pub destroyed: u64,
}
