//! Cooperative early-exit flag.
//!
//! The pipeline checks this after every phase; once Dead, the remaining
//! phases of the frame are skipped and no further frame is scheduled. No
//! operation is interrupted mid-execution.

use bevy_ecs::prelude::Resource;

/// Two-state run flag for the frame pipeline.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Liveness {
    #[default]
    Live,
    Dead,
}

impl Liveness {
    pub fn is_dead(&self) -> bool {
        matches!(self, Liveness::Dead)
    }

    /// Request termination. Idempotent.
    pub fn kill(&mut self) {
        *self = Liveness::Dead;
    }
}
