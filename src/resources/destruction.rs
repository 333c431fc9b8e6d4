//! Destruction mark stack.
//!
//! Simulants marked for removal during a frame accumulate here and are torn
//! down in a dedicated pipeline phase, one pop at a time, most-recent first.
//! Destroying a parent pushes its children, and because the drain re-consults
//! the stack after every teardown, those children fully unwind before any
//! earlier mark proceeds.

use bevy_ecs::prelude::{Entity, Resource};

/// Simulants marked for removal during the current frame.
#[derive(Resource, Debug, Default)]
pub struct DestructionList {
    marked: Vec<Entity>,
}

impl DestructionList {
    /// Mark a simulant for destruction. Marking the same simulant twice is
    /// harmless; the drain's visited set skips duplicates.
    pub fn mark(&mut self, simulant: Entity) {
        self.marked.push(simulant);
    }

    /// Pop the most recent mark, if any.
    pub fn pop(&mut self) -> Option<Entity> {
        self.marked.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }
}
