//! Named group tag.
//!
//! Groups partition a screen's content. Membership in the hierarchy itself is
//! expressed with `bevy_ecs::hierarchy::ChildOf` (entity -> group -> screen);
//! the name is only a human-readable address used by hosts and diagnostics.

use bevy_ecs::prelude::Component;

/// Group name under its owning screen.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
