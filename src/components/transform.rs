//! Position/rotation/velocity written by the physics bridge.
//!
//! Transform messages from the physics backend mutate these components
//! directly (no signal round-trip) for bodies whose primary shape is the
//! authority. Gameplay reads them like any other component.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// World-space position and rotation of a simulant.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Transform {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Linear and angular velocity mirrored from the physics backend.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub linear: Vec3,
    pub angular: Vec3,
}
