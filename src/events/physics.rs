//! Messages drained from the physics backend.
//!
//! A body is addressed by its owning simulant plus a shape index; shape
//! index zero is the primary (non-composite) shape and the only one with
//! position authority, so composite sub-shapes cannot feed transforms back
//! into the simulation.

use bevy_ecs::prelude::Entity;
use glam::Vec3;

/// Identity of a physics body shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    pub simulant: Entity,
    pub shape_index: u32,
}

impl BodyId {
    pub fn primary(simulant: Entity) -> Self {
        BodyId {
            simulant,
            shape_index: 0,
        }
    }

    /// Only primary shapes may write transforms.
    pub fn has_transform_authority(&self) -> bool {
        self.shape_index == 0
    }
}

/// One message from the physics backend's outstanding list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsMessage {
    CollisionStart {
        body_a: BodyId,
        body_b: BodyId,
        /// Contact normal pointing from `body_a` toward `body_b`.
        normal: Vec3,
        /// Relative speed along the normal at contact.
        speed: f32,
    },
    CollisionEnd {
        body_a: BodyId,
        body_b: BodyId,
    },
    BodyTransform {
        body: BodyId,
        position: Vec3,
        rotation: glam::Quat,
        linear_velocity: Vec3,
        angular_velocity: Vec3,
    },
}
