//! Physics integration bridge.
//!
//! Once per frame, after input: advance the backend by the frame's timestep,
//! drain its outstanding message list, and apply it. Collision/separation
//! messages become signals published to each involved simulant; transform
//! messages mutate `Transform`/`Velocity` directly (no signal round-trip),
//! but only for primary shapes — composite sub-shapes never gain position
//! authority, which would feed back into the simulation.

use bevy_ecs::prelude::World;
use log::trace;

use crate::components::transform::{Transform, Velocity};
use crate::events::physics::PhysicsMessage;
use crate::resources::backends::Backends;
use crate::resources::signalbus::{Signal, publish};
use crate::resources::worldtime::WorldTime;

/// Advance the physics backend and integrate its messages into the world.
pub fn integrate_physics(world: &mut World) {
    let dt = world.resource::<WorldTime>().delta;
    let messages = {
        let mut backends = world.resource_mut::<Backends>();
        backends.physics.integrate(dt);
        backends.physics.pop_messages()
    };

    for message in messages {
        match message {
            PhysicsMessage::CollisionStart {
                body_a,
                body_b,
                normal,
                speed,
            } => {
                publish(
                    world,
                    body_a.simulant,
                    &Signal::Collision {
                        other: body_b.simulant,
                        normal,
                        speed,
                    },
                );
                publish(
                    world,
                    body_b.simulant,
                    &Signal::Collision {
                        other: body_a.simulant,
                        normal: -normal,
                        speed,
                    },
                );
            }
            PhysicsMessage::CollisionEnd { body_a, body_b } => {
                publish(
                    world,
                    body_a.simulant,
                    &Signal::Separation {
                        other: body_b.simulant,
                    },
                );
                publish(
                    world,
                    body_b.simulant,
                    &Signal::Separation {
                        other: body_a.simulant,
                    },
                );
            }
            PhysicsMessage::BodyTransform {
                body,
                position,
                rotation,
                linear_velocity,
                angular_velocity,
            } => {
                if !body.has_transform_authority() {
                    trace!("ignoring transform from composite sub-shape {body:?}");
                    continue;
                }
                let Ok(mut entity_mut) = world.get_entity_mut(body.simulant) else {
                    continue; // body outlived its simulant; nothing to move
                };
                entity_mut.insert((
                    Transform { position, rotation },
                    Velocity {
                        linear: linear_velocity,
                        angular: angular_velocity,
                    },
                ));
            }
        }
    }
}
