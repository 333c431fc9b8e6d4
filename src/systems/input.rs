//! Input polling and dispatch.
//!
//! Drains the input source's pending device events for the frame and
//! translates each into a published signal addressed to the game root, plus
//! a companion `InputChanged` signal. During screen transitions the bus
//! swallows the device-input signals; `Quit` bypasses the bus and kills
//! liveness directly so a transition can never block exit.

use bevy_ecs::prelude::World;
use log::info;

use crate::events::input::DeviceEvent;
use crate::resources::backends::Backends;
use crate::resources::liveness::Liveness;
use crate::resources::selection::GameRoot;
use crate::resources::signalbus::{Signal, publish};

/// Poll and dispatch all device events pending this frame.
pub fn poll_input(world: &mut World) {
    let events = world.resource_mut::<Backends>().input.poll();
    if events.is_empty() {
        return;
    }
    let root = world.resource::<GameRoot>().0;

    for event in events {
        let signal = match event {
            DeviceEvent::Quit => {
                info!("quit requested by input source");
                world.resource_mut::<Liveness>().kill();
                return;
            }
            DeviceEvent::PointerMove { position } => Signal::PointerMove { position },
            DeviceEvent::PointerButton { button, down } => Signal::PointerButton { button, down },
            DeviceEvent::Key { code, down } => Signal::Key { code, down },
            DeviceEvent::GamepadDirection { direction } => Signal::GamepadDirection { direction },
            DeviceEvent::GamepadButton { button, down } => Signal::GamepadButton { button, down },
        };
        publish(world, root, &signal);
        publish(world, root, &Signal::InputChanged);
    }
}
