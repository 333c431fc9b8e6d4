//! Audio pump phase.
//!
//! Commands accumulated in `Messages<AudioCmd>` during the frame (screen
//! crossfades, gameplay cues) are forwarded to the backend in one batch;
//! the backend's outgoing messages are drained into
//! `Messages<AudioMessage>` for any system that cares.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::World;
use log::trace;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::backends::Backends;

/// Phase 12: forward queued commands, drain backend messages.
pub fn pump_audio(world: &mut World) {
    let cmds: Vec<AudioCmd> = world
        .resource_mut::<Messages<AudioCmd>>()
        .drain()
        .collect();

    let incoming = {
        let mut backends = world.resource_mut::<Backends>();
        if !cmds.is_empty() {
            trace!("forwarding {} audio command(s)", cmds.len());
            backends.audio.play(cmds);
        }
        backends.audio.pop_messages()
    };

    let mut messages = world.resource_mut::<Messages<AudioMessage>>();
    messages.update();
    for message in incoming {
        messages.write(message);
    }
}
