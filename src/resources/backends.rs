//! Backend collaborator contracts.
//!
//! The core consumes physics, rendering, audio, and input through these
//! narrow traits (dependency inversion: concrete backends are injected at
//! construction, never reached around to). The Null implementations satisfy
//! every contract with no-ops so the engine runs headless in the binary and
//! in tests; [`ScriptedInput`] replays a canned event stream for both.

use bevy_ecs::prelude::Resource;
use std::collections::VecDeque;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::input::DeviceEvent;
use crate::events::physics::PhysicsMessage;
use crate::events::render::{RenderMessage, RendererMessage, ViewState};
use crate::resources::renderqueue::RendererSink;

/// Physics backend: advance the simulation, then surrender the outstanding
/// message list exactly once per frame.
pub trait PhysicsBackend: Send + Sync {
    fn integrate(&mut self, dt: f32);
    fn pop_messages(&mut self) -> Vec<PhysicsMessage>;
}

/// Renderer backend consumed through submit/swap/pop-messages.
pub trait RendererBackend: Send + Sync {
    fn submit(&mut self, view: ViewState, messages: Vec<RenderMessage>);
    /// Double-buffer flip.
    fn swap(&mut self);
    fn pop_messages(&mut self) -> Vec<RendererMessage>;
}

/// Audio backend: play the frame's accumulated commands, then surrender its
/// outgoing messages.
pub trait AudioBackend: Send + Sync {
    fn play(&mut self, cmds: Vec<AudioCmd>);
    fn pop_messages(&mut self) -> Vec<AudioMessage>;
}

/// Pollable queue of discrete device events.
pub trait InputSource: Send + Sync {
    /// All events pending this frame; the pipeline drains until empty.
    fn poll(&mut self) -> Vec<DeviceEvent>;
}

/// All injected collaborators, owned by the simulation thread.
#[derive(Resource)]
pub struct Backends {
    pub physics: Box<dyn PhysicsBackend>,
    pub renderer: RendererSink,
    pub audio: Box<dyn AudioBackend>,
    pub input: Box<dyn InputSource>,
}

impl Backends {
    /// Headless set: null physics/renderer/audio and an empty input queue.
    pub fn null() -> Self {
        Backends {
            physics: Box::new(NullPhysics),
            renderer: RendererSink::inline(Box::new(NullRenderer)),
            audio: Box::new(NullAudio),
            input: Box::new(ScriptedInput::default()),
        }
    }
}

/// Physics backend that never produces messages.
pub struct NullPhysics;

impl PhysicsBackend for NullPhysics {
    fn integrate(&mut self, _dt: f32) {}

    fn pop_messages(&mut self) -> Vec<PhysicsMessage> {
        Vec::new()
    }
}

/// Renderer backend that discards every submission.
pub struct NullRenderer;

impl RendererBackend for NullRenderer {
    fn submit(&mut self, _view: ViewState, _messages: Vec<RenderMessage>) {}

    fn swap(&mut self) {}

    fn pop_messages(&mut self) -> Vec<RendererMessage> {
        Vec::new()
    }
}

/// Audio backend that discards every command.
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _cmds: Vec<AudioCmd>) {}

    fn pop_messages(&mut self) -> Vec<AudioMessage> {
        Vec::new()
    }
}

/// Input source replaying one canned batch of events per poll.
#[derive(Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<DeviceEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<DeviceEvent>>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append a batch delivered on a future poll.
    pub fn push_frame(&mut self, events: Vec<DeviceEvent>) {
        self.frames.push_back(events);
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<DeviceEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
