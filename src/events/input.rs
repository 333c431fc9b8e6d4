//! Discrete device events polled from the input source.
//!
//! Translation happens in `systems::input`: each device event becomes one or
//! more published signals plus a companion `InputChanged` signal, unless a
//! screen transition is currently swallowing input. `Quit` bypasses the bus
//! and kills liveness directly.

use glam::Vec2;

/// One discrete event from the pollable input queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// OS/user exit request.
    Quit,
    PointerMove { position: Vec2 },
    PointerButton { button: u8, down: bool },
    Key { code: u32, down: bool },
    GamepadDirection { direction: Vec2 },
    GamepadButton { button: u8, down: bool },
}
