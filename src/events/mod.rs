//! Message and event payload types exchanged with the backend collaborators.
//!
//! The engine core owns no wire protocol; these are the in-memory shapes of
//! the narrow contracts it consumes: device events from the input source,
//! commands/messages for the audio backend, submissions/messages for the
//! renderer, and the physics backend's outgoing message list.
//!
//! Submodules:
//! - [`audio`] – commands to and messages from the audio backend
//! - [`input`] – discrete device events polled from the input source
//! - [`physics`] – collision/separation/transform messages from physics
//! - [`render`] – render submission messages and renderer feedback

pub mod audio;
pub mod input;
pub mod physics;
pub mod render;
