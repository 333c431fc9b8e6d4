//! Commands to and messages from the audio backend.
//!
//! Commands accumulate in `Messages<AudioCmd>` during the frame (screen
//! transitions write the crossfades here) and are forwarded to the backend
//! in the audio phase, which also drains the backend's outgoing messages
//! into `Messages<AudioMessage>` for anyone interested.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio backend.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Start a song, fading in over `fade_ms` (zero plays immediately).
    PlaySong {
        track: String,
        fade_ms: u64,
        volume: f32,
    },
    /// Fade the current song out over `fade_ms`.
    FadeOutSong { fade_ms: u64 },
    StopSong,
    PlayFx { id: String, volume: f32 },
}

/// Messages sent *back* from the audio backend.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    SongStarted { track: String },
    SongFinished { track: String },
    FxFinished { id: String },
    LoadFailed { track: String, error: String },
}
