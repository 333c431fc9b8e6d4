//! Top-level screen lifecycle data.
//!
//! A screen is always in one of three transition states. The per-state tick
//! counter resets on every state change; `systems::transition` advances it
//! and fires the lifecycle signals. Transition lifetimes are declared in
//! milliseconds and converted to logic ticks against the configured tick
//! rate; a lifetime that does not land exactly on a tick boundary is a
//! recoverable inconsistency (logged, then force-completed).

use bevy_ecs::prelude::{Component, Entity};

/// Lifecycle state of a screen with respect to transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    Incoming,
    #[default]
    Idling,
    Outgoing,
}

/// Crossfade descriptor for a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SongFade {
    /// Track identifier understood by the audio backend.
    pub track: String,
    /// Fade duration in milliseconds.
    pub fade_ms: u64,
    pub volume: f32,
}

impl SongFade {
    pub fn new(track: impl Into<String>, fade_ms: u64) -> Self {
        SongFade {
            track: track.into(),
            fade_ms,
            volume: 1.0,
        }
    }
}

/// One side (incoming or outgoing) of a screen transition.
#[derive(Debug, Clone, Default)]
pub struct Transition {
    /// Transition lifetime in milliseconds. Zero completes on the next tick.
    pub lifetime_ms: u64,
    /// Optional crossfade track started/stopped at the transition edges.
    pub song: Option<SongFade>,
    /// Optional dissolve visual, submitted as a render overlay tag.
    pub dissolve: Option<String>,
}

impl Transition {
    pub fn with_lifetime(lifetime_ms: u64) -> Self {
        Transition {
            lifetime_ms,
            ..Default::default()
        }
    }

    /// Lifetime in logic ticks plus whether the conversion was exact.
    pub fn lifetime_ticks(&self, tick_rate: u32) -> (u64, bool) {
        ticks_for(self.lifetime_ms, tick_rate)
    }
}

/// Auto-advancing splash behavior: after `idling_ms` of Idling the screen
/// forces an Outgoing transition toward `destination` (None deselects).
#[derive(Debug, Clone)]
pub struct Splash {
    pub idling_ms: u64,
    pub destination: Option<Entity>,
}

/// Screen component: transition state machine data.
#[derive(Component, Debug, Clone, Default)]
pub struct Screen {
    pub state: TransitionState,
    /// Ticks spent in the current state; reset on every state change.
    pub transition_updates: u64,
    pub incoming: Transition,
    pub outgoing: Transition,
    pub splash: Option<Splash>,
}

impl Screen {
    pub fn new(incoming: Transition, outgoing: Transition) -> Self {
        Screen {
            state: TransitionState::Idling,
            transition_updates: 0,
            incoming,
            outgoing,
            splash: None,
        }
    }

    pub fn with_splash(mut self, splash: Splash) -> Self {
        self.splash = Some(splash);
        self
    }

    /// Change state and reset the tick counter.
    pub fn set_state(&mut self, state: TransitionState) {
        self.state = state;
        self.transition_updates = 0;
    }
}

/// Convert a millisecond duration to logic ticks at `tick_rate` updates per
/// second. The boolean is false when the duration does not divide evenly,
/// in which case the tick count is rounded up.
pub fn ticks_for(duration_ms: u64, tick_rate: u32) -> (u64, bool) {
    let numerator = duration_ms * tick_rate as u64;
    let ticks = numerator / 1000;
    if numerator % 1000 == 0 {
        (ticks, true)
    } else {
        (ticks + 1, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_for_exact_division() {
        // 500 ms at 60 ticks/s is exactly 30 ticks.
        assert_eq!(ticks_for(500, 60), (30, true));
    }

    #[test]
    fn ticks_for_inexact_division_rounds_up() {
        // 25 ms at 60 ticks/s is 1.5 ticks.
        assert_eq!(ticks_for(25, 60), (2, false));
    }

    #[test]
    fn set_state_resets_counter() {
        let mut screen = Screen::default();
        screen.transition_updates = 7;
        screen.set_state(TransitionState::Outgoing);
        assert_eq!(screen.state, TransitionState::Outgoing);
        assert_eq!(screen.transition_updates, 0);
    }
}
