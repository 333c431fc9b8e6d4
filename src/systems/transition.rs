//! Screen transition state machine.
//!
//! Advanced once per frame, before input processing. The machine owns the
//! Incoming/Idling/Outgoing lifecycle of the selected screen: lifecycle
//! signals, crossfade audio commands, input swallowing, and splash
//! auto-advance. The omni screen never transitions.
//!
//! A transition lifetime that does not land exactly on a tick boundary is a
//! recoverable inconsistency: logged once at transition start, then the
//! transition force-completes on the rounded-up tick.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::{Entity, World};
use log::{debug, warn};

use crate::components::screen::{Screen, SongFade, TransitionState};
use crate::events::audio::AudioCmd;
use crate::resources::selection::{DesiredScreen, ScreenSelection};
use crate::resources::signalbus::{Signal, SignalBus, publish};
use crate::resources::worldtime::WorldTime;

/// Track currently owned by screen crossfades. Manual audio control is
/// preserved by the no-op cases: when neither side declares a song the
/// machine never touches the backend.
#[derive(bevy_ecs::prelude::Resource, Debug, Clone, Default)]
pub struct PlayingSong(pub Option<SongFade>);

/// Select `screen` as the active one, firing `Deselecting` on the previous
/// selection and `Select` on the new one before any state changes.
pub fn select_screen(world: &mut World, screen: Entity) {
    let previous = world.resource::<ScreenSelection>().selected;
    if previous == Some(screen) {
        return;
    }
    if let Some(previous) = previous {
        publish(world, previous, &Signal::Deselecting);
    }
    publish(world, screen, &Signal::Select);

    world.resource_mut::<ScreenSelection>().selected = Some(screen);
    if let Some(mut state) = world.get_mut::<Screen>(screen) {
        state.set_state(TransitionState::Incoming);
    }
    world.resource_mut::<SignalBus>().set_swallow_input(true);
    debug!("screen {screen:?} selected, transition incoming");
}

/// Deselect whatever screen is active, firing `Deselecting` first.
pub fn deselect_screen(world: &mut World) {
    let Some(previous) = world.resource::<ScreenSelection>().selected else {
        return;
    };
    publish(world, previous, &Signal::Deselecting);
    world.resource_mut::<ScreenSelection>().selected = None;
    world.resource_mut::<SignalBus>().set_swallow_input(false);
    debug!("screen {previous:?} deselected");
}

/// Advance the transition machine by one tick.
pub fn advance_screen_transitions(world: &mut World) {
    let selection = *world.resource::<ScreenSelection>();
    let Some(selected) = selection.selected else {
        // Nothing selected: honor a fresh desire directly.
        if let DesiredScreen::Screen(screen) = selection.desired {
            select_screen(world, screen);
        }
        return;
    };
    let Some(screen) = world.get::<Screen>(selected) else {
        warn!("selected simulant {selected:?} has no Screen component; deselecting");
        deselect_screen(world);
        return;
    };

    match screen.state {
        TransitionState::Incoming => advance_incoming(world, selected),
        TransitionState::Idling => advance_idling(world, selected),
        TransitionState::Outgoing => advance_outgoing(world, selected),
    }
}

fn tick_rate(world: &World) -> u32 {
    world.resource::<WorldTime>().tick_rate
}

fn queue_audio(world: &mut World, cmd: AudioCmd) {
    world.resource_mut::<Messages<AudioCmd>>().write(cmd);
}

fn advance_incoming(world: &mut World, selected: Entity) {
    let rate = tick_rate(world);
    let (updates, lifetime, exact, song) = {
        let Some(screen) = world.get::<Screen>(selected) else {
            return;
        };
        let (lifetime, exact) = screen.incoming.lifetime_ticks(rate);
        (
            screen.transition_updates,
            lifetime,
            exact,
            screen.incoming.song.clone(),
        )
    };

    if updates == 0 {
        world.resource_mut::<SignalBus>().set_swallow_input(true);
        if !exact {
            warn!(
                "incoming transition on {selected:?} does not divide the tick rate evenly; \
                 forcing completion at the rounded tick"
            );
        }
        start_incoming_song(world, song);
        publish(world, selected, &Signal::IncomingStart);
    }

    let finished = {
        let Some(mut screen) = world.get_mut::<Screen>(selected) else {
            return;
        };
        screen.transition_updates += 1;
        screen.transition_updates == lifetime + 1
    };

    if finished {
        publish(world, selected, &Signal::IncomingFinish);
        if let Some(mut screen) = world.get_mut::<Screen>(selected) {
            screen.set_state(TransitionState::Idling);
        }
        world.resource_mut::<SignalBus>().set_swallow_input(false);
        debug!("screen {selected:?} incoming finished, idling");
    }
}

/// Start the crossfade-in, unless the same track with the same fade
/// parameters is already playing (no refade).
fn start_incoming_song(world: &mut World, song: Option<SongFade>) {
    let Some(song) = song else {
        return;
    };
    let already_playing = world.resource::<PlayingSong>().0.as_ref() == Some(&song);
    if already_playing {
        return;
    }
    queue_audio(
        world,
        AudioCmd::PlaySong {
            track: song.track.clone(),
            fade_ms: song.fade_ms,
            volume: song.volume,
        },
    );
    world.resource_mut::<PlayingSong>().0 = Some(song);
}

fn advance_idling(world: &mut World, selected: Entity) {
    let rate = tick_rate(world);
    let (updates, splash) = {
        let Some(screen) = world.get::<Screen>(selected) else {
            return;
        };
        (screen.transition_updates, screen.splash.clone())
    };

    if let Some(splash) = splash {
        // Splash screens auto-advance: count idling ticks exactly like a
        // transition, then force Outgoing toward the destination.
        let (idling_ticks, _) = crate::components::screen::ticks_for(splash.idling_ms, rate);
        if let Some(mut screen) = world.get_mut::<Screen>(selected) {
            screen.transition_updates += 1;
        }
        if updates + 1 == idling_ticks + 1 {
            let desired = match splash.destination {
                Some(destination) => DesiredScreen::Screen(destination),
                None => DesiredScreen::None,
            };
            world.resource_mut::<ScreenSelection>().desired = desired;
            begin_outgoing(world, selected);
        }
        return;
    }

    let selection = *world.resource::<ScreenSelection>();
    if selection.desired_destination().is_some() {
        begin_outgoing(world, selected);
    }
}

fn begin_outgoing(world: &mut World, selected: Entity) {
    if let Some(mut screen) = world.get_mut::<Screen>(selected) {
        screen.set_state(TransitionState::Outgoing);
    }
    world.resource_mut::<SignalBus>().set_swallow_input(true);
    debug!("screen {selected:?} transition outgoing");
}

fn advance_outgoing(world: &mut World, selected: Entity) {
    let rate = tick_rate(world);
    let (updates, lifetime, exact, outgoing_song) = {
        let Some(screen) = world.get::<Screen>(selected) else {
            return;
        };
        let (lifetime, exact) = screen.outgoing.lifetime_ticks(rate);
        (
            screen.transition_updates,
            lifetime,
            exact,
            screen.outgoing.song.clone(),
        )
    };

    if updates == 0 {
        if !exact {
            warn!(
                "outgoing transition on {selected:?} does not divide the tick rate evenly; \
                 forcing completion at the rounded tick"
            );
        }
        decide_outgoing_fade(world, outgoing_song);
        publish(world, selected, &Signal::OutgoingStart);
    }

    let finished = {
        let Some(mut screen) = world.get_mut::<Screen>(selected) else {
            return;
        };
        screen.transition_updates += 1;
        screen.transition_updates == lifetime + 1
    };

    if !finished {
        return;
    }

    publish(world, selected, &Signal::OutgoingFinish);
    // Momentarily back to Idling, then immediately resolve the destination.
    if let Some(mut screen) = world.get_mut::<Screen>(selected) {
        screen.set_state(TransitionState::Idling);
    }
    world.resource_mut::<SignalBus>().set_swallow_input(false);

    match world.resource::<ScreenSelection>().desired {
        DesiredScreen::Screen(destination) if destination != selected => {
            select_screen(world, destination);
        }
        DesiredScreen::None => {
            deselect_screen(world);
        }
        _ => {}
    }
}

/// Fade out only when the destination's incoming track actually differs:
/// the same track (with the same fade parameters) keeps playing across the
/// transition, and two absent tracks leave audio alone entirely.
fn decide_outgoing_fade(world: &mut World, outgoing_song: Option<SongFade>) {
    let destination_song = match world.resource::<ScreenSelection>().desired {
        DesiredScreen::Screen(destination) => world
            .get::<Screen>(destination)
            .and_then(|screen| screen.incoming.song.clone()),
        _ => None,
    };

    let Some(outgoing) = outgoing_song else {
        return; // nothing playing on our behalf, preserve manual control
    };
    if destination_song.as_ref() == Some(&outgoing) {
        return; // same track, same fade: no refade
    }
    queue_audio(
        world,
        AudioCmd::FadeOutSong {
            fade_ms: outgoing.fade_ms,
        },
    );
    world.resource_mut::<PlayingSong>().0 = None;
}
