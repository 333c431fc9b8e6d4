//! Screen transition integration tests: lifecycle signal exactness, tick
//! counting, input swallowing, splash auto-advance, and crossfade decisions.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::{Entity, Resource, World};

use orrery::components::screen::{Screen, SongFade, Splash, Transition, TransitionState};
use orrery::events::audio::{AudioCmd, AudioMessage};
use orrery::events::input::DeviceEvent;
use orrery::pipeline::FramePipeline;
use orrery::resources::backends::{AudioBackend, Backends, ScriptedInput};
use orrery::resources::config::EngineConfig;
use orrery::resources::selection::{DesiredScreen, GameRoot, ScreenSelection};
use orrery::resources::signalbus::{Address, Signal, SignalBus, SignalKind};
use orrery::world::{bootstrap_world, spawn_screen};

/// Audio backend recording every command it receives.
#[derive(Clone, Default)]
struct RecordingAudio(Arc<Mutex<Vec<AudioCmd>>>);

impl AudioBackend for RecordingAudio {
    fn play(&mut self, cmds: Vec<AudioCmd>) {
        self.0.lock().unwrap().extend(cmds);
    }

    fn pop_messages(&mut self) -> Vec<AudioMessage> {
        Vec::new()
    }
}

#[derive(Resource, Default)]
struct SignalCounts {
    incoming_start: u32,
    incoming_finish: u32,
    outgoing_start: u32,
    outgoing_finish: u32,
    keys: u32,
}

fn make_world() -> (World, RecordingAudio) {
    let audio = RecordingAudio::default();
    let mut backends = Backends::null();
    backends.audio = Box::new(audio.clone());
    let config = EngineConfig::default(); // tick_rate 60
    let mut world = bootstrap_world(config, backends);
    world.insert_resource(SignalCounts::default());
    (world, audio)
}

fn count_lifecycle(world: &mut World, screen: Entity) {
    let kinds = [
        SignalKind::IncomingStart,
        SignalKind::IncomingFinish,
        SignalKind::OutgoingStart,
        SignalKind::OutgoingFinish,
    ];
    for kind in kinds {
        world.resource_mut::<SignalBus>().subscribe(
            kind,
            Address::Simulant(screen),
            screen,
            move |world, delivery| {
                let mut counts = world.resource_mut::<SignalCounts>();
                match delivery.signal {
                    Signal::IncomingStart => counts.incoming_start += 1,
                    Signal::IncomingFinish => counts.incoming_finish += 1,
                    Signal::OutgoingStart => counts.outgoing_start += 1,
                    Signal::OutgoingFinish => counts.outgoing_finish += 1,
                    _ => {}
                }
            },
        );
    }
}

/// A 50 ms incoming transition at 60 ticks/s is 3 ticks; the screen idles
/// after exactly lifetime + 1 advances, with one start and one finish signal.
#[test]
fn incoming_transition_completes_after_lifetime_plus_one_ticks() {
    let (mut world, _audio) = make_world();
    let screen = spawn_screen(
        &mut world,
        Screen::new(Transition::with_lifetime(50), Transition::default()),
    );
    count_lifecycle(&mut world, screen);
    world.resource_mut::<ScreenSelection>().desired = DesiredScreen::Screen(screen);

    let mut pipeline = FramePipeline::new();
    let dt = 1.0 / 60.0;

    // Frame 1 selects; the next 4 frames advance the 3-tick transition.
    pipeline.run_frame(&mut world, dt);
    assert_eq!(
        world.get::<Screen>(screen).unwrap().state,
        TransitionState::Incoming
    );
    for _ in 0..3 {
        pipeline.run_frame(&mut world, dt);
        assert_eq!(
            world.get::<Screen>(screen).unwrap().state,
            TransitionState::Incoming
        );
    }
    pipeline.run_frame(&mut world, dt);
    assert_eq!(
        world.get::<Screen>(screen).unwrap().state,
        TransitionState::Idling
    );

    let counts = world.resource::<SignalCounts>();
    assert_eq!(counts.incoming_start, 1);
    assert_eq!(counts.incoming_finish, 1);
}

/// Device input is swallowed while a transition runs and delivered again
/// once the screen idles.
#[test]
fn input_is_swallowed_during_transitions() {
    let (mut world, _audio) = make_world();
    let screen = spawn_screen(
        &mut world,
        Screen::new(Transition::with_lifetime(50), Transition::default()),
    );
    world.resource_mut::<ScreenSelection>().desired = DesiredScreen::Screen(screen);

    let root = world.resource::<GameRoot>().0;
    world.resource_mut::<SignalBus>().subscribe(
        SignalKind::Key,
        Address::Simulant(root),
        root,
        |world, _delivery| {
            world.resource_mut::<SignalCounts>().keys += 1;
        },
    );

    let key = vec![DeviceEvent::Key {
        code: 32,
        down: true,
    }];
    world.resource_mut::<Backends>().input = Box::new(ScriptedInput::new([
        key.clone(), // frame 1: selection just set swallow on
        vec![],
        vec![],
        vec![],
        key.clone(), // frame 5: transition finished earlier this frame
    ]));

    let mut pipeline = FramePipeline::new();
    let dt = 1.0 / 60.0;
    for _ in 0..5 {
        pipeline.run_frame(&mut world, dt);
    }

    assert_eq!(
        world.get::<Screen>(screen).unwrap().state,
        TransitionState::Idling
    );
    assert_eq!(world.resource::<SignalCounts>().keys, 1);
}

/// A splash screen idles for its configured duration, then forces an
/// outgoing transition toward its destination, which starts incoming.
#[test]
fn splash_screen_auto_advances_to_its_destination() {
    let (mut world, audio) = make_world();

    let mut dest_incoming = Transition::with_lifetime(50);
    dest_incoming.song = Some(SongFade::new("theme", 100));
    let destination = spawn_screen(
        &mut world,
        Screen::new(dest_incoming, Transition::default()),
    );

    let mut splash_incoming = Transition::with_lifetime(50);
    splash_incoming.song = Some(SongFade::new("intro", 100));
    let splash = spawn_screen(
        &mut world,
        Screen::new(splash_incoming, Transition::with_lifetime(50)).with_splash(Splash {
            idling_ms: 50,
            destination: Some(destination),
        }),
    );
    count_lifecycle(&mut world, splash);
    world.resource_mut::<ScreenSelection>().desired = DesiredScreen::Screen(splash);

    let mut pipeline = FramePipeline::new();
    let dt = 1.0 / 60.0;
    // Selection + incoming (4) + idling (4) + outgoing (4) + slack.
    for _ in 0..16 {
        pipeline.run_frame(&mut world, dt);
    }

    assert_eq!(
        world.resource::<ScreenSelection>().selected,
        Some(destination)
    );
    let counts = world.resource::<SignalCounts>();
    assert_eq!(counts.outgoing_start, 1);
    assert_eq!(counts.outgoing_finish, 1);

    // Crossfade: intro in, faded out, theme in.
    let recorded = audio.0.lock().unwrap();
    let tracks: Vec<String> = recorded
        .iter()
        .map(|cmd| match cmd {
            AudioCmd::PlaySong { track, .. } => format!("play:{track}"),
            AudioCmd::FadeOutSong { .. } => String::from("fadeout"),
            other => format!("{other:?}"),
        })
        .collect();
    assert_eq!(tracks, vec!["play:intro", "fadeout", "play:theme"]);
}

/// When the destination declares the same song with the same fade, the track
/// keeps playing: no fade-out, no second play command.
#[test]
fn same_song_across_screens_is_not_refaded() {
    let (mut world, audio) = make_world();

    let mut shared = Transition::with_lifetime(50);
    shared.song = Some(SongFade::new("theme", 100));

    let destination = spawn_screen(
        &mut world,
        Screen::new(shared.clone(), Transition::default()),
    );
    let splash = spawn_screen(
        &mut world,
        Screen::new(shared.clone(), {
            let mut outgoing = Transition::with_lifetime(50);
            outgoing.song = shared.song.clone();
            outgoing
        })
        .with_splash(Splash {
            idling_ms: 50,
            destination: Some(destination),
        }),
    );
    world.resource_mut::<ScreenSelection>().desired = DesiredScreen::Screen(splash);

    let mut pipeline = FramePipeline::new();
    let dt = 1.0 / 60.0;
    for _ in 0..20 {
        pipeline.run_frame(&mut world, dt);
    }

    assert_eq!(
        world.resource::<ScreenSelection>().selected,
        Some(destination)
    );
    let recorded = audio.0.lock().unwrap();
    let plays = recorded
        .iter()
        .filter(|cmd| matches!(cmd, AudioCmd::PlaySong { .. }))
        .count();
    let fades = recorded
        .iter()
        .filter(|cmd| matches!(cmd, AudioCmd::FadeOutSong { .. }))
        .count();
    assert_eq!(plays, 1);
    assert_eq!(fades, 0);
}

/// A splash with no destination deselects entirely after its outgoing
/// transition.
#[test]
fn splash_without_destination_deselects() {
    let (mut world, _audio) = make_world();
    let splash = spawn_screen(
        &mut world,
        Screen::new(Transition::default(), Transition::default()).with_splash(Splash {
            idling_ms: 50,
            destination: None,
        }),
    );
    world.resource_mut::<ScreenSelection>().desired = DesiredScreen::Screen(splash);

    let mut pipeline = FramePipeline::new();
    let dt = 1.0 / 60.0;
    for _ in 0..12 {
        pipeline.run_frame(&mut world, dt);
    }

    assert_eq!(world.resource::<ScreenSelection>().selected, None);
    assert!(!world.resource::<SignalBus>().swallowing_input());
}
