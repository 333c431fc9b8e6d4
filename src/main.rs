//! Orrery headless demo entry point.
//!
//! Boots a world from `config.ini`, populates a small demonstration
//! hierarchy (a splash screen fading into a playfield screen with a swarm of
//! randomly placed entities), and runs the frame pipeline at the configured
//! tick rate until the frame limit is reached or liveness dies.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --stats
//! ```

use bevy_ecs::prelude::World;
use clap::Parser;
use glam::{Vec2, Vec3};
use log::{error, info, warn};
use std::path::PathBuf;

use orrery::components::bounds::Presence;
use orrery::components::screen::{Screen, SongFade, Splash, Transition};
use orrery::events::input::DeviceEvent;
use orrery::math::Aabb;
use orrery::pipeline::FramePipeline;
use orrery::resources::backends::{Backends, NullRenderer, ScriptedInput};
use orrery::resources::config::EngineConfig;
use orrery::resources::destruction::DestructionList;
use orrery::resources::renderqueue::RendererSink;
use orrery::resources::selection::{DesiredScreen, GameRoot, ScreenSelection};
use orrery::resources::signalbus::{Address, Signal, SignalBus, SignalKind};
use orrery::resources::stats::FrameStats;
use orrery::resources::tasklets::TaskletQueue;
use orrery::resources::worldtime::WorldTime;
use orrery::world::{EntitySpawn, bootstrap_world, spawn_entity, spawn_group, spawn_screen};

/// Orrery simulation core demo
#[derive(Parser)]
#[command(version, about = "Headless demo of the orrery frame pipeline")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Run this many frames, then exit. Unset runs until a Quit event.
    #[arg(long)]
    frames: Option<u64>,

    /// Print frame statistics as JSON on exit.
    #[arg(long)]
    stats: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("using default configuration: {e}");
    }

    let renderer = if config.render_threaded {
        RendererSink::threaded(Box::new(NullRenderer))
    } else {
        RendererSink::inline(Box::new(NullRenderer))
    };
    let backends = Backends {
        renderer,
        ..Backends::null()
    };

    let dt = 1.0 / config.tick_rate as f32;
    let mut world = bootstrap_world(config, backends);
    populate_demo(&mut world);

    let mut pipeline = FramePipeline::new();
    let frames = pipeline.run(&mut world, dt, cli.frames);
    info!("pipeline stopped after {frames} frame(s)");

    if cli.stats {
        let stats = world.resource::<FrameStats>();
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("failed to serialize stats: {e}"),
        }
    }

    // Backends must be taken out of the world so the render worker can be
    // joined before exit.
    if let Some(backends) = world.remove_resource::<Backends>() {
        backends.renderer.shutdown();
    }
}

/// A splash screen that auto-advances into a playfield screen carrying a
/// swarm of randomly placed entities.
fn populate_demo(world: &mut World) {
    let splash = spawn_screen(
        world,
        Screen::new(
            Transition::with_lifetime(500),
            Transition::with_lifetime(250),
        ),
    );

    let mut playfield_incoming = Transition::with_lifetime(500);
    playfield_incoming.song = Some(SongFade::new("theme", 500));
    playfield_incoming.dissolve = Some(String::from("fade"));
    let playfield = spawn_screen(
        world,
        Screen::new(playfield_incoming, Transition::with_lifetime(250)),
    );

    if let Some(mut screen) = world.get_mut::<Screen>(splash) {
        screen.splash = Some(Splash {
            idling_ms: 1000,
            destination: Some(playfield),
        });
    }

    let swarm = spawn_group(world, playfield, "swarm");
    let scenery = spawn_group(world, playfield, "scenery");

    let mut rng = fastrand::Rng::with_seed(7);
    for i in 0..64 {
        let center = Vec3::new(
            rng.f32() * 800.0 - 400.0,
            rng.f32() * 800.0 - 400.0,
            rng.f32() * 200.0 - 100.0,
        );
        let bounds = Aabb::from_center_size(center, Vec3::splat(8.0));
        let spawn = EntitySpawn::new(bounds).with_elevation(center.z);
        let spawn = if i % 2 == 0 { spawn.planar() } else { spawn };
        spawn_entity(world, swarm, spawn);
    }

    // One omnipresent backdrop that every query returns.
    let backdrop = Aabb::planar(Vec2::ZERO, Vec2::splat(10_000.0));
    spawn_entity(
        world,
        scenery,
        EntitySpawn::new(backdrop)
            .planar()
            .with_presence(Presence::Omnipresent)
            .with_elevation(-100.0),
    );

    let root = world.resource::<GameRoot>().0;
    world.resource_mut::<SignalBus>().subscribe(
        SignalKind::Key,
        Address::Simulant(root),
        root,
        |_world, delivery| {
            if let Signal::Key { code, down: true } = delivery.signal {
                info!("key {code} pressed");
            }
        },
    );

    // Deferred work demo: tear the whole swarm down two seconds in.
    let tick_rate = world.resource::<WorldTime>().tick_rate as u64;
    world
        .resource_mut::<TaskletQueue>()
        .schedule(swarm, tick_rate * 2, move |world| {
            info!("tasklet fired, marking group for destruction");
            world.resource_mut::<DestructionList>().mark(swarm);
        });

    // Kick the transition machine: select the splash screen.
    world.resource_mut::<ScreenSelection>().desired = DesiredScreen::Screen(splash);

    // Feed a couple of scripted input frames so the bus has traffic.
    let mut backends = world.resource_mut::<Backends>();
    backends.input = Box::new(ScriptedInput::new([
        vec![DeviceEvent::PointerMove {
            position: Vec2::new(10.0, 20.0),
        }],
        vec![DeviceEvent::Key {
            code: 32,
            down: true,
        }],
    ]));
}
