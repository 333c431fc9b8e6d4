//! Tasklet queue integration tests: due-tick exactness, leak discarding,
//! vanished owners, and re-entrant scheduling.

use bevy_ecs::prelude::{Resource, World};

use orrery::pipeline::FramePipeline;
use orrery::resources::backends::Backends;
use orrery::resources::config::EngineConfig;
use orrery::resources::selection::GameRoot;
use orrery::resources::stats::FrameStats;
use orrery::resources::tasklets::TaskletQueue;
use orrery::resources::worldtime::WorldTime;
use orrery::world::bootstrap_world;

#[derive(Resource, Default)]
struct Fired(Vec<&'static str>);

fn make_world() -> World {
    let mut world = bootstrap_world(EngineConfig::default(), Backends::null());
    world.insert_resource(Fired::default());
    world
}

fn run_frames(world: &mut World, pipeline: &mut FramePipeline, n: u64) {
    for _ in 0..n {
        assert!(pipeline.run_frame(world, 1.0 / 60.0));
    }
}

/// A tasklet due at tick 2 runs during the frame that observes tick 2 (the
/// third frame) and exactly once.
#[test]
fn tasklet_runs_exactly_at_its_due_tick() {
    let mut world = make_world();
    let mut pipeline = FramePipeline::new();
    let owner = world.resource::<GameRoot>().0;

    world
        .resource_mut::<TaskletQueue>()
        .schedule(owner, 2, |world| {
            let tick = world.resource::<WorldTime>().tick;
            world.resource_mut::<Fired>().0.push("due");
            assert_eq!(tick, 2);
        });

    run_frames(&mut world, &mut pipeline, 2);
    assert!(world.resource::<Fired>().0.is_empty());
    assert_eq!(world.resource::<TaskletQueue>().len(), 1);

    run_frames(&mut world, &mut pipeline, 1);
    assert_eq!(world.resource::<Fired>().0, vec!["due"]);
    assert!(world.resource::<TaskletQueue>().is_empty());
    assert_eq!(world.resource::<FrameStats>().tasklets_run, 1);

    run_frames(&mut world, &mut pipeline, 2);
    assert_eq!(world.resource::<Fired>().0.len(), 1);
}

/// A tasklet whose tick already passed is discarded with the leak counter,
/// never executed.
#[test]
fn missed_tasklet_is_leaked_not_executed() {
    let mut world = make_world();
    let mut pipeline = FramePipeline::new();
    let owner = world.resource::<GameRoot>().0;

    // Advance past tick 1 before scheduling for it.
    run_frames(&mut world, &mut pipeline, 3);
    world
        .resource_mut::<TaskletQueue>()
        .schedule(owner, 1, |world| {
            world.resource_mut::<Fired>().0.push("leaked");
        });

    run_frames(&mut world, &mut pipeline, 1);
    assert!(world.resource::<Fired>().0.is_empty());
    assert!(world.resource::<TaskletQueue>().is_empty());
    assert_eq!(world.resource::<FrameStats>().tasklets_leaked, 1);
}

/// Tasklets whose owner was destroyed are dropped silently before any
/// due-tick comparison.
#[test]
fn vanished_owner_drops_the_tasklet_silently() {
    let mut world = make_world();
    let mut pipeline = FramePipeline::new();
    let owner = world.spawn_empty().id();

    world
        .resource_mut::<TaskletQueue>()
        .schedule(owner, 0, |world| {
            world.resource_mut::<Fired>().0.push("orphan");
        });
    world.despawn(owner);

    run_frames(&mut world, &mut pipeline, 1);
    assert!(world.resource::<Fired>().0.is_empty());
    assert!(world.resource::<TaskletQueue>().is_empty());
    let stats = world.resource::<FrameStats>();
    assert_eq!(stats.tasklets_run, 0);
    assert_eq!(stats.tasklets_leaked, 0);
}

/// Scheduling from inside a running tasklet lands in a fresh queue: the
/// current drain never sees it, so it cannot run early in the same cycle.
#[test]
fn mid_drain_schedules_wait_for_the_next_frame() {
    let mut world = make_world();
    let mut pipeline = FramePipeline::new();
    let owner = world.resource::<GameRoot>().0;

    world
        .resource_mut::<TaskletQueue>()
        .schedule(owner, 0, move |world| {
            world.resource_mut::<Fired>().0.push("outer");
            let next = world.resource::<WorldTime>().tick + 1;
            world
                .resource_mut::<TaskletQueue>()
                .schedule(owner, next, |world| {
                    world.resource_mut::<Fired>().0.push("inner");
                });
        });

    run_frames(&mut world, &mut pipeline, 1);
    assert_eq!(world.resource::<Fired>().0, vec!["outer"]);
    assert_eq!(world.resource::<TaskletQueue>().len(), 1);

    run_frames(&mut world, &mut pipeline, 1);
    assert_eq!(world.resource::<Fired>().0, vec!["outer", "inner"]);
}

/// Future tasklets are requeued verbatim, surviving multiple drains.
#[test]
fn future_tasklets_are_requeued_until_due() {
    let mut world = make_world();
    let mut pipeline = FramePipeline::new();
    let owner = world.resource::<GameRoot>().0;

    world
        .resource_mut::<TaskletQueue>()
        .schedule(owner, 5, |world| {
            world.resource_mut::<Fired>().0.push("later");
        });

    run_frames(&mut world, &mut pipeline, 5);
    assert!(world.resource::<Fired>().0.is_empty());
    assert_eq!(world.resource::<TaskletQueue>().len(), 1);

    run_frames(&mut world, &mut pipeline, 1);
    assert_eq!(world.resource::<Fired>().0, vec!["later"]);
    assert!(world.resource::<TaskletQueue>().is_empty());
}
