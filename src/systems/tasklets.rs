//! Tasklet drain phase.
//!
//! Runs once per frame: takes the whole pending list (so operations
//! scheduled while draining wait for the next cycle), drops entries whose
//! owner has been destroyed, executes entries due exactly now, requeues
//! future ones verbatim, and discards leaked ones with a diagnostic.

use bevy_ecs::prelude::World;
use log::warn;
use std::cmp::Ordering;

use crate::resources::stats::FrameStats;
use crate::resources::tasklets::TaskletQueue;
use crate::resources::worldtime::WorldTime;

/// Execute all tasklets due at the current logic tick.
pub fn process_tasklets(world: &mut World) {
    let now = world.resource::<WorldTime>().tick;
    let mut pending = world.resource_mut::<TaskletQueue>().take_pending();
    if pending.is_empty() {
        return;
    }
    // Group by owning simulant; owners scheduled together drain together.
    pending.sort_by_key(|tasklet| tasklet.owner);

    let mut keep = Vec::new();
    for tasklet in pending {
        if world.get_entity(tasklet.owner).is_err() {
            // Owner vanished; drop silently.
            continue;
        }
        match tasklet.due_tick.cmp(&now) {
            Ordering::Equal => {
                (tasklet.operation)(world);
                world.resource_mut::<FrameStats>().tasklets_run += 1;
            }
            Ordering::Greater => keep.push(tasklet),
            Ordering::Less => {
                warn!(
                    "tasklet owned by {:?} leaked: due tick {} already passed (now {})",
                    tasklet.owner, tasklet.due_tick, now
                );
                world.resource_mut::<FrameStats>().tasklets_leaked += 1;
            }
        }
    }

    let mut queue = world.resource_mut::<TaskletQueue>();
    for tasklet in keep {
        queue.requeue(tasklet);
    }
}
