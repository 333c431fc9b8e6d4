//! Render gather and submission.
//!
//! Builds the frame's submission in draw order: game, screens, the
//! transition dissolve overlay, groups, then the in-view entities gathered
//! from both spatial indexes, visible only, sorted back-to-front by
//! elevation with the horizontal tiebreak. Omni screen content is gathered
//! first so selected-screen content draws over it. The swap phase runs
//! separately at the end of the frame and collects renderer feedback.

use bevy_ecs::prelude::{Entity, World};
use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::components::bounds::{Bounds, Visible};
use crate::components::screen::{Screen, TransitionState};
use crate::components::simulant::{SimulantKind, SortKey};
use crate::events::render::{RenderMessage, RendererMessage, ViewState};
use crate::resources::activeview::ActiveView;
use crate::resources::backends::Backends;
use crate::resources::renderqueue::FrameSubmission;
use crate::resources::selection::GameRoot;
use crate::resources::stats::FrameStats;
use crate::resources::worldtime::WorldTime;
use crate::systems::spatial;
use crate::systems::update::{active_screens, screen_of};

fn draw_message(world: &World, simulant: Entity) -> Option<RenderMessage> {
    if !world.get::<Visible>(simulant).map(|v| v.0).unwrap_or(true) {
        return None;
    }
    let bounds = world.get::<Bounds>(simulant)?.0;
    let key = SortKey::of(world, simulant);
    Some(RenderMessage::Draw {
        simulant,
        bounds,
        elevation: key.elevation,
        horizon: key.horizon,
    })
}

/// Dissolve overlay for a screen mid-transition, with progress in [0, 1].
fn transition_overlay(world: &World, screen: Entity) -> Option<RenderMessage> {
    let state = world.get::<Screen>(screen)?;
    let rate = world.resource::<WorldTime>().tick_rate;
    let transition = match state.state {
        TransitionState::Incoming => &state.incoming,
        TransitionState::Outgoing => &state.outgoing,
        TransitionState::Idling => return None,
    };
    let tag = transition.dissolve.clone()?;
    let (lifetime, _) = transition.lifetime_ticks(rate);
    let progress = (state.transition_updates as f32 / (lifetime + 1) as f32).clamp(0.0, 1.0);
    Some(RenderMessage::DissolveOverlay {
        screen,
        tag,
        progress,
    })
}

/// Phase 11: gather in-view simulants and submit the frame batch.
pub fn render_frame(world: &mut World) {
    let view = *world.resource::<ActiveView>();
    let mut in_view: FxHashSet<Entity> = spatial::query_in_view_2d(world, &view.view_2d);
    in_view.extend(spatial::query_in_view_3d(world, &view.view_3d));

    let mut messages: Vec<RenderMessage> = Vec::new();
    let root = world.resource::<GameRoot>().0;
    if let Some(message) = draw_message(world, root) {
        messages.push(message);
    }

    let mut entity_draws = 0u64;
    for screen in active_screens(world) {
        if let Some(message) = draw_message(world, screen) {
            messages.push(message);
        }
        if let Some(overlay) = transition_overlay(world, screen) {
            messages.push(overlay);
        }
        let mut content: Vec<Entity> = in_view
            .iter()
            .copied()
            .filter(|entity| {
                matches!(
                    world.get::<SimulantKind>(*entity),
                    Some(SimulantKind::Group) | Some(SimulantKind::Entity)
                ) && screen_of(world, *entity) == Some(screen)
            })
            .collect();
        content.sort_by(|a, b| {
            let ka = SortKey::of(world, *a);
            let kb = SortKey::of(world, *b);
            ka.rank.cmp(&kb.rank).then_with(|| ka.draw_cmp(&kb))
        });
        for simulant in content {
            if let Some(message) = draw_message(world, simulant) {
                entity_draws += 1;
                messages.push(message);
            }
        }
    }
    world.resource_mut::<FrameStats>().rendered += entity_draws;

    let submission = FrameSubmission {
        view: ViewState {
            view_2d: view.view_2d,
            view_3d: view.view_3d,
        },
        messages,
    };
    world.resource_mut::<Backends>().renderer.submit(submission);
}

/// Phase 13: flip buffers and drain renderer feedback.
pub fn swap_render(world: &mut World) {
    let feedback = world.resource_mut::<Backends>().renderer.swap_and_pop();
    for message in feedback {
        match message {
            RendererMessage::SurfaceLost => warn!("renderer reported surface loss"),
            RendererMessage::AssetFailed { tag, error } => {
                warn!("renderer failed to prepare '{tag}': {error}")
            }
            RendererMessage::AssetReady { tag } => debug!("renderer asset ready: {tag}"),
        }
    }
}
