//! Render submission messages and renderer feedback.
//!
//! The render phase gathers visible simulants, sorts them back-to-front, and
//! submits one message batch per frame together with the current view state.
//! The renderer's own outgoing messages (asset readiness, surface loss) are
//! popped after the swap and logged/forwarded; the core does not interpret
//! them beyond diagnostics.

use bevy_ecs::prelude::Entity;

use crate::math::Aabb;

/// View state accompanying a submission batch.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub view_2d: Aabb,
    pub view_3d: Aabb,
}

/// One render submission message.
#[derive(Debug, Clone)]
pub enum RenderMessage {
    /// Draw request for a visible simulant.
    Draw {
        simulant: Entity,
        bounds: Aabb,
        elevation: f32,
        horizon: f32,
    },
    /// Transition dissolve overlay, drawn above screen content.
    DissolveOverlay {
        screen: Entity,
        tag: String,
        /// Transition progress in [0, 1].
        progress: f32,
    },
}

/// Messages sent back from the renderer backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererMessage {
    AssetReady { tag: String },
    AssetFailed { tag: String, error: String },
    SurfaceLost,
}
