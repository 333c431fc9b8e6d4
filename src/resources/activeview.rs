//! Active play/view volumes.
//!
//! The gather steps of the pipeline restrict their spatial queries to these
//! volumes: `play` bounds the simulation (in-play) gather, `view_2d` and
//! `view_3d` bound the render (in-view) gathers against the planar and
//! volumetric indexes. The host updates this resource when its camera moves.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

use crate::math::Aabb;

/// Current camera/simulation volumes used by the gather queries.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ActiveView {
    /// Volume inside which entities participate in update/post-update.
    pub play: Aabb,
    /// Visible rectangle for the 2D index.
    pub view_2d: Aabb,
    /// View frustum approximation for the 3D index.
    pub view_3d: Aabb,
}

impl ActiveView {
    /// Everything-in-view default sized to the spatial extent.
    pub fn covering(extent: f32) -> Self {
        let all = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(extent * 2.0));
        ActiveView {
            play: all,
            view_2d: all,
            view_3d: all,
        }
    }
}
