//! Bounded-region spatial index.
//!
//! One [`SpatialTree`] type backs both dimensionalities: planar trees split
//! nodes in x/y (quadtree fanout 4), volumetric trees split in x/y/z (octree
//! fanout 8). The outer region, fanout, and maximum depth are fixed at
//! construction. Elements fully contained by the outer region are stored in
//! every max-depth leaf their bounds intersect, with the insertion-time
//! bounds kept alongside so queries can filter leaf co-tenants down to true
//! intersections; omnipresent elements and elements exceeding the outer
//! region live in an unconditional fallback set returned by every query.
//!
//! Removal must be called with the exact bounds/presence passed at
//! insertion. Removing an element that was never inserted is a silent no-op
//! so teardown paths stay idempotent.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::bounds::Presence;
use crate::math::Aabb;
use crate::resources::mutantcache::MutantCache;

/// Which axes a tree subdivides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    /// Quadtree: x/y splits, full z extent in every node.
    Planar,
    /// Octree: x/y/z splits.
    Volumetric,
}

impl Dimensionality {
    fn fanout(&self) -> usize {
        match self {
            Dimensionality::Planar => 4,
            Dimensionality::Volumetric => 8,
        }
    }
}

/// One node of the tree. Children are created on first insertion into the
/// node's region; leaves at maximum depth hold the element sets.
#[derive(Debug, Default)]
struct Node {
    children: Option<Box<ArrayVec<Node, 8>>>,
    elements: FxHashSet<Entity>,
}

/// Spatial index over a fixed outer region.
#[derive(Debug)]
pub struct SpatialTree {
    dimensionality: Dimensionality,
    region: Aabb,
    depth: u32,
    root: Node,
    /// Omnipresent and out-of-region elements, returned by every query.
    fallback: FxHashSet<Entity>,
    /// Exposed/imposter elements: unconditionally part of active-view
    /// results even when the view volume misses their bounds.
    exposed: FxHashSet<Entity>,
    /// Insertion-time bounds of tree-indexed elements, used to narrow leaf
    /// hits to actual intersections.
    bounds: FxHashMap<Entity, Aabb>,
    len: usize,
}

impl SpatialTree {
    /// Create an empty tree. `depth` zero degenerates into a single leaf
    /// spanning the whole region.
    pub fn new(dimensionality: Dimensionality, region: Aabb, depth: u32) -> Self {
        SpatialTree {
            dimensionality,
            region,
            depth,
            root: Node::default(),
            fallback: FxHashSet::default(),
            exposed: FxHashSet::default(),
            bounds: FxHashMap::default(),
            len: 0,
        }
    }

    pub fn region(&self) -> &Aabb {
        &self.region
    }

    /// Number of distinct elements currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an element under the given bounds and presence.
    pub fn insert(&mut self, bounds: &Aabb, presence: Presence, element: Entity) {
        if presence.always_in_view() {
            self.exposed.insert(element);
        }
        if presence == Presence::Omnipresent || !self.region.contains(bounds) {
            if self.fallback.insert(element) {
                self.len += 1;
            }
            return;
        }
        if insert_into(
            &mut self.root,
            &self.region,
            self.depth,
            self.dimensionality,
            bounds,
            element,
        ) {
            self.len += 1;
        }
        self.bounds.insert(element, *bounds);
    }

    /// Remove an element using the same bounds/presence it was inserted
    /// with. Unknown elements are ignored.
    pub fn remove(&mut self, bounds: &Aabb, presence: Presence, element: Entity) {
        self.exposed.remove(&element);
        if presence == Presence::Omnipresent || !self.region.contains(bounds) {
            if self.fallback.remove(&element) {
                self.len -= 1;
            }
            return;
        }
        if remove_from(
            &mut self.root,
            &self.region,
            self.depth,
            self.dimensionality,
            bounds,
            element,
        ) {
            self.len -= 1;
        }
        self.bounds.remove(&element);
    }

    /// Elements whose stored bounds contain `point`, plus the fallback set.
    pub fn query_point(&self, point: Vec3) -> FxHashSet<Entity> {
        let probe = Aabb::new(point, point);
        self.query_region(&probe)
    }

    /// Elements intersecting `region`, plus the fallback set. Regions larger
    /// than the outer region are valid and clipped internally.
    pub fn query_region(&self, region: &Aabb) -> FxHashSet<Entity> {
        let clipped = region.clipped_to(&self.region);
        let mut found = FxHashSet::default();
        collect_intersecting(
            &self.root,
            &self.region,
            self.depth,
            self.dimensionality,
            &clipped,
            &mut found,
        );
        // Leaf hits only prove co-tenancy; keep the ones whose stored
        // bounds actually touch the query.
        found.retain(|element| {
            self.bounds
                .get(element)
                .is_some_and(|bounds| bounds.intersects(&clipped))
        });
        found.extend(self.fallback.iter().copied());
        found
    }

    /// Only the unconditional fallback set.
    pub fn query_omnipresent_only(&self) -> FxHashSet<Entity> {
        self.fallback.clone()
    }

    /// Visibility query: everything intersecting the view volume, plus
    /// exposed/imposter elements, plus the fallback set.
    pub fn query_active_view(&self, view: &Aabb) -> FxHashSet<Entity> {
        let mut found = self.query_region(view);
        found.extend(self.exposed.iter().copied());
        found
    }

    /// Simulation query against the active play volume.
    pub fn query_in_play(&self, play: &Aabb) -> FxHashSet<Entity> {
        self.query_region(play)
    }

    /// Drop every element, keeping the configured region/depth.
    pub fn clear(&mut self) {
        self.root = Node::default();
        self.fallback.clear();
        self.exposed.clear();
        self.bounds.clear();
        self.len = 0;
    }
}

/// Region of the `index`-th child of a node spanning `region`.
fn child_region(region: &Aabb, dimensionality: Dimensionality, index: usize) -> Aabb {
    let center = region.center();
    let x_hi = index & 1 != 0;
    let y_hi = index & 2 != 0;
    let z_hi = index & 4 != 0;
    let (min_z, max_z) = match dimensionality {
        // Planar nodes keep the full z extent.
        Dimensionality::Planar => (region.min.z, region.max.z),
        Dimensionality::Volumetric => {
            if z_hi {
                (center.z, region.max.z)
            } else {
                (region.min.z, center.z)
            }
        }
    };
    let (min_x, max_x) = if x_hi {
        (center.x, region.max.x)
    } else {
        (region.min.x, center.x)
    };
    let (min_y, max_y) = if y_hi {
        (center.y, region.max.y)
    } else {
        (region.min.y, center.y)
    };
    Aabb::new(
        Vec3::new(min_x, min_y, min_z),
        Vec3::new(max_x, max_y, max_z),
    )
}

fn ensure_children(node: &mut Node, dimensionality: Dimensionality) {
    if node.children.is_none() {
        let mut children = ArrayVec::new();
        for _ in 0..dimensionality.fanout() {
            children.push(Node::default());
        }
        node.children = Some(Box::new(children));
    }
}

/// Returns true when the element is new to this subtree's leaves.
fn insert_into(
    node: &mut Node,
    region: &Aabb,
    depth: u32,
    dimensionality: Dimensionality,
    bounds: &Aabb,
    element: Entity,
) -> bool {
    if depth == 0 {
        return node.elements.insert(element);
    }
    ensure_children(node, dimensionality);
    let mut inserted = false;
    let Some(children) = node.children.as_deref_mut() else {
        return false;
    };
    for (index, child) in children.iter_mut().enumerate() {
        let sub = child_region(region, dimensionality, index);
        if sub.intersects(bounds)
            && insert_into(child, &sub, depth - 1, dimensionality, bounds, element)
        {
            inserted = true;
        }
    }
    inserted
}

/// Returns true when the element was present somewhere in this subtree.
fn remove_from(
    node: &mut Node,
    region: &Aabb,
    depth: u32,
    dimensionality: Dimensionality,
    bounds: &Aabb,
    element: Entity,
) -> bool {
    if depth == 0 {
        return node.elements.remove(&element);
    }
    let Some(children) = node.children.as_deref_mut() else {
        return false;
    };
    let mut removed = false;
    for (index, child) in children.iter_mut().enumerate() {
        let sub = child_region(region, dimensionality, index);
        if sub.intersects(bounds)
            && remove_from(child, &sub, depth - 1, dimensionality, bounds, element)
        {
            removed = true;
        }
    }
    removed
}

fn collect_intersecting(
    node: &Node,
    region: &Aabb,
    depth: u32,
    dimensionality: Dimensionality,
    query: &Aabb,
    out: &mut FxHashSet<Entity>,
) {
    if depth == 0 {
        out.extend(node.elements.iter().copied());
        return;
    }
    let Some(children) = node.children.as_deref() else {
        return;
    };
    for (index, child) in children.iter().enumerate() {
        let sub = child_region(region, dimensionality, index);
        if sub.intersects(query) {
            collect_intersecting(child, &sub, depth - 1, dimensionality, query, out);
        }
    }
}

/// The two engine-owned spatial indexes behind their mutant caches.
///
/// The cached trees stay valid across frames while the incremental
/// register/unregister/move helpers in `systems::spatial` mirror every
/// change; bulk churn bumps [`WorldVersion`](super::mutantcache::WorldVersion)
/// instead, which makes the next access rebuild from the live population.
#[derive(Resource)]
pub struct SpatialIndexes {
    pub planar: MutantCache<SpatialTree>,
    pub volumetric: MutantCache<SpatialTree>,
    pub extent: f32,
    pub depth_2d: u32,
    pub depth_3d: u32,
}

impl SpatialIndexes {
    pub fn new(extent: f32, depth_2d: u32, depth_3d: u32) -> Self {
        SpatialIndexes {
            planar: MutantCache::new(),
            volumetric: MutantCache::new(),
            extent,
            depth_2d,
            depth_3d,
        }
    }

    /// Root region shared by both trees: a cube centered on the origin.
    pub fn root_region(&self) -> Aabb {
        Aabb::from_center_size(Vec3::ZERO, Vec3::splat(self.extent * 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::World;
    use glam::Vec2;

    // 0..1000 on both axes.
    fn region_1000() -> Aabb {
        Aabb::planar(Vec2::splat(500.0), Vec2::splat(1000.0))
    }

    fn spawn(world: &mut World) -> Entity {
        world.spawn_empty().id()
    }

    #[test]
    fn insert_then_query_region_finds_element() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(15.0), Vec2::splat(10.0));
        tree.insert(&bounds, Presence::Enclosed, e);

        let probe = Aabb::planar(Vec2::splat(25.0), Vec2::splat(50.0));
        assert!(tree.query_region(&probe).contains(&e));

        let far = Aabb::planar(Vec2::splat(925.0), Vec2::splat(50.0));
        assert!(!tree.query_region(&far).contains(&e));
    }

    #[test]
    fn query_in_same_leaf_misses_disjoint_element() {
        let mut world = World::new();
        let e = spawn(&mut world);
        // Depth 4 over 0..1000: leaves are 62.5 wide, so both boxes below
        // share the first leaf without touching each other.
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(10.0), Vec2::splat(12.0));
        tree.insert(&bounds, Presence::Enclosed, e);

        let disjoint = Aabb::planar(Vec2::splat(50.0), Vec2::splat(10.0));
        assert!(!tree.query_region(&disjoint).contains(&e));

        let touching = Aabb::planar(Vec2::splat(20.0), Vec2::splat(10.0));
        assert!(tree.query_region(&touching).contains(&e));
    }

    #[test]
    fn query_point_respects_element_bounds() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let omni = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(10.0), Vec2::splat(12.0));
        tree.insert(&bounds, Presence::Enclosed, e);
        tree.insert(&bounds, Presence::Omnipresent, omni);

        let inside = tree.query_point(Vec3::new(12.0, 12.0, 0.0));
        assert!(inside.contains(&e));

        // Same leaf as the element, but outside its bounds.
        let beside = tree.query_point(Vec3::new(50.0, 50.0, 0.0));
        assert!(!beside.contains(&e));
        assert!(beside.contains(&omni));
    }

    #[test]
    fn straddling_element_returned_once() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        // Straddles the root center, so it lands in many leaves.
        let bounds = Aabb::planar(Vec2::splat(500.0), Vec2::splat(200.0));
        tree.insert(&bounds, Presence::Enclosed, e);

        let hits = tree.query_region(&region_1000());
        assert_eq!(hits.len(), 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn omnipresent_ignores_region() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(15.0), Vec2::splat(10.0));
        tree.insert(&bounds, Presence::Omnipresent, e);

        let far = Aabb::planar(Vec2::splat(925.0), Vec2::splat(50.0));
        assert!(tree.query_region(&far).contains(&e));
        assert!(tree.query_omnipresent_only().contains(&e));
    }

    #[test]
    fn out_of_region_element_falls_back() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(-75.0), Vec2::splat(50.0));
        tree.insert(&bounds, Presence::Enclosed, e);

        assert!(tree.query_omnipresent_only().contains(&e));
        tree.remove(&bounds, Presence::Enclosed, e);
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_never_inserted_is_noop() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(15.0), Vec2::splat(10.0));
        tree.remove(&bounds, Presence::Enclosed, e);
        assert!(tree.is_empty());
    }

    #[test]
    fn exposed_always_in_active_view() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Volumetric, region_1000(), 3);
        let bounds = Aabb::planar(Vec2::splat(925.0), Vec2::splat(50.0));
        tree.insert(&bounds, Presence::Exposed, e);

        let view = Aabb::planar(Vec2::splat(50.0), Vec2::splat(100.0));
        assert!(tree.query_active_view(&view).contains(&e));
        assert!(!tree.query_region(&view).contains(&e));
    }

    #[test]
    fn oversized_query_clips_to_root() {
        let mut world = World::new();
        let e = spawn(&mut world);
        let mut tree = SpatialTree::new(Dimensionality::Planar, region_1000(), 4);
        let bounds = Aabb::planar(Vec2::splat(505.0), Vec2::splat(10.0));
        tree.insert(&bounds, Presence::Enclosed, e);

        let huge = Aabb::planar(Vec2::ZERO, Vec2::splat(2e6));
        assert!(tree.query_region(&huge).contains(&e));
    }
}
