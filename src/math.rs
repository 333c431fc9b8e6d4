//! Axis-aligned bounding volumes.
//!
//! One [`Aabb`] type serves both dimensionalities: planar boxes simply carry
//! a degenerate or full-extent z range. Intersection is inclusive at the
//! faces, which is what the spatial tree relies on when an element's bounds
//! land exactly on a node boundary.

use glam::{Vec2, Vec3};

/// Axis-aligned box, stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Construct from two corners, normalizing so `min <= max` per axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Aabb::new(center - half, center + half)
    }

    /// Planar box in the z = 0 plane.
    pub fn planar(center: Vec2, size: Vec2) -> Self {
        Aabb::from_center_size(
            Vec3::new(center.x, center.y, 0.0),
            Vec3::new(size.x, size.y, 0.0),
        )
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Face-inclusive overlap test.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
            && self.max.z >= other.max.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.x <= point.x
            && self.min.y <= point.y
            && self.min.z <= point.z
            && self.max.x >= point.x
            && self.max.y >= point.y
            && self.max.z >= point.z
    }

    /// Clip this box against `bounds`. A box fully outside collapses to a
    /// degenerate sliver on the nearest face, which intersects nothing
    /// strictly inside.
    pub fn clipped_to(&self, bounds: &Aabb) -> Aabb {
        Aabb {
            min: self.min.clamp(bounds.min, bounds.max),
            max: self.max.clamp(bounds.min, bounds.max),
        }
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_corners() {
        let b = Aabb::new(Vec3::new(5.0, -1.0, 2.0), Vec3::new(-5.0, 1.0, 0.0));
        assert_eq!(b.min, Vec3::new(-5.0, -1.0, 0.0));
        assert_eq!(b.max, Vec3::new(5.0, 1.0, 2.0));
    }

    #[test]
    fn intersects_is_face_inclusive() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::splat(1.0), Vec3::splat(2.0));
        assert!(a.intersects(&b));
        let c = Aabb::new(Vec3::splat(1.001), Vec3::splat(2.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn contains_requires_full_enclosure() {
        let outer = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(10.0));
        let inner = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(4.0));
        let straddling = Aabb::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(4.0));
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&straddling));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn clipped_to_keeps_inner_region() {
        let bounds = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(10.0));
        let oversized = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(100.0));
        assert_eq!(oversized.clipped_to(&bounds), bounds);
    }
}
